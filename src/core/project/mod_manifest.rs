use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::core::error::{ActionError, ActionResult};

/// Constraint written over the pinned dependencies.
pub const WILDCARD: &str = "*";

/// `depends` keys relaxed so any resolved version satisfies the manifest.
pub const RELAXED_DEPENDENCIES: [&str; 2] = ["fabricloader", "minecraft"];

/// Set `depends.fabricloader` and `depends.minecraft` to `"*"`.
///
/// Everything else is carried over as parsed.
pub fn relax_dependencies(manifest: &Value, origin: &Path) -> ActionResult<Value> {
    let mut patched = manifest.clone();

    let depends = patched
        .get_mut("depends")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ActionError::DataShape {
            url: origin.display().to_string(),
            detail: "manifest has no `depends` object".into(),
        })?;

    for key in RELAXED_DEPENDENCIES {
        depends.insert(key.to_string(), Value::String(WILDCARD.to_string()));
    }

    Ok(patched)
}

/// Rewrite the mod manifest at `path` with relaxed dependency constraints.
pub async fn write_mod_manifest(path: &Path) -> ActionResult<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ActionError::io(path, e))?;
    let manifest: Value = serde_json::from_str(&raw)?;

    let patched = relax_dependencies(&manifest, path)?;
    let json = serde_json::to_string_pretty(&patched)?;

    tokio::fs::write(path, json)
        .await
        .map_err(|e| ActionError::io(path, e))?;

    info!("Relaxed loader and game constraints in {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn relax_overwrites_two_constraints_only() {
        let manifest = json!({
            "depends": {"fabricloader": "0.7.0", "minecraft": "1.15.2", "other": "x"}
        });

        let patched = relax_dependencies(&manifest, Path::new("fabric.mod.json")).unwrap();

        assert_eq!(patched["depends"]["fabricloader"], "*");
        assert_eq!(patched["depends"]["minecraft"], "*");
        assert_eq!(patched["depends"]["other"], "x");
        // Source document is left untouched.
        assert_eq!(manifest["depends"]["minecraft"], "1.15.2");
    }

    #[test]
    fn missing_depends_is_a_shape_error() {
        let manifest = json!({"id": "modid"});
        let err = relax_dependencies(&manifest, Path::new("fabric.mod.json")).unwrap_err();
        assert!(matches!(err, ActionError::DataShape { .. }));
    }

    #[tokio::test]
    async fn write_mod_manifest_keeps_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fabric.mod.json");
        tokio::fs::write(
            &path,
            r#"{
  "schemaVersion": 1,
  "id": "modid",
  "entrypoints": {"main": ["net.fabricmc.example.ExampleMod"]},
  "depends": {"fabricloader": ">=0.7.4", "fabric": "*", "minecraft": "1.15.x"}
}"#,
        )
        .await
        .unwrap();

        write_mod_manifest(&path).await.unwrap();

        let rewritten: Value =
            serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(rewritten["schemaVersion"], 1);
        assert_eq!(rewritten["id"], "modid");
        assert_eq!(
            rewritten["entrypoints"]["main"][0],
            "net.fabricmc.example.ExampleMod"
        );
        assert_eq!(rewritten["depends"]["fabricloader"], "*");
        assert_eq!(rewritten["depends"]["minecraft"], "*");
        assert_eq!(rewritten["depends"]["fabric"], "*");
    }
}
