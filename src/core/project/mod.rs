// ─── Project Files ───
// Applies a resolved VersionSet to the mod project on disk.

pub mod eula;
pub mod mod_manifest;
pub mod properties;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::{ActionError, ActionResult};
use crate::core::version::VersionSet;

pub use eula::{accept_generated_eula, create_accepted_eula, patch_eula, EULA_FILE};
pub use mod_manifest::{relax_dependencies, write_mod_manifest};
pub use properties::{patch_properties, write_properties};

pub const GRADLE_PROPERTIES: &str = "gradle.properties";
pub const DEFAULT_MOD_MANIFEST: &str = "src/main/resources/fabric.mod.json";
pub const RUN_DIR: &str = "run";

/// How resolved versions reach Gradle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BuildStrategy {
    /// Rewrite `gradle.properties` in place.
    LinePatch,
    /// Pass `-P` flags to Gradle and relax the mod manifest.
    FlagInjection,
}

/// Paths of the files the action touches, rooted at the project directory.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub mod_manifest: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mod_manifest = root.join(DEFAULT_MOD_MANIFEST);
        Self { root, mod_manifest }
    }

    pub fn with_mod_manifest(mut self, manifest: &Path) -> Self {
        self.mod_manifest = self.root.join(manifest);
        self
    }

    pub fn properties(&self) -> PathBuf {
        self.root.join(GRADLE_PROPERTIES)
    }

    pub fn run_dir(&self) -> PathBuf {
        self.root.join(RUN_DIR)
    }

    pub fn eula(&self) -> PathBuf {
        self.run_dir().join(EULA_FILE)
    }

    /// Create `run/` if needed.
    pub async fn ensure_run_dir(&self) -> ActionResult<PathBuf> {
        let dir = self.run_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ActionError::io(&dir, e))?;
        Ok(dir)
    }
}

/// Write `versions` into the project per `strategy`.
///
/// Returns the extra Gradle arguments every later invocation must carry.
pub async fn apply_versions(
    strategy: BuildStrategy,
    layout: &ProjectLayout,
    versions: &VersionSet,
) -> ActionResult<Vec<String>> {
    match strategy {
        BuildStrategy::LinePatch => {
            write_properties(&layout.properties(), versions).await?;
            Ok(Vec::new())
        }
        BuildStrategy::FlagInjection => {
            write_mod_manifest(&layout.mod_manifest).await?;
            let flags = versions.gradle_flags();
            info!("Injecting Gradle properties: {}", flags.join(" "));
            Ok(flags)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions() -> VersionSet {
        VersionSet {
            game: "1.15.2".into(),
            mappings: "1.15.2+build.15".into(),
            loader: "0.8.2+build.194".into(),
            api: "0.5.1+build.294-1.15".into(),
        }
    }

    #[tokio::test]
    async fn flag_injection_leaves_properties_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path()).with_mod_manifest(Path::new("fabric.mod.json"));
        tokio::fs::write(layout.properties(), "minecraft_version=1.14.4\n")
            .await
            .unwrap();
        tokio::fs::write(
            &layout.mod_manifest,
            r#"{"depends":{"fabricloader":"0.7.0","minecraft":"1.15.2"}}"#,
        )
        .await
        .unwrap();

        let flags = apply_versions(BuildStrategy::FlagInjection, &layout, &versions())
            .await
            .unwrap();

        assert_eq!(flags.len(), 4);
        assert_eq!(
            tokio::fs::read_to_string(layout.properties()).await.unwrap(),
            "minecraft_version=1.14.4\n"
        );
    }

    #[tokio::test]
    async fn line_patch_returns_no_flags() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        tokio::fs::write(layout.properties(), "minecraft_version=1.14.4\n")
            .await
            .unwrap();

        let flags = apply_versions(BuildStrategy::LinePatch, &layout, &versions())
            .await
            .unwrap();

        assert!(flags.is_empty());
        assert_eq!(
            tokio::fs::read_to_string(layout.properties()).await.unwrap(),
            "\tminecraft_version=1.15.2\n"
        );
    }

    #[tokio::test]
    async fn ensure_run_dir_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        layout.ensure_run_dir().await.unwrap();
        let run = layout.ensure_run_dir().await.unwrap();
        assert!(run.is_dir());
        assert_eq!(layout.eula(), run.join("eula.txt"));
    }
}
