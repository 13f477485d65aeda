use std::path::Path;

use tracing::info;

use crate::core::error::{ActionError, ActionResult};
use crate::core::version::VersionSet;

/// Rewrite every line naming one of the four version keys.
///
/// A matching line is replaced whole by a tab-indented `key=value`. Keys are
/// tested in `VersionSet::properties` order and a line is matched on
/// substring, so `# loader_version` comments are rewritten too. Every output
/// line is newline-terminated, which makes the patch idempotent.
pub fn patch_properties(content: &str, versions: &VersionSet) -> String {
    let properties = versions.properties();
    let mut out = String::with_capacity(content.len() + 64);

    for line in content.lines() {
        match properties.iter().find(|(key, _)| line.contains(key)) {
            Some((key, value)) => {
                out.push('\t');
                out.push_str(key);
                out.push('=');
                out.push_str(value);
            }
            None => out.push_str(line),
        }
        out.push('\n');
    }

    out
}

/// Read `path` in full, patch it, then overwrite it once.
pub async fn write_properties(path: &Path, versions: &VersionSet) -> ActionResult<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ActionError::io(path, e))?;

    let patched = patch_properties(&content, versions);

    tokio::fs::write(path, patched)
        .await
        .map_err(|e| ActionError::io(path, e))?;

    info!("Successfully wrote to {}", path.display());
    Ok(())
}
