// ─── Version Resolver ───
// Turns a requested game version (or "latest") into a full VersionSet.

use tracing::info;

use super::branch::BranchTable;
use super::version_set::{VersionSet, LATEST};
use crate::core::error::{ActionError, ActionResult};
use crate::core::loaders::MetadataSource;
use crate::core::maven::MavenMetadata;

pub struct VersionResolver<'a> {
    source: &'a dyn MetadataSource,
    branches: &'a BranchTable,
}

impl<'a> VersionResolver<'a> {
    pub fn new(source: &'a dyn MetadataSource, branches: &'a BranchTable) -> Self {
        Self { source, branches }
    }

    /// Resolve `requested` against the remote services.
    ///
    /// The loader service's own ordering is trusted: its first game version
    /// stands in for `"latest"` and its first loader entry is the one used.
    pub async fn resolve(&self, requested: &str) -> ActionResult<VersionSet> {
        let track_latest = requested == LATEST;

        let effective = if track_latest {
            let games = self.source.game_versions().await?;
            let newest = games.into_iter().next().ok_or_else(|| ActionError::DataShape {
                url: "versions/".into(),
                detail: "game version list is empty".into(),
            })?;
            info!("Latest game version is {}", newest);
            newest
        } else {
            requested.to_string()
        };

        let entry = self
            .source
            .loader_versions(&effective)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ActionError::DataShape {
                url: format!("versions/loader/{}", effective),
                detail: "loader list is empty".into(),
            })?;

        let game = entry.mappings.game_version;
        info!("Minecraft version retrieved! Version {}", game);
        info!("Yarn version retrieved! Version {}", entry.mappings.version);
        info!("Fabric Loader version retrieved! Version {}", entry.loader.version);

        let metadata = self.source.api_metadata().await?;
        let api = if track_latest {
            metadata.latest("maven-metadata.xml")?.to_string()
        } else {
            let branch = self.branches.branch_for(&game);
            select_api_version(&metadata, branch)?
        };
        info!("Fabric API version retrieved! Version {}", api);

        Ok(VersionSet {
            game,
            mappings: entry.mappings.version,
            loader: entry.loader.version,
            api,
        })
    }
}

/// Last version (document order) ending with `branch`, else `<release>`.
///
/// No semantic-version comparison happens here: a matching entry listed
/// later always replaces an earlier one.
pub fn select_api_version(metadata: &MavenMetadata, branch: &str) -> ActionResult<String> {
    match metadata.versions().iter().rev().find(|v| v.ends_with(branch)) {
        Some(version) => Ok(version.clone()),
        None => Ok(metadata.release("maven-metadata.xml")?.to_string()),
    }
}
