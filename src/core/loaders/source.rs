use async_trait::async_trait;
use serde::Deserialize;

use crate::core::error::ActionResult;
use crate::core::maven::MavenMetadata;

/// One entry of `/v1/versions/loader/{game}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderEntry {
    pub loader: LoaderInfo,
    pub mappings: MappingsInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoaderInfo {
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingsInfo {
    pub version: String,
    pub game_version: String,
}

/// Remote metadata the version resolver reads from.
///
/// Implementations return lists in the service's own order; callers rely on
/// that order and never re-sort.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Game versions known to the loader service, newest first.
    async fn game_versions(&self) -> ActionResult<Vec<String>>;

    /// Loader/mappings combinations for one concrete game version.
    async fn loader_versions(&self, game_version: &str) -> ActionResult<Vec<LoaderEntry>>;

    /// The API artifact's published version listing.
    async fn api_metadata(&self) -> ActionResult<MavenMetadata>;
}
