use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::source::{LoaderEntry, MetadataSource};
use crate::core::error::{ActionError, ActionResult};
use crate::core::http::get_text;
use crate::core::maven::{MavenMetadata, MavenModule};

pub const FABRIC_META_BASE: &str = "https://meta.fabricmc.net";

/// Top level of `/v1/versions/`. Only the game list is read.
#[derive(Debug, Deserialize)]
struct VersionsIndex {
    game: Vec<GameVersion>,
}

#[derive(Debug, Deserialize)]
struct GameVersion {
    version: String,
}

/// Fabric Meta (v1 API) plus the Fabric Maven metadata for the API artifact.
pub struct FabricMeta {
    client: reqwest::Client,
    meta_base: String,
    maven_repo: String,
    api_module: MavenModule,
}

impl FabricMeta {
    pub fn new(
        client: reqwest::Client,
        meta_base: impl Into<String>,
        maven_repo: impl Into<String>,
        api_module: MavenModule,
    ) -> Self {
        Self {
            client,
            meta_base: meta_base.into(),
            maven_repo: maven_repo.into(),
            api_module,
        }
    }

    fn meta_url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.meta_base.trim_end_matches('/'), path)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> ActionResult<T> {
        let body = get_text(&self.client, url).await?;
        parse_json(url, &body)
    }
}

/// Decode a metadata response, treating any mismatch as a shape error.
fn parse_json<T: DeserializeOwned>(url: &str, body: &str) -> ActionResult<T> {
    serde_json::from_str(body).map_err(|e| ActionError::DataShape {
        url: url.to_string(),
        detail: e.to_string(),
    })
}

#[async_trait]
impl MetadataSource for FabricMeta {
    async fn game_versions(&self) -> ActionResult<Vec<String>> {
        let url = self.meta_url("versions/");
        let index: VersionsIndex = self.fetch_json(&url).await?;
        debug!("Fabric Meta lists {} game versions", index.game.len());
        Ok(index.game.into_iter().map(|g| g.version).collect())
    }

    async fn loader_versions(&self, game_version: &str) -> ActionResult<Vec<LoaderEntry>> {
        let url = self.meta_url(&format!("versions/loader/{}", game_version));
        self.fetch_json(&url).await
    }

    async fn api_metadata(&self) -> ActionResult<MavenMetadata> {
        let url = self.api_module.metadata_url(&self.maven_repo);
        let body = get_text(&self.client, &url).await?;
        MavenMetadata::parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_loader_listing() {
        let body = r#"[
            {
                "loader": {"separator": ".", "build": 194, "maven": "net.fabricmc:fabric-loader:0.8.2+build.194", "version": "0.8.2+build.194", "stable": true},
                "mappings": {"gameVersion": "1.15.2", "separator": "+build.", "build": 15, "maven": "net.fabricmc:yarn:1.15.2+build.15", "version": "1.15.2+build.15", "stable": false}
            }
        ]"#;
        let entries: Vec<LoaderEntry> = parse_json("u", body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].loader.version, "0.8.2+build.194");
        assert_eq!(entries[0].mappings.version, "1.15.2+build.15");
        assert_eq!(entries[0].mappings.game_version, "1.15.2");
    }

    #[test]
    fn missing_mappings_is_a_shape_error() {
        let body = r#"[{"loader": {"version": "0.8.2+build.194"}}]"#;
        let err = parse_json::<Vec<LoaderEntry>>("https://meta/v1/versions/loader/1.15.2", body)
            .unwrap_err();
        assert!(matches!(err, ActionError::DataShape { .. }));
    }

    #[test]
    fn parse_versions_index_keeps_service_order() {
        let body = r#"{
            "game": [{"version": "20w12a", "stable": false}, {"version": "1.15.2", "stable": true}],
            "mappings": [],
            "loader": []
        }"#;
        let index: VersionsIndex = parse_json("u", body).unwrap();
        let versions: Vec<String> = index.game.into_iter().map(|g| g.version).collect();
        assert_eq!(versions, vec!["20w12a", "1.15.2"]);
    }

    #[tokio::test]
    async fn unavailable_meta_is_a_network_error() {
        let addr = crate::core::http::serve_once(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let meta = FabricMeta::new(
            reqwest::Client::builder().no_proxy().build().unwrap(),
            format!("http://{}", addr),
            crate::core::maven::FABRIC_MAVEN,
            MavenModule::parse(crate::core::maven::FABRIC_API_MODULE).unwrap(),
        );

        let err = meta.loader_versions("1.15.2").await.unwrap_err();

        assert!(matches!(err, ActionError::RequestFailed { status: 503, .. }));
        assert_eq!(err.kind(), crate::core::error::ErrorKind::Network);
    }

    #[test]
    fn meta_url_joins_without_double_slash() {
        let meta = FabricMeta::new(
            reqwest::Client::new(),
            "https://meta.fabricmc.net/",
            crate::core::maven::FABRIC_MAVEN,
            MavenModule::parse(crate::core::maven::FABRIC_API_MODULE).unwrap(),
        );
        assert_eq!(
            meta.meta_url("versions/loader/1.15.2"),
            "https://meta.fabricmc.net/v1/versions/loader/1.15.2"
        );
    }
}
