use quick_xml::de::from_str;
use serde::Deserialize;

use crate::core::error::{ActionError, ActionResult};

/// Minimal `maven-metadata.xml` model. Only the version listing is read.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MavenMetadata {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub versioning: Option<Versioning>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Versioning {
    #[serde(default)]
    pub latest: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub versions: Option<VersionList>,
}

#[derive(Debug, Deserialize, Default)]
pub struct VersionList {
    #[serde(default, rename = "version")]
    pub items: Vec<String>,
}

impl MavenMetadata {
    /// Parse a `maven-metadata.xml` document.
    pub fn parse(xml: &str) -> ActionResult<Self> {
        Ok(from_str(xml)?)
    }

    /// The `<latest>` marker. `url` is only used for error reporting.
    pub fn latest(&self, url: &str) -> ActionResult<&str> {
        self.versioning
            .as_ref()
            .and_then(|v| v.latest.as_deref())
            .ok_or_else(|| missing(url, "versioning.latest"))
    }

    /// The `<release>` marker. `url` is only used for error reporting.
    pub fn release(&self, url: &str) -> ActionResult<&str> {
        self.versioning
            .as_ref()
            .and_then(|v| v.release.as_deref())
            .ok_or_else(|| missing(url, "versioning.release"))
    }

    /// Every published version, in document order.
    pub fn versions(&self) -> &[String] {
        self.versioning
            .as_ref()
            .and_then(|v| v.versions.as_ref())
            .map(|v| v.items.as_slice())
            .unwrap_or(&[])
    }
}

fn missing(url: &str, field: &str) -> ActionError {
    ActionError::DataShape {
        url: url.to_string(),
        detail: format!("missing <{}>", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FABRIC_API_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <metadata>
            <groupId>net.fabricmc.fabric-api</groupId>
            <artifactId>fabric-api</artifactId>
            <versioning>
                <latest>0.5.1+build.294-1.15</latest>
                <release>0.5.1+build.294-1.15</release>
                <versions>
                    <version>0.3.2+build.218-1.14</version>
                    <version>0.4.29+build.290-1.15</version>
                    <version>0.5.1+build.294-1.15</version>
                </versions>
                <lastUpdated>20200318120000</lastUpdated>
            </versioning>
        </metadata>
    "#;

    #[test]
    fn parse_fabric_api_metadata() {
        let doc = MavenMetadata::parse(FABRIC_API_METADATA).unwrap();
        assert_eq!(doc.artifact_id.as_deref(), Some("fabric-api"));
        assert_eq!(doc.latest("u").unwrap(), "0.5.1+build.294-1.15");
        assert_eq!(doc.release("u").unwrap(), "0.5.1+build.294-1.15");
        assert_eq!(doc.versions().len(), 3);
        assert_eq!(doc.versions()[0], "0.3.2+build.218-1.14");
    }

    #[test]
    fn missing_markers_are_data_shape_errors() {
        let doc = MavenMetadata::parse("<metadata><versioning></versioning></metadata>").unwrap();
        assert!(doc.versions().is_empty());
        assert!(matches!(
            doc.release("https://maven.example/m.xml"),
            Err(ActionError::DataShape { .. })
        ));
        assert!(matches!(doc.latest("u"), Err(ActionError::DataShape { .. })));
    }
}
