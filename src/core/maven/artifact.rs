use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{ActionError, ActionResult};

/// A Maven module coordinate without a version: `groupId:artifactId`.
///
/// Used to locate the `maven-metadata.xml` listing every published version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MavenModule {
    pub group_id: String,
    pub artifact_id: String,
}

impl MavenModule {
    /// Parse a `groupId:artifactId` coordinate.
    ///
    /// # Examples
    /// ```
    /// use fabric_ci_lib::core::maven::MavenModule;
    ///
    /// let m = MavenModule::parse("net.fabricmc.fabric-api:fabric-api").unwrap();
    /// assert_eq!(m.group_id, "net.fabricmc.fabric-api");
    /// ```
    pub fn parse(coord: &str) -> ActionResult<Self> {
        let parts: Vec<&str> = coord.trim().split(':').collect();

        match parts.as_slice() {
            [group, artifact] if !group.is_empty() && !artifact.is_empty() => Ok(Self {
                group_id: group.to_string(),
                artifact_id: artifact.to_string(),
            }),
            _ => Err(ActionError::InvalidInput {
                name: "api-artifact".into(),
                reason: format!("expected groupId:artifactId, got {:?}", coord),
            }),
        }
    }

    /// Construct the group path portion (`net/fabricmc/fabric-api`).
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// URL of the module's version listing under the given repository base.
    ///
    /// Template:
    /// `<repo>/<group_path>/<artifact_id>/maven-metadata.xml`
    pub fn metadata_url(&self, repo_base: &str) -> String {
        let base = repo_base.trim_end_matches('/');
        format!(
            "{}/{}/{}/maven-metadata.xml",
            base,
            self.group_path(),
            self.artifact_id
        )
    }
}

impl FromStr for MavenModule {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MavenModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_module_coordinate() {
        let m = MavenModule::parse("net.fabricmc.fabric-api:fabric-api").unwrap();
        assert_eq!(m.group_id, "net.fabricmc.fabric-api");
        assert_eq!(m.artifact_id, "fabric-api");
        assert_eq!(m.to_string(), "net.fabricmc.fabric-api:fabric-api");
    }

    #[test]
    fn parse_rejects_versioned_coordinate() {
        assert!(MavenModule::parse("net.fabricmc:fabric-loader:0.8.2").is_err());
        assert!(MavenModule::parse("fabric-api").is_err());
        assert!(MavenModule::parse(":fabric-api").is_err());
    }

    #[test]
    fn metadata_url_construction() {
        let m = MavenModule::parse("net.fabricmc.fabric-api:fabric-api").unwrap();
        assert_eq!(
            m.metadata_url("https://maven.fabricmc.net/"),
            "https://maven.fabricmc.net/net/fabricmc/fabric-api/fabric-api/maven-metadata.xml"
        );
    }
}
