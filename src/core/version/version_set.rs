use std::fmt;

use serde::Serialize;

/// Sentinel accepted as the requested game version.
pub const LATEST: &str = "latest";

/// Gradle property keys, in the order they are matched against lines.
pub const MINECRAFT_VERSION_KEY: &str = "minecraft_version";
pub const YARN_MAPPINGS_KEY: &str = "yarn_mappings";
pub const LOADER_VERSION_KEY: &str = "loader_version";
pub const FABRIC_VERSION_KEY: &str = "fabric_version";

/// The toolchain versions one run builds against.
///
/// Resolved once and then only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSet {
    pub game: String,
    pub mappings: String,
    pub loader: String,
    pub api: String,
}

impl VersionSet {
    /// `(gradle property, value)` pairs, in matching order.
    pub fn properties(&self) -> [(&'static str, &str); 4] {
        [
            (MINECRAFT_VERSION_KEY, self.game.as_str()),
            (YARN_MAPPINGS_KEY, self.mappings.as_str()),
            (LOADER_VERSION_KEY, self.loader.as_str()),
            (FABRIC_VERSION_KEY, self.api.as_str()),
        ]
    }

    /// `-Pkey=value` tokens for a Gradle invocation.
    pub fn gradle_flags(&self) -> Vec<String> {
        self.properties()
            .iter()
            .map(|(key, value)| format!("-P{}={}", key, value))
            .collect()
    }
}

impl fmt::Display for VersionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "minecraft {}, yarn {}, loader {}, fabric-api {}",
            self.game, self.mappings, self.loader, self.api
        )
    }
}
