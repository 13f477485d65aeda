mod artifact;
mod metadata;

pub use artifact::MavenModule;
pub use metadata::{MavenMetadata, VersionList, Versioning};

/// Fabric's Maven repository and the module that publishes Fabric API.
pub const FABRIC_MAVEN: &str = "https://maven.fabricmc.net";
pub const FABRIC_API_MODULE: &str = "net.fabricmc.fabric-api:fabric-api";
