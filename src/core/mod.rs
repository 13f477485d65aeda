// ─── Fabric CI Core ───
// Version resolution, project patching and Gradle smoke tests for Fabric mods.
//
// Architecture:
//   core/
//     config/  : CI inputs + command-line options
//     maven/   : Module coordinates + maven-metadata.xml
//     loaders/ : Fabric Meta client behind a MetadataSource trait
//     version/ : VersionSet, branch rules, resolver
//     project/ : gradle.properties, fabric.mod.json, eula.txt
//     launch/  : Platform launchers + Gradle process runner
//     pipeline/: Ordered stages from resolve to server test
//     ci       : Workflow command output

pub mod ci;
pub mod config;
pub mod error;
pub mod http;
pub mod launch;
pub mod loaders;
pub mod maven;
pub mod pipeline;
pub mod project;
pub mod version;
