use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use super::inputs::{InputProvider, MINECRAFT_VERSION, RUN_BUILD_TEST, RUN_SERVER_TEST};
use crate::core::error::ActionResult;
use crate::core::loaders::FABRIC_META_BASE;
use crate::core::maven::{MavenModule, FABRIC_API_MODULE, FABRIC_MAVEN};
use crate::core::project::{BuildStrategy, DEFAULT_MOD_MANIFEST};
use crate::core::version::LATEST;

pub const DEFAULT_READY_MARKER: &str = "Preparing spawn area";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SERVER_TIMEOUT_SECS: u64 = 600;

/// Command-line options. CI inputs fill in anything not given here.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fabric-ci-action",
    author,
    version,
    about = "Resolve Fabric toolchain versions, build the mod and smoke-test its server"
)]
pub struct CliOptions {
    /// Game version to build against, or `latest`
    #[arg(long)]
    pub minecraft_version: Option<String>,

    /// Run `gradlew build`
    #[arg(long)]
    pub run_build_test: Option<bool>,

    /// Boot the dedicated server until it is ready
    #[arg(long)]
    pub run_server_test: Option<bool>,

    /// Mod project root
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// How resolved versions are handed to Gradle
    #[arg(long, value_enum, default_value_t = BuildStrategy::FlagInjection)]
    pub strategy: BuildStrategy,

    /// Mod manifest, relative to the project root
    #[arg(long, default_value = DEFAULT_MOD_MANIFEST)]
    pub manifest: PathBuf,

    #[arg(long, default_value = FABRIC_META_BASE)]
    pub meta_host: String,

    #[arg(long, default_value = FABRIC_MAVEN)]
    pub maven_repo: String,

    /// `groupId:artifactId` of the API artifact
    #[arg(long, default_value = FABRIC_API_MODULE)]
    pub api_artifact: String,

    /// JSON file replacing the built-in game version → API branch rules
    #[arg(long)]
    pub branch_rules: Option<PathBuf>,

    /// Server log phrase that means the server booted
    #[arg(long, default_value = DEFAULT_READY_MARKER)]
    pub ready_marker: String,

    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub http_timeout_secs: u64,

    /// 0 disables the limit
    #[arg(long, default_value_t = 0)]
    pub build_timeout_secs: u64,

    /// 0 disables the limit
    #[arg(long, default_value_t = DEFAULT_SERVER_TIMEOUT_SECS)]
    pub server_timeout_secs: u64,
}

/// Everything one run needs, fixed before the pipeline starts.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    pub minecraft_version: String,
    pub run_build_test: bool,
    pub run_server_test: bool,
    pub project_dir: PathBuf,
    pub strategy: BuildStrategy,
    pub mod_manifest: PathBuf,
    pub meta_host: String,
    pub maven_repo: String,
    pub api_module: MavenModule,
    pub branch_rules: Option<PathBuf>,
    pub ready_marker: String,
    pub http_timeout: Duration,
    pub build_timeout: Option<Duration>,
    pub server_timeout: Option<Duration>,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            minecraft_version: LATEST.into(),
            run_build_test: false,
            run_server_test: false,
            project_dir: PathBuf::from("."),
            strategy: BuildStrategy::FlagInjection,
            mod_manifest: PathBuf::from(DEFAULT_MOD_MANIFEST),
            meta_host: FABRIC_META_BASE.into(),
            maven_repo: FABRIC_MAVEN.into(),
            api_module: MavenModule {
                group_id: "net.fabricmc.fabric-api".into(),
                artifact_id: "fabric-api".into(),
            },
            branch_rules: None,
            ready_marker: DEFAULT_READY_MARKER.into(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            build_timeout: None,
            server_timeout: Some(Duration::from_secs(DEFAULT_SERVER_TIMEOUT_SECS)),
        }
    }
}

impl ActionConfig {
    /// Merge CLI options over CI inputs.
    pub fn from_sources(cli: CliOptions, inputs: &dyn InputProvider) -> ActionResult<Self> {
        let minecraft_version = cli
            .minecraft_version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| inputs.get_trimmed(MINECRAFT_VERSION))
            .unwrap_or_else(|| LATEST.to_string());

        Ok(Self {
            minecraft_version,
            run_build_test: cli
                .run_build_test
                .unwrap_or_else(|| inputs.get_flag(RUN_BUILD_TEST)),
            run_server_test: cli
                .run_server_test
                .unwrap_or_else(|| inputs.get_flag(RUN_SERVER_TEST)),
            project_dir: cli.project_dir,
            strategy: cli.strategy,
            mod_manifest: cli.manifest,
            meta_host: cli.meta_host,
            maven_repo: cli.maven_repo,
            api_module: MavenModule::parse(&cli.api_artifact)?,
            branch_rules: cli.branch_rules,
            ready_marker: cli.ready_marker,
            http_timeout: Duration::from_secs(cli.http_timeout_secs),
            build_timeout: limit(cli.build_timeout_secs),
            server_timeout: limit(cli.server_timeout_secs),
        })
    }
}

fn limit(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
