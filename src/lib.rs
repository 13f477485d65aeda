pub mod core;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::core::ci::error_annotation;
use crate::core::config::{ActionConfig, CliOptions, EnvInputs};
use crate::core::error::ActionResult;
use crate::core::http::build_http_client;
use crate::core::launch::{host_launcher, GradleRunner};
use crate::core::loaders::FabricMeta;
use crate::core::pipeline::{Pipeline, PipelineReport};
use crate::core::version::BranchTable;

pub fn run() -> ExitCode {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,fabric_ci_lib=debug")),
        )
        .init();

    info!("fabric-ci-action starting...");

    let cli = CliOptions::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return fail(&format!("Failed to start async runtime: {}", e)),
    };

    match runtime.block_on(execute(cli)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(kind = ?e.kind(), "{}", e);
            fail(&e.to_string())
        }
    }
}

async fn execute(cli: CliOptions) -> ActionResult<PipelineReport> {
    let config = ActionConfig::from_sources(cli, &EnvInputs)?;

    let branches = match &config.branch_rules {
        Some(path) => BranchTable::load(path).await?,
        None => BranchTable::default(),
    };

    let client = build_http_client(config.http_timeout)?;
    let meta = FabricMeta::new(
        client,
        config.meta_host.clone(),
        config.maven_repo.clone(),
        config.api_module.clone(),
    );
    let runner = GradleRunner::new(host_launcher());

    Pipeline::new(&config, &meta, &runner, branches).run().await
}

fn fail(message: &str) -> ExitCode {
    println!("{}", error_annotation(message));
    ExitCode::FAILURE
}
