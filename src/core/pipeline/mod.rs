// ─── Pipeline ───
// resolve → configure → build → run dir → EULA → server test.
// Every stage reports Completed or Skipped; any error aborts the run.

pub mod stage;

use tracing::{info, warn};

use crate::core::config::ActionConfig;
use crate::core::error::{ActionError, ActionResult};
use crate::core::launch::{CommandRunner, ProcessSpec, RunMode};
use crate::core::loaders::MetadataSource;
use crate::core::project::{
    accept_generated_eula, apply_versions, create_accepted_eula, BuildStrategy, ProjectLayout,
};
use crate::core::version::{BranchTable, VersionResolver};

pub use stage::{PipelineReport, Stage, StageOutcome, StageReport};

pub const SUCCESS_MESSAGE: &str = "All tests have passed!";

const BUILD_STEP: &str = "gradle:build";
const BOOTSTRAP_STEP: &str = "gradle:bootstrap";
const SERVER_STEP: &str = "gradle:runServer";

pub struct Pipeline<'a> {
    config: &'a ActionConfig,
    source: &'a dyn MetadataSource,
    runner: &'a dyn CommandRunner,
    branches: BranchTable,
    layout: ProjectLayout,
    stages: Vec<StageReport>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a ActionConfig,
        source: &'a dyn MetadataSource,
        runner: &'a dyn CommandRunner,
        branches: BranchTable,
    ) -> Self {
        let layout =
            ProjectLayout::new(&config.project_dir).with_mod_manifest(&config.mod_manifest);
        Self {
            config,
            source,
            runner,
            branches,
            layout,
            stages: Vec::new(),
        }
    }

    pub async fn run(mut self) -> ActionResult<PipelineReport> {
        let versions = VersionResolver::new(self.source, &self.branches)
            .resolve(&self.config.minecraft_version)
            .await?;
        info!("Resolved versions: {}", versions);
        self.record(Stage::Resolve, StageOutcome::Completed);

        let flags = apply_versions(self.config.strategy, &self.layout, &versions).await?;
        self.record(Stage::Configure, StageOutcome::Completed);

        let outcome = self.build(&flags).await?;
        self.record(Stage::Build, outcome);

        self.layout.ensure_run_dir().await?;
        self.record(Stage::PrepareRunDir, StageOutcome::Completed);

        self.accept_eula(&flags).await?;
        self.record(Stage::AcceptEula, StageOutcome::Completed);

        let outcome = self.server_test(&flags).await?;
        self.record(Stage::ServerTest, outcome);

        info!("{}", SUCCESS_MESSAGE);
        Ok(PipelineReport {
            versions,
            stages: self.stages,
        })
    }

    fn record(&mut self, stage: Stage, outcome: StageOutcome) {
        match outcome {
            StageOutcome::Completed => info!("Stage {} completed", stage),
            StageOutcome::Skipped => info!("Stage {} skipped", stage),
        }
        self.stages.push(StageReport { stage, outcome });
    }

    fn spec(&self, step: &str, args: Vec<String>, mode: RunMode) -> ProcessSpec {
        let timeout = match step {
            BUILD_STEP => self.config.build_timeout,
            _ => self.config.server_timeout,
        };
        ProcessSpec {
            step: step.to_string(),
            project_dir: self.layout.root.clone(),
            args,
            mode,
            timeout,
        }
    }

    async fn build(&self, flags: &[String]) -> ActionResult<StageOutcome> {
        if !self.config.run_build_test {
            return Ok(StageOutcome::Skipped);
        }

        let spec = self.spec(
            BUILD_STEP,
            gradle_args(&["build", "--refresh-dependencies"], flags),
            RunMode::ToCompletion,
        );
        let outcome = self.runner.run(&spec).await?;
        if !outcome.success {
            return Err(ActionError::ProcessFailed {
                step: spec.step,
                code: outcome.exit_code,
            });
        }
        Ok(StageOutcome::Completed)
    }

    async fn accept_eula(&self, flags: &[String]) -> ActionResult<()> {
        let eula = self.layout.eula();
        match self.config.strategy {
            BuildStrategy::FlagInjection => create_accepted_eula(&eula).await,
            BuildStrategy::LinePatch => {
                // The server writes eula.txt on its first boot and then quits.
                let generated = tokio::fs::try_exists(&eula)
                    .await
                    .map_err(|e| ActionError::io(&eula, e))?;
                if self.config.run_server_test && !generated {
                    let spec = self.server_spec(BOOTSTRAP_STEP, flags);
                    let outcome = self.runner.run(&spec).await?;
                    if !outcome.success && !outcome.marker_seen {
                        warn!(
                            "[{}] Exited with status {:?}, continuing",
                            spec.step, outcome.exit_code
                        );
                    }
                }
                accept_generated_eula(&eula).await
            }
        }
    }

    async fn server_test(&self, flags: &[String]) -> ActionResult<StageOutcome> {
        if !self.config.run_server_test {
            return Ok(StageOutcome::Skipped);
        }

        let spec = self.server_spec(SERVER_STEP, flags);
        let outcome = self.runner.run(&spec).await?;
        if !outcome.marker_seen {
            return Err(ActionError::ServerNotReady {
                marker: self.config.ready_marker.clone(),
            });
        }
        Ok(StageOutcome::Completed)
    }

    fn server_spec(&self, step: &str, flags: &[String]) -> ProcessSpec {
        self.spec(
            step,
            gradle_args(&["runServer", "--args=nogui"], flags),
            RunMode::UntilMarker(self.config.ready_marker.clone()),
        )
    }
}

fn gradle_args(task: &[&str], flags: &[String]) -> Vec<String> {
    task.iter()
        .map(|arg| arg.to_string())
        .chain(flags.iter().cloned())
        .collect()
}
