use std::fmt;

use serde::Serialize;

use crate::core::version::VersionSet;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Resolve,
    Configure,
    Build,
    PrepareRunDir,
    AcceptEula,
    ServerTest,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolve => "resolve",
            Stage::Configure => "configure",
            Stage::Build => "build",
            Stage::PrepareRunDir => "prepare-run-dir",
            Stage::AcceptEula => "accept-eula",
            Stage::ServerTest => "server-test",
        };
        f.write_str(name)
    }
}

/// What a stage did. Both variants let the pipeline proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageOutcome {
    Completed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
}

/// Result of a full successful run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub versions: VersionSet,
    pub stages: Vec<StageReport>,
}

impl PipelineReport {
    pub fn outcome_of(&self, stage: Stage) -> Option<StageOutcome> {
        self.stages
            .iter()
            .find(|report| report.stage == stage)
            .map(|report| report.outcome)
    }
}
