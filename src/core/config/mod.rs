pub mod inputs;
pub mod options;

pub use inputs::{parse_flag, EnvInputs, InputProvider, MapInputs};
pub use options::{ActionConfig, CliOptions, DEFAULT_READY_MARKER};
