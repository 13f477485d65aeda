use std::collections::HashMap;

/// Input names declared by the action.
pub const MINECRAFT_VERSION: &str = "minecraftVersion";
pub const RUN_BUILD_TEST: &str = "runBuildTest";
pub const RUN_SERVER_TEST: &str = "runServerTest";

/// String-keyed inputs supplied by the CI host.
pub trait InputProvider: Send + Sync {
    /// Raw value of `name`; `None` when unset.
    fn get(&self, name: &str) -> Option<String>;

    /// Trimmed value, with empty strings treated as unset.
    fn get_trimmed(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Boolean input. See [`parse_flag`].
    fn get_flag(&self, name: &str) -> bool {
        self.get(name).as_deref().is_some_and(parse_flag)
    }
}

/// `true`, `1`, `yes` and `on` (any case) are true; everything else is false.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// GitHub Actions inputs, exposed to the process as `INPUT_<NAME>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvInputs;

impl EnvInputs {
    pub fn variable_name(name: &str) -> String {
        format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
    }
}

impl InputProvider for EnvInputs {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(Self::variable_name(name)).ok()
    }
}

/// In-memory inputs.
#[derive(Debug, Default, Clone)]
pub struct MapInputs(HashMap<String, String>);

impl MapInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }
}

impl InputProvider for MapInputs {
    fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}
