use crate::env::{process_env, string_or};

/// - `LOG_LEVEL` (default `info`): level for this service's own targets
/// - `LOG_DIR` (default `storage/logs`): rolling JSON log directory
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            level: string_or(&lookup, "LOG_LEVEL", "info"),
            directory: string_or(&lookup, "LOG_DIR", "storage/logs"),
        }
    }
}
