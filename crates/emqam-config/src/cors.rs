use crate::env::{process_env, string_or};

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let allowed_origins = string_or(&lookup, "ALLOWED_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origins_are_trimmed_and_filtered() {
        let config = CorsConfig::from_lookup(|_| Some(" http://a.test , ,http://b.test".to_string()));
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }
}
