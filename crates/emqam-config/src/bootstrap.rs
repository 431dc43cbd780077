use crate::env::process_env;

/// Administrator seeded into the in-memory user directory at startup.
///
/// Only present when both `BOOTSTRAP_ADMIN_USERNAME` and
/// `BOOTSTRAP_ADMIN_PASSWORD` are set and non-empty.
#[derive(Clone)]
pub struct BootstrapConfig {
    pub admin_username: String,
    pub admin_password: String,
}

impl BootstrapConfig {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(process_env)
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let admin_username = lookup("BOOTSTRAP_ADMIN_USERNAME").filter(|v| !v.is_empty())?;
        let admin_password = lookup("BOOTSTRAP_ADMIN_PASSWORD").filter(|v| !v.is_empty())?;
        Some(Self {
            admin_username,
            admin_password,
        })
    }
}

impl std::fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("admin_username", &self.admin_username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_both_values() {
        assert!(BootstrapConfig::from_lookup(|k| {
            (k == "BOOTSTRAP_ADMIN_USERNAME").then(|| "root".to_string())
        })
        .is_none());

        let config = BootstrapConfig::from_lookup(|k| match k {
            "BOOTSTRAP_ADMIN_USERNAME" => Some("root".to_string()),
            "BOOTSTRAP_ADMIN_PASSWORD" => Some("toor".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.admin_username, "root");
    }
}
