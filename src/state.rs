use std::sync::Arc;
use std::time::Duration;

use emqam_auth::{
    AclStore, AuthorizationPipeline, CredentialVerifier, MemoryStore, RoleEvaluator,
    SessionIssuer,
};
use emqam_config::{CorsConfig, SecurityConfig};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: AuthorizationPipeline,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub sessions: Arc<dyn SessionIssuer>,
    pub directory: Arc<dyn RoleEvaluator>,
    pub acl: Arc<dyn AclStore>,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// State in which one [`MemoryStore`] backs the session store, the user
    /// directory and the ACL store.
    pub fn in_memory(
        security: SecurityConfig,
        store: Arc<MemoryStore>,
        store_timeout: Duration,
        cors_config: CorsConfig,
    ) -> Self {
        let pipeline = AuthorizationPipeline::new(security, store.clone(), store.clone())
            .with_store_timeout(store_timeout);

        Self {
            pipeline,
            credentials: store.clone(),
            sessions: store.clone(),
            directory: store.clone(),
            acl: store,
            cors_config,
        }
    }

    /// Upper bound on any single store call made by a handler.
    pub fn store_timeout(&self) -> Duration {
        self.pipeline.store_timeout()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("pipeline", &self.pipeline)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}
