use std::sync::Arc;

use crate::config::Config;
use crate::upstream::{GoogleUpstream, UpstreamClient};

/// Read-only context shared by every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Arc<dyn UpstreamClient>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let upstream = Arc::new(GoogleUpstream::new(&config)?);
        Ok(Self::with_upstream(config, upstream))
    }

    pub fn with_upstream(config: Config, upstream: Arc<dyn UpstreamClient>) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
        }
    }
}
