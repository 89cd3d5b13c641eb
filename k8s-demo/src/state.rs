use crate::config::Config;
use crate::downstream::{DownstreamChecker, DownstreamProbe, HttpDownstream};
use crate::error::ApiResult;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide readiness flag; clones share the same value
#[derive(Clone, Debug)]
pub struct ReadinessFlag(Arc<AtomicBool>);

impl ReadinessFlag {
    pub fn new(ready: bool) -> Self {
        Self(Arc::new(AtomicBool::new(ready)))
    }

    pub fn is_ready(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Invert the flag and return the new value
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::SeqCst)
    }
}

impl Default for ReadinessFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub readiness: ReadinessFlag,
    pub downstream: Arc<DownstreamChecker>,
    pub allow_ready_toggle: bool,
}

impl AppState {
    pub fn new(downstream: Arc<DownstreamChecker>, allow_ready_toggle: bool) -> Self {
        Self {
            readiness: ReadinessFlag::default(),
            downstream,
            allow_ready_toggle,
        }
    }

    /// Wire the real HTTP downstream described by the configuration
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let probe = HttpDownstream::new(config.downstream_url.clone())?;
        let checker = DownstreamChecker::new(
            Arc::new(probe) as Arc<dyn DownstreamProbe>,
            config.downstream_timeout(),
        );

        Ok(Self::new(Arc::new(checker), config.allow_ready_toggle))
    }
}
