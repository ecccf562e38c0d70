//! Expired-session sweeper
//!
//! Expiry is otherwise only enforced when a session is checked again. The
//! sweeper evicts sessions that nobody comes back for, so the live-session
//! store does not grow without bound.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::errors::DomainError;

use super::service::VerificationService;
use super::traits::{SessionStore, SmsServiceTrait};

/// Configuration for the session sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to run a sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the background task at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

impl SweeperConfig {
    /// Build from an interval, where `0` disables the sweeper
    pub fn from_interval(interval_seconds: u64) -> Self {
        Self {
            interval_seconds,
            enabled: interval_seconds > 0,
        }
    }
}

/// Result of a single sweep
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of expired sessions removed
    pub expired_sessions_removed: usize,
    /// Number of sessions left in the store afterwards
    pub live_sessions: usize,
}

/// Periodically removes expired verification sessions
pub struct SessionSweeper<S: SmsServiceTrait + 'static, T: SessionStore + 'static> {
    service: Arc<VerificationService<S, T>>,
    config: SweeperConfig,
}

impl<S: SmsServiceTrait + 'static, T: SessionStore + 'static> SessionSweeper<S, T> {
    pub fn new(service: Arc<VerificationService<S, T>>, config: SweeperConfig) -> Self {
        Self { service, config }
    }

    /// Run a single sweep
    ///
    /// # Returns
    /// * `Ok(SweepResult)` - How many sessions were evicted and how many remain
    /// * `Err(DomainError)` - If the session store fails
    pub async fn run_once(&self) -> Result<SweepResult, DomainError> {
        let expired_sessions_removed = self.service.purge_expired().await?;
        let live_sessions = self.service.live_sessions().await?;

        if expired_sessions_removed > 0 {
            info!(
                removed = expired_sessions_removed,
                live = live_sessions,
                event = "sessions_swept",
                "Evicted expired verification sessions"
            );
        } else {
            debug!(live = live_sessions, "Session sweep found nothing to evict");
        }

        Ok(SweepResult {
            expired_sessions_removed,
            live_sessions,
        })
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the sweeper is disabled. The first sweep runs one
    /// full interval after start.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled || self.config.interval_seconds == 0 {
            warn!("Session sweeper is disabled");
            return None;
        }

        let period = std::time::Duration::from_secs(self.config.interval_seconds);

        let handle = tokio::spawn(async move {
            info!(
                "Session sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_once().await {
                    error!("Session sweep failed: {}", e);
                }
            }
        });

        Some(handle)
    }
}
