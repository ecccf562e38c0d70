//! Verification service module for SMS-based phone verification
//!
//! This module provides the verification session workflow:
//! - Session issuance with a one-time 6-digit code delivered by SMS
//! - Code verification with lazy expiry and one-time consumption
//! - Optional resend cooldown, superseding and a live-session cap
//! - A background sweeper evicting sessions that are never checked again

mod admission;
mod clock;
mod config;
mod service;
mod sweeper;
mod traits;
mod types;


pub use admission::InsertLimits;
pub use clock::{Clock, SystemClock};
pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use sweeper::{SessionSweeper, SweepResult, SweeperConfig};
pub use traits::{SessionStore, SessionStoreError, SmsServiceTrait};
pub use types::SendCodeResult;
