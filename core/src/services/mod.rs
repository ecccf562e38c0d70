//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    Clock, InsertLimits, SendCodeResult, SessionStore, SessionStoreError, SessionSweeper,
    SmsServiceTrait, SweepResult, SweeperConfig, SystemClock, VerificationService,
    VerificationServiceConfig,
};
