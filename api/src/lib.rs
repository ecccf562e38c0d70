//! # TaleForge API
//!
//! HTTP surface of the phone verification step that gates story creation.
//! The binary in `main.rs` wires configuration, the SMS provider and the
//! in-memory session store into [`app::create_app`].

pub mod app;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::verification::AppState;
