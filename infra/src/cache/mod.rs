//! Cache module for live verification sessions
//!
//! Sessions are process-local and ephemeral. The store is constructed once
//! per process (or per test) and injected into the verification service.

pub mod session_store;

#[cfg(test)]
mod tests;

pub use session_store::InMemorySessionStore;
