//! Application layer containing the logged-in workflows.
//!
//! This module defines the `Session` which acts as the primary entry point
//! for everything a user can do once authenticated. It talks to the backend
//! exclusively through the port traits in `domain::ports`.

pub mod session;
