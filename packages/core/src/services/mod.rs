//! Boundary Services
//!
//! Services sit between request handlers and the tree engine:
//!
//! - `RestructureService` - tree admission, planning, validation and guarded commit
//! - `SessionStore` - per-operator editing sessions with creation-based expiry
//!
//! Handlers never call the engine functions directly, so every entry point
//! applies the same admission and validation rules.

pub mod error;
pub mod restructure_service;
pub mod session_store;

pub use error::RestructureError;
pub use restructure_service::{PlanResponse, RestructureService, ValidateResponse};
pub use session_store::{SessionState, SessionStore, SessionUser};
