//! Moneybags Shared Library
//!
//! Domain models, API request/response types and input validation shared
//! by the backend and its clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{BankAccount, Budget, UserAccount};
pub use types::*;
