//! Business logic services
//!
//! Services encapsulate business logic and coordinate between the
//! ownership chain and the stores. Handlers stay thin.

pub mod auth;
pub mod bank_account;
pub mod budget;
pub mod user_account;

pub use auth::AuthService;
pub use bank_account::BankAccountService;
pub use budget::BudgetService;
pub use user_account::UserAccountService;
