//! Accounts: the store abstraction, its implementations and the use cases.

mod error;
mod memory_store;
mod model;
mod service;
mod store;

pub use error::{AccountError, AccountResult};
pub use memory_store::MemoryAccountStore;
pub use model::{Account, AccountRecord, NewAccountRecord};
pub use service::{AccountService, PASSWORD_MIN_LENGTH, USERNAME_MIN_LENGTH};
pub use store::AccountStore;
