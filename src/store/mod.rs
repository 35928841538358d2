//! # User Store
//!
//! In-memory storage for user records. Nothing is persisted; every fresh
//! store starts from the same seed records.

mod errors;
mod memory;
mod user;

pub use errors::{StoreError, StoreResult};
pub use memory::UserStore;
pub use user::{seed_users, NewUser, User, UserPatch};
