//! Injectable reactive state.

mod auth;
mod cell;

pub use auth::{AuthState, AuthStore, User};
pub use cell::Store;
