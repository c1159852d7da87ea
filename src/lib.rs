pub mod client;
pub mod conf;
pub mod core;
pub mod explore;
pub mod filter;
pub mod store;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
