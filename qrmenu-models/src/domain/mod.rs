pub mod auth;
pub mod client;
pub mod common;
pub mod page;
pub mod prelude;
