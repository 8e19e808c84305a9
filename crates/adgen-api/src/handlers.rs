//! Request handlers.

pub mod admin;
pub mod health;
pub mod parse;

pub use admin::*;
pub use health::*;
pub use parse::*;
