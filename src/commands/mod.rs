//! CLI command implementations.

pub mod check;
pub mod eda;
pub mod uninstall;
pub mod user;
