//! Command handlers for zomb CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod parse;
pub mod scan;
