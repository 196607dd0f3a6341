//! CLI subcommand implementations.

pub mod check;
pub mod convert;
pub mod util;
