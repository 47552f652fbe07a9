//! Command execution functions, one module per subcommand.

pub mod analyze;
pub mod package;
pub mod preset;
pub mod tools;
