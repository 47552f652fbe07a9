//! Configuration structures for packaging operations.
//!
//! This module provides the packaging configuration record, its format and
//! platform tags, a builder, and the toolchain record naming the JDK tools.

mod builder;
mod core;
mod format;
mod toolchain;

pub use builder::ConfigurationBuilder;
pub use self::core::PackageConfiguration;
pub(crate) use self::core::is_blank;
pub use format::{OutputFormat, TargetPlatform};
pub use toolchain::Toolchain;
