//! JDK tool invocations.
//!
//! - [`java`] - modules available in the active runtime
//! - [`jdeps`] - module dependencies of an archive
//! - [`jlink`] - minimized runtime image
//! - [`jpackage`] - native installer

pub mod java;
pub mod jdeps;
pub mod jlink;
pub mod jpackage;
