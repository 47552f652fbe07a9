//! Packaging orchestration and coordination.
//!
//! This module provides the [`Packager`] orchestrator that sequences runtime
//! minimization and installer creation for one configuration.
//!
//! # Overview
//!
//! A run:
//! 1. Validates the [`PackageConfiguration`](crate::packager::PackageConfiguration)
//! 2. Claims the output directory and creates it when absent
//! 3. Builds a minimized runtime image with jlink (when enabled)
//! 4. Builds the installer with jpackage
//! 5. Returns a [`PackagingResult`] with the full transcript
//!
//! # Module Organization
//!
//! - [`orchestrator`] - [`Packager`] and the stage machine
//! - [`result`] - [`PackagingResult`]
//! - [`tool_detection`] - External tool availability checking
//! - [`transcript`] - Ordered run log mirrored to the caller's sink

mod orchestrator;
mod result;
mod tool_detection;
mod transcript;

pub use orchestrator::Packager;
pub use result::PackagingResult;
pub use tool_detection::{ToolStatus, check_toolchain, is_tool_available};
pub use transcript::LogSink;
