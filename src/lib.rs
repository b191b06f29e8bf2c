//! ModeSync - Custom Mode Profile Installation
//!
//! A tool for installing role-based agent mode profiles into a project.
//! Mode documents are aggregated into a single `.roomodes` file, bundled
//! rule files are copied to the project root, and a default MCP connection
//! config is provisioned without clobbering an existing one.

pub mod aggregate;
pub mod gitignore;
pub mod installer;
pub mod loader;
pub mod mcp;
pub mod report;
pub mod rules;

pub use installer::{InstallOptions, InstallReport, Installer};
pub use report::{ConsoleReporter, Reporter};
