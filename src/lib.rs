//! Civetman - incremental build and watch tool for Civet projects
//!
//! Civetman compiles every `.civet` source in a project to TypeScript, either
//! once (`civetman build`) or continuously (`civetman dev`), and keeps
//! `.gitignore` and the VS Code `files.exclude` setting listing exactly the
//! generated files.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{BuildEvent, BuildUseCase, WatchEvent, WatchUseCase};
pub use config::Config;
pub use domain::value_objects::{BuildMode, OutputExt};
pub use error::{CivetmanError, CivetmanResult};
