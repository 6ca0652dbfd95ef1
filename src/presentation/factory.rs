//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;

use crate::application::{BuildOptions, BuildUseCase, WatchOptions, WatchUseCase};
use crate::config::Config;
use crate::domain::value_objects::BuildMode;
use crate::infrastructure::{CommandTranspiler, LocalFs};

/// Type alias for the concrete BuildUseCase with all dependencies
pub type ConcreteBuildUseCase = BuildUseCase<CommandTranspiler, LocalFs>;

/// Compiler process configured from `[compiler]`, run from the project root
pub fn create_transpiler(config: &Config, root: &Path) -> CommandTranspiler {
    CommandTranspiler::new(config.compiler.command.clone(), config.compiler.args.clone())
        .with_working_dir(root)
}

/// Create a build use case with all dependencies wired up
pub fn create_build_use_case(
    root: &Path,
    mode: BuildMode,
    config: &Config,
) -> ConcreteBuildUseCase {
    let options = BuildOptions::new(root)
        .with_mode(mode)
        .with_excludes(config.discovery.exclude.clone());

    BuildUseCase::new(options, create_transpiler(config, root), LocalFs::new())
}

/// Create a watch use case; the transpiler is passed to `start`
pub fn create_watch_use_case(root: &Path, mode: BuildMode, config: &Config) -> WatchUseCase {
    WatchUseCase::new(WatchOptions::new(root).with_config(config).with_mode(mode))
}
