//! Build Module
//!
//! One-shot batch build of every discovered source.
//!
//! ## Structure
//!
//! - `executor` - Single source → output build (`BuildExecutor`)
//! - `event` - Events reported while building (`BuildEvent`)
//! - `use_case` - Batch orchestration (`BuildUseCase`, `BuildOptions`, `BuildResult`)
//!
//! ## Usage
//!
//! ```ignore
//! use civetman::application::build::{BuildOptions, BuildUseCase};
//!
//! let use_case = BuildUseCase::new(BuildOptions::new(root), transpiler, LocalFs::new());
//! let result = use_case.execute(|event| println!("{}", event.to_json()))?;
//! ```

mod event;
mod executor;
mod use_case;

pub use event::{BuildEvent, BuildTrigger};
pub use executor::BuildExecutor;
pub use use_case::{BuildOptions, BuildResult, BuildUseCase};
