//! Domain Layer
//!
//! Pure build rules without I/O dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (OutputExt, BuildMode, ExcludePatterns)
//! - `services/` - Pure services (artifact mapping, side-file region rendering)
//! - `ports/` - Interface definitions for infrastructure (FileSystem, Transpiler)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or spawns processes
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod ports;
pub mod services;
pub mod value_objects;
