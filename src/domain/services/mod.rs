//! Domain Services
//!
//! Pure logic with no I/O dependencies: path mapping, provenance headers and
//! the managed-region rewrite of side files.

mod artifact;
mod managed_region;

pub use artifact::{output_path, with_provenance_header, GENERATOR_LINE};
pub use managed_region::{
    render_editor_exclude, render_ignore_list, SideFileParseError, EDITOR_EXCLUDE_KEY,
    EDITOR_EXCLUDE_MARKER, IGNORE_LIST_SENTINEL,
};
