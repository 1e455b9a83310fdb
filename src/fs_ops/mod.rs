//! Filesystem operations used by the archive engine.

mod copy;
mod helpers;
mod metadata;

pub use copy::{copy_entry, copy_file_with_metadata, copy_tree, move_entry};
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use metadata::{preserve_metadata, touch_now};
