//! Directory listings.
//!
//! This module reads a single directory below a served root and produces the
//! entries a listing page shows: an optional parent-directory row followed by
//! the visible children in name order, each with its icon, link, size and
//! modification date.

mod builder;
mod entry;
mod icons;

pub use builder::{build_listing, resolve_dir, ListingOptions};
pub use entry::{format_size, EntryKind, Listing, ListingEntry};
pub use icons::{icon_for_path, FOLDER_ICON, PARENT_ICON};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a listing.
#[derive(Error, Debug)]
pub enum ListingError {
    /// The requested directory resolves outside the served root
    #[error("path escapes the listing root: {path}")]
    OutsideRoot {
        /// The requested path, relative to the root
        path: PathBuf,
    },

    /// The specified path does not exist
    #[error("path not found: {path}")]
    NotFound {
        /// The path that was not found
        path: PathBuf,
    },

    /// The specified path is not a directory
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that was expected to be a directory
        path: PathBuf,
    },

    /// An I/O error occurred while reading a path
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
