//! Directory listings rendered as sortable, filterable tables.
//!
//! The [`table`] module holds the sorting and filtering logic as pure
//! functions over rows. [`listing`] turns a directory into those rows, and the
//! [`export`] and [`tui`] modules present them.

pub mod config;
pub mod datetime;
pub mod export;
pub mod i18n;
pub mod listing;
pub mod logger;
pub mod table;
pub mod tui;
