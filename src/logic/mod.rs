//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - errors: Best-effort classification of network failures into user guidance
//! - file_type: File kind detection for filtering, previews and uploads
//! - path: Remote path algebra (join, parent, leaf)
//! - sorting: Natural name comparison and listing comparators
//! - url: Base URL validation and media URL normalization
//! - view: Derivation of the visible listing from raw entries

pub mod errors;
pub mod file_type;
pub mod path;
pub mod sorting;
pub mod url;
pub mod view;
