/// File utilities
pub mod files;

/// Download-if-missing support for remote dataset files
pub mod download;

/// Labeled line-oriented text files
pub mod text_file;

/// Utilities for classification tasks
pub mod classes;
