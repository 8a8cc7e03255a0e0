// utils/mod.rs
pub mod config;
pub mod error;
pub mod helpers;
pub mod validation;

// Ré-exports pour faciliter l'import
pub use config::Config;
pub use error::{AppError, Result};
pub use helpers::{file_stem, format_file_size, get_file_extension, sanitize_filename};
pub use validation::{
    validate_batch, validate_declared_mime, validate_extension, validate_file_size,
    validate_filename, ALLOWED_EXTENSIONS,
};
