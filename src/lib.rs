// src/lib.rs
// Modules principaux
pub mod api;
pub mod core;
pub mod models;
pub mod utils;

// Ré-exports pour faciliter l'utilisation
pub use crate::core::conversion::ConversionPipeline;
pub use models::{ConversionOptions, PageSize, UploadBatch, UploadedImage};
pub use utils::config::Config;
pub use utils::error::{AppError, Result};

// Version de l'application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "Image PDF Platform";
