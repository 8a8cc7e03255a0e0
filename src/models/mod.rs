// Modèle: batch.rs
pub mod batch;
pub use batch::{UploadBatch, UploadedImage};

// Modèle: options.rs
pub mod options;
pub use options::{ConversionOptions, PageSize};
