// core/conversion/mod.rs
pub mod imaging;
pub mod ordering;
pub mod pdf;
pub mod pipeline;

// Ré-exports pour faciliter l'import
pub use imaging::{ImagePreparer, PreparedImage};
pub use pdf::PdfAssembler;
pub use pipeline::ConversionPipeline;
