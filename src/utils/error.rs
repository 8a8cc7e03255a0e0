// utils/error.rs
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // Erreurs d'upload
    #[error("No images uploaded")]
    NoImagesUploaded,

    #[error("File is empty: {0}")]
    EmptyFile(String),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large: {0}")]
    FileTooLarge(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Malformed upload: {0}")]
    Multipart(String),

    // Erreurs de données
    #[error("Validation error: {0}")]
    Validation(String),

    // Erreurs de conversion
    #[error("Image cannot be decoded: {0}")]
    ImageDecode(String),

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    // Erreurs système
    #[error("IO error: {0}")]
    Io(String),

    #[error("Internal server error")]
    Internal,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            // 400 - Bad Request
            AppError::NoImagesUploaded
            | AppError::EmptyFile(_)
            | AppError::InvalidFilename(_)
            | AppError::Multipart(_)
            | AppError::Validation(_) => {
                HttpResponse::BadRequest().json(json!({
                    "error": self.to_string(),
                    "code": "BAD_REQUEST"
                }))
            }

            // 413 - Payload Too Large
            AppError::FileTooLarge(_)
            | AppError::PayloadTooLarge(_) => {
                HttpResponse::PayloadTooLarge().json(json!({
                    "error": self.to_string(),
                    "code": "PAYLOAD_TOO_LARGE"
                }))
            }

            // 415 - Unsupported Media Type
            AppError::UnsupportedFileType(_) => {
                HttpResponse::UnsupportedMediaType().json(json!({
                    "error": self.to_string(),
                    "code": "UNSUPPORTED_MEDIA_TYPE"
                }))
            }

            // 422 - Unprocessable Entity
            AppError::ImageDecode(_) => {
                HttpResponse::UnprocessableEntity().json(json!({
                    "error": self.to_string(),
                    "code": "UNPROCESSABLE_ENTITY"
                }))
            }

            // 500 - Internal Server Error
            _ => {
                tracing::error!("Internal server error: {}", self);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error",
                    "code": "INTERNAL_ERROR"
                }))
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::ImageDecode(err.to_string())
    }
}

impl From<lopdf::Error> for AppError {
    fn from(err: lopdf::Error) -> Self {
        AppError::PdfGeneration(err.to_string())
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AppError::Multipart(err.to_string())
    }
}

// Type de résultat standard
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let resp = AppError::NoImagesUploaded.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::UnsupportedFileType("exe".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let resp = AppError::FileTooLarge("a.png".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let resp = AppError::ImageDecode("corrupt".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = AppError::Internal.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
