// utils/validation.rs
use crate::models::UploadedImage;
use crate::utils::config::Config;
use crate::utils::error::{AppError, Result};
use crate::utils::helpers::{format_file_size, get_file_extension};

/// Extensions d'images acceptées
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Valider un nom de fichier
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty() {
        return Err(AppError::InvalidFilename("filename cannot be empty".to_string()));
    }

    if filename.len() > 255 {
        return Err(AppError::InvalidFilename(
            "filename too long (max 255 characters)".to_string(),
        ));
    }

    // Éviter les chemins relatifs
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(AppError::InvalidFilename(filename.to_string()));
    }

    Ok(())
}

/// Valider l'extension contre la liste blanche
pub fn validate_extension(filename: &str) -> Result<()> {
    let extension = get_file_extension(filename)
        .ok_or_else(|| AppError::UnsupportedFileType(filename.to_string()))?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::UnsupportedFileType(format!(
            "{} (allowed: {})",
            filename,
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    Ok(())
}

/// Vérifier l'accord entre le type MIME déclaré et l'extension
pub fn validate_declared_mime(image: &UploadedImage) -> Result<()> {
    let Some(declared) = image.content_type.as_deref() else {
        return Ok(());
    };

    let declared: mime::Mime = declared.parse().map_err(|_| {
        AppError::UnsupportedFileType(format!("{}: invalid content type", image.filename))
    })?;

    if declared.type_() != mime::IMAGE {
        return Err(AppError::UnsupportedFileType(format!(
            "{}: declared type {} is not an image",
            image.filename, declared
        )));
    }

    // L'extension doit raconter la même histoire que le type déclaré
    let guessed = mime_guess::from_path(&image.filename).first_or_octet_stream();
    if guessed.type_() == mime::IMAGE && guessed.subtype() != declared.subtype() {
        return Err(AppError::UnsupportedFileType(format!(
            "{}: declared type {} does not match extension",
            image.filename, declared
        )));
    }

    Ok(())
}

/// Valider la taille d'un fichier
pub fn validate_file_size(image: &UploadedImage, max_bytes: u64) -> Result<()> {
    if image.data.is_empty() {
        return Err(AppError::EmptyFile(image.filename.clone()));
    }

    if image.size() > max_bytes {
        return Err(AppError::FileTooLarge(format!(
            "{} ({}, max {})",
            image.filename,
            format_file_size(image.size()),
            format_file_size(max_bytes)
        )));
    }

    Ok(())
}

/// Valider un lot complet; le lot est rejeté à la première violation
pub fn validate_batch(images: &[UploadedImage], config: &Config) -> Result<()> {
    if images.is_empty() {
        return Err(AppError::NoImagesUploaded);
    }

    let max_bytes = config.max_file_size_bytes();

    for image in images {
        validate_filename(&image.filename)?;
        validate_extension(&image.filename)?;
        validate_declared_mime(image)?;
        validate_file_size(image, max_bytes)?;
    }

    Ok(())
}
