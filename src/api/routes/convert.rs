//! # Route de génération PDF
//!
//! Ce module gère l'upload des images et le renvoi du PDF généré.
//!
//! ## Workflow
//! 1. Lecture du corps multipart (fichiers `images`, champs `priority`
//!    et `page_size`), avec plafond global appliqué au fil de la lecture
//! 2. Validation du lot (extensions, types MIME, tailles)
//! 3. Conversion synchrone dans la requête
//! 4. Renvoi du PDF en pièce jointe, ou d'une erreur JSON descriptive
//!
//! ## Limites
//! - Taille totale de la requête: configurable (500 MB par défaut)
//! - Taille par fichier: configurable (50 MB par défaut)
//! - Formats supportés: PNG, JPEG

use actix_multipart::{Field, Multipart};
use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::{post, web, HttpResponse};
use futures_util::TryStreamExt;
use tracing::info;

use crate::core::conversion::ordering::parse_priority_list;
use crate::core::conversion::ConversionPipeline;
use crate::models::{ConversionOptions, PageSize, UploadBatch, UploadedImage};
use crate::utils::config::Config;
use crate::utils::error::{AppError, Result};
use crate::utils::helpers::{format_file_size, sanitize_filename};
use crate::utils::validation::validate_batch;

/// Nom du fichier PDF renvoyé au client
const OUTPUT_FILENAME: &str = "generated.pdf";

/// Taille maximale d'un champ texte du formulaire
const TEXT_FIELD_LIMIT: usize = 64 * 1024;

#[post("/generate-pdf")]
pub async fn generate_pdf(
    payload: Multipart,
    config: web::Data<Config>,
    pipeline: web::Data<ConversionPipeline>,
) -> Result<HttpResponse> {
    let (images, options) = read_upload(payload, &config).await?;

    let batch = UploadBatch::new(images, options);
    info!(
        "📁 Lot reçu: {} image(s), {}",
        batch.len(),
        format_file_size(batch.total_size())
    );

    validate_batch(&batch.images, &config)?;

    let pdf = pipeline.convert(&batch)?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .append_header((
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", OUTPUT_FILENAME),
        ))
        .body(pdf))
}

/// Lit le corps multipart: fichiers `images` + champs `priority` et `page_size`
async fn read_upload(
    mut payload: Multipart,
    config: &Config,
) -> Result<(Vec<UploadedImage>, ConversionOptions)> {
    let mut images = Vec::new();
    let mut priority_str = String::new();
    let mut page_size_str = String::new();

    let mut total_bytes: u64 = 0;
    let max_total = config.max_upload_size_bytes();

    while let Some(mut field) = payload.try_next().await? {
        let (field_name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(str::to_string),
                cd.get_filename().map(str::to_string),
            ),
            None => (None, None),
        };

        match (field_name.as_deref(), filename) {
            (Some("images"), Some(original_name)) => {
                // Une sélection vide arrive comme fichier au nom vide
                if original_name.is_empty() {
                    continue;
                }

                let content_type = field.content_type().map(|m| m.to_string());

                let mut data = Vec::new();
                while let Some(chunk) = field.try_next().await? {
                    total_bytes += chunk.len() as u64;
                    if total_bytes > max_total {
                        return Err(AppError::PayloadTooLarge(format!(
                            "upload exceeds {} MB",
                            config.max_upload_size_mb
                        )));
                    }
                    data.extend_from_slice(&chunk);
                }

                images.push(UploadedImage {
                    filename: sanitize_filename(&original_name),
                    content_type,
                    data,
                });
            }
            (Some("priority"), _) => priority_str = read_text_field(&mut field).await?,
            (Some("page_size"), _) => page_size_str = read_text_field(&mut field).await?,
            _ => {
                // Champ inconnu: consommer et ignorer
                while field.try_next().await?.is_some() {}
            }
        }
    }

    if images.is_empty() {
        return Err(AppError::NoImagesUploaded);
    }

    let options = ConversionOptions {
        page_size: PageSize::parse(&page_size_str),
        priority: parse_priority_list(&priority_str),
    };

    Ok((images, options))
}

/// Lit un champ texte du formulaire en UTF-8
async fn read_text_field(field: &mut Field) -> Result<String> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if data.len() + chunk.len() > TEXT_FIELD_LIMIT {
            return Err(AppError::Multipart("form field too large".to_string()));
        }
        data.extend_from_slice(&chunk);
    }

    String::from_utf8(data).map_err(|_| AppError::Multipart("form field is not valid UTF-8".to_string()))
}
