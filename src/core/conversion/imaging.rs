//! # Préparation des images
//!
//! Chaque image du lot est préparée avant l'assemblage du PDF:
//! 1. Décodage depuis la mémoire (PNG, JPEG)
//! 2. Aplatissement de la transparence sur fond blanc
//! 3. Calcul de la taille d'affichage sur la page (jamais agrandie)
//! 4. Redimensionnement borné pour maîtriser la mémoire
//! 5. Ré-encodage JPEG
//!
//! Un échec de décodage fait échouer le lot entier: aucun PDF partiel
//! n'est produit.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

use crate::models::{PageSize, UploadedImage};
use crate::utils::error::{AppError, Result};

/// Marge latérale de part et d'autre de l'image (points)
const SIDE_MARGIN: f32 = 50.0;

/// Hauteur du bloc supérieur occupé par l'en-tête (points)
const HEADING_BLOCK_HEIGHT: f32 = 100.0;

/// Hauteur totale réservée hors image: bloc d'en-tête + marge basse (points)
const RESERVED_HEIGHT: f32 = 150.0;

/// Densité de pixels par rapport à la taille affichée (netteté)
const PIXEL_DENSITY: f32 = 2.0;

/// Image préparée pour l'assemblage PDF
#[derive(Debug, Clone)]
pub struct PreparedImage {
    /// Titre affiché en en-tête de page
    pub display_name: String,

    /// Données JPEG prêtes à être embarquées
    pub jpeg_data: Vec<u8>,

    /// Dimensions du JPEG en pixels
    pub pixel_width: u32,
    pub pixel_height: u32,

    /// Dimensions d'affichage sur la page en points
    pub display_width: f32,
    pub display_height: f32,
}

/// Prépare les images une à une selon les limites configurées
#[derive(Debug, Clone)]
pub struct ImagePreparer {
    max_dimension: u32,
    jpeg_quality: u8,
}

impl ImagePreparer {
    pub fn new(max_dimension: u32, jpeg_quality: u8) -> Self {
        Self {
            max_dimension,
            jpeg_quality,
        }
    }

    /// Décoder, aplatir, redimensionner et ré-encoder une image
    pub fn prepare(&self, image: &UploadedImage, page_size: PageSize) -> Result<PreparedImage> {
        let decoded = image::load_from_memory(&image.data)
            .map_err(|e| AppError::ImageDecode(format!("{}: {}", image.filename, e)))?;

        let rgb = flatten_onto_white(decoded);
        let (width, height) = rgb.dimensions();

        let (display_width, display_height) = display_dimensions(width, height, page_size);
        let (target_width, target_height) =
            bounded_target(display_width, display_height, self.max_dimension);

        // Réduire seulement: jamais d'agrandissement
        let rgb = if width > target_width || height > target_height {
            image::imageops::resize(&rgb, target_width, target_height, FilterType::Lanczos3)
        } else {
            rgb
        };

        let (pixel_width, pixel_height) = rgb.dimensions();

        let mut jpeg_data = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg_data, self.jpeg_quality);
        encoder
            .encode_image(&rgb)
            .map_err(|e| AppError::ImageDecode(format!("{}: {}", image.filename, e)))?;

        Ok(PreparedImage {
            display_name: image.display_name(),
            jpeg_data,
            pixel_width,
            pixel_height,
            display_width,
            display_height,
        })
    }
}

/// Taille d'affichage sur la page: ajustée à la zone disponible en
/// conservant le ratio, sans jamais agrandir (1 pixel = 1 point à l'échelle 1)
fn display_dimensions(width: u32, height: u32, page_size: PageSize) -> (f32, f32) {
    let (page_width, page_height) = page_size.dimensions();
    let available_width = page_width - 2.0 * SIDE_MARGIN;
    let available_height = page_height - RESERVED_HEIGHT;

    let width_ratio = available_width / width as f32;
    let height_ratio = available_height / height as f32;
    let scale = width_ratio.min(height_ratio).min(1.0);

    (width as f32 * scale, height as f32 * scale)
}

/// Dimensions cibles en pixels: densité double de la taille affichée,
/// bornée par la dimension maximale configurée
fn bounded_target(display_width: f32, display_height: f32, max_dimension: u32) -> (u32, u32) {
    let mut target_width = (display_width * PIXEL_DENSITY).round();
    let mut target_height = (display_height * PIXEL_DENSITY).round();

    let largest = target_width.max(target_height);
    let max = max_dimension as f32;
    if largest > max {
        let ratio = max / largest;
        target_width *= ratio;
        target_height *= ratio;
    }

    (
        (target_width.round() as u32).max(1),
        (target_height.round() as u32).max(1),
    )
}

/// Position de l'image sur la page: centrée horizontalement,
/// sous le bloc d'en-tête
pub fn image_position(prepared: &PreparedImage, page_size: PageSize) -> (f32, f32) {
    let (page_width, page_height) = page_size.dimensions();
    let x = (page_width - prepared.display_width) / 2.0;
    let y = page_height - HEADING_BLOCK_HEIGHT - prepared.display_height;
    (x, y)
}

/// Aplatir la transparence sur un fond blanc
fn flatten_onto_white(decoded: DynamicImage) -> RgbImage {
    match decoded {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => {
            let rgba = other.to_rgba8();
            let (width, height) = rgba.dimensions();
            let mut out = RgbImage::new(width, height);
            for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
                let alpha = src[3] as u32;
                for channel in 0..3 {
                    dst[channel] =
                        (((src[channel] as u32) * alpha + 255 * (255 - alpha)) / 255) as u8;
                }
            }
            out
        }
    }
}
