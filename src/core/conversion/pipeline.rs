//! # Pipeline de conversion
//!
//! Ce fichier contient l'orchestrateur qui transforme un lot d'images
//! validé en un document PDF unique. Il coordonne les étapes:
//! 1. Ordonnancement du lot (groupe `;`, liste de priorité)
//! 2. Préparation de chaque image (décodage, redimensionnement, JPEG)
//! 3. Assemblage du document final
//!
//! ## Gestion des erreurs
//! La première image qui ne peut pas être décodée fait échouer le lot
//! entier: aucun PDF partiel n'est jamais renvoyé à l'appelant.
//!
//! ## Ressources
//! Le traitement est synchrone et borné en mémoire par les limites
//! configurées (taille d'upload, dimension maximale des images).

use std::time::Instant;

use tracing::{info, instrument};

use crate::core::conversion::imaging::ImagePreparer;
use crate::core::conversion::ordering::order_batch;
use crate::core::conversion::pdf::PdfAssembler;
use crate::models::UploadBatch;
use crate::utils::config::Config;
use crate::utils::error::Result;
use crate::utils::helpers::format_file_size;

/// Pipeline de conversion complet
#[derive(Debug, Clone)]
pub struct ConversionPipeline {
    preparer: ImagePreparer,
}

impl ConversionPipeline {
    /// Crée une nouvelle instance du pipeline
    pub fn new(config: &Config) -> Self {
        Self {
            preparer: ImagePreparer::new(config.max_image_dimension, config.jpeg_quality),
        }
    }

    /// Exécute la conversion complète d'un lot et renvoie les octets du PDF
    #[instrument(skip_all, fields(batch_id = %batch.id, images = batch.len()))]
    pub fn convert(&self, batch: &UploadBatch) -> Result<Vec<u8>> {
        let started = Instant::now();
        info!("🚀 Démarrage de la conversion du lot {}", batch.id);

        let ordered = order_batch(batch.images.clone(), &batch.options.priority);

        let mut prepared = Vec::with_capacity(ordered.len());
        for image in &ordered {
            let ready = self.preparer.prepare(image, batch.options.page_size)?;
            info!(
                "📄 Image préparée: {} ({}x{} px)",
                image.filename, ready.pixel_width, ready.pixel_height
            );
            prepared.push(ready);
        }

        let assembler = PdfAssembler::new(batch.options.page_size);
        let pdf = assembler.assemble(&prepared)?;

        info!(
            "✅ PDF généré: {} page(s), {} en {:?}",
            prepared.len(),
            format_file_size(pdf.len() as u64),
            started.elapsed()
        );

        Ok(pdf)
    }
}
