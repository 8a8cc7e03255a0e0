use uuid::Uuid;

use crate::models::options::ConversionOptions;
use crate::utils::helpers::file_stem;

/// Une image envoyée dans une requête d'upload
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Nom de fichier nettoyé
    pub filename: String,

    /// Type MIME déclaré par le client (optionnel)
    pub content_type: Option<String>,

    /// Contenu brut du fichier
    pub data: Vec<u8>,
}

impl UploadedImage {
    /// Taille du fichier en octets
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Titre affiché en en-tête de page: nom sans extension,
    /// underscores remplacés par des espaces
    pub fn display_name(&self) -> String {
        file_stem(&self.filename).replace('_', " ")
    }
}

/// Un lot d'images soumis dans une seule requête
///
/// L'ordre de soumission est significatif: il détermine l'ordre des pages
/// du PDF généré (avant application éventuelle de la liste de priorité).
/// Le lot n'existe que le temps de la requête, rien n'est persisté.
#[derive(Debug, Clone)]
pub struct UploadBatch {
    /// Identifiant du lot (traçabilité des logs)
    pub id: Uuid,

    /// Images dans l'ordre de soumission
    pub images: Vec<UploadedImage>,

    /// Options du formulaire
    pub options: ConversionOptions,
}

impl UploadBatch {
    /// Créer un lot à partir des fichiers et options du formulaire
    pub fn new(images: Vec<UploadedImage>, options: ConversionOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            images,
            options,
        }
    }

    /// Nombre d'images du lot
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Vrai si le lot ne contient aucune image
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Taille cumulée du lot en octets
    pub fn total_size(&self) -> u64 {
        self.images.iter().map(|i| i.size()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(filename: &str, len: usize) -> UploadedImage {
        UploadedImage {
            filename: filename.to_string(),
            content_type: None,
            data: vec![0; len],
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(image("photo_de_groupe.png", 1).display_name(), "photo de groupe");
        assert_eq!(image("rapport.jpg", 1).display_name(), "rapport");
    }

    #[test]
    fn test_batch_totals() {
        let batch = UploadBatch::new(
            vec![image("a.png", 100), image("b.jpg", 50)],
            ConversionOptions::default(),
        );
        assert_eq!(batch.len(), 2);
        assert!(!batch.is_empty());
        assert_eq!(batch.total_size(), 150);
    }
}
