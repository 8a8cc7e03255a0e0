use serde::{Deserialize, Serialize};

/// Format de page du PDF généré
///
/// Les dimensions sont exprimées en points PDF (1/72 de pouce).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// Format US Letter (8,5 × 11 pouces), valeur par défaut
    #[default]
    Letter,

    /// Format ISO A4
    A4,
}

impl PageSize {
    /// Dimensions (largeur, hauteur) en points
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
        }
    }

    /// Interpréter la valeur du formulaire; tout sauf "A4" retombe sur Letter
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("a4") {
            PageSize::A4
        } else {
            PageSize::Letter
        }
    }
}

/// Options de conversion issues du formulaire d'upload
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    /// Format de page du document généré
    pub page_size: PageSize,

    /// Liste de priorité pour le tri des images (mots-clés ordonnés)
    pub priority: Vec<String>,
}
