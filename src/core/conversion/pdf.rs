//! # Assemblage du PDF
//!
//! Construit le document final: une page par image, dans l'ordre reçu.
//! Chaque page porte un bandeau d'en-tête (rectangle noir, titre jaune en
//! Helvetica-Bold) et l'image centrée en dessous, embarquée telle quelle en
//! JPEG (filtre DCTDecode).
//!
//! En cas d'échec, aucune donnée n'est émise: le lot entier échoue.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::core::conversion::imaging::{image_position, PreparedImage};
use crate::models::PageSize;
use crate::utils::error::Result;

/// Abscisse du bandeau d'en-tête (points)
const HEADING_RECT_X: f32 = 40.0;

/// Hauteur du bandeau d'en-tête (points)
const HEADING_RECT_HEIGHT: f32 = 35.0;

/// Distance entre le haut de page et le bas du bandeau (points)
const HEADING_RECT_TOP_OFFSET: f32 = 65.0;

/// Abscisse du titre (points)
const HEADING_TEXT_X: f32 = 50.0;

/// Distance entre le haut de page et la ligne de base du titre (points)
const HEADING_TEXT_TOP_OFFSET: f32 = 50.0;

/// Corps du titre
const HEADING_FONT_SIZE: f32 = 16.0;

/// Assemble les images préparées en un document PDF
#[derive(Debug, Clone)]
pub struct PdfAssembler {
    page_size: PageSize,
}

impl PdfAssembler {
    pub fn new(page_size: PageSize) -> Self {
        Self { page_size }
    }

    /// Construire le document complet et le sérialiser en mémoire
    pub fn assemble(&self, images: &[PreparedImage]) -> Result<Vec<u8>> {
        let (page_width, page_height) = self.page_size.dimensions();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        // Police partagée par toutes les pages
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });

        let mut kids: Vec<Object> = Vec::with_capacity(images.len());

        for image in images {
            let xobject_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => image.pixel_width as i64,
                    "Height" => image.pixel_height as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                    "Filter" => "DCTDecode",
                },
                image.jpeg_data.clone(),
            ));

            let content = page_content(image, self.page_size);
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

            let resources_id = doc.add_object(dictionary! {
                "Font" => dictionary! {
                    "F1" => font_id,
                },
                "XObject" => dictionary! {
                    "Im1" => xobject_id,
                },
            });

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0f32.into(),
                    0f32.into(),
                    page_width.into(),
                    page_height.into(),
                ],
                "Contents" => content_id,
                "Resources" => resources_id,
            });

            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut out = Vec::new();
        doc.save_to(&mut out)?;

        Ok(out)
    }
}

/// Flux de contenu d'une page: bandeau, titre, image
fn page_content(image: &PreparedImage, page_size: PageSize) -> Content {
    let (page_width, page_height) = page_size.dimensions();
    let (image_x, image_y) = image_position(image, page_size);

    let rect_y = page_height - HEADING_RECT_TOP_OFFSET;
    let rect_width = page_width - 2.0 * HEADING_RECT_X;
    let text_y = page_height - HEADING_TEXT_TOP_OFFSET;

    Content {
        operations: vec![
            // Bandeau noir
            Operation::new("q", vec![]),
            Operation::new("rg", vec![0f32.into(), 0f32.into(), 0f32.into()]),
            Operation::new(
                "re",
                vec![
                    HEADING_RECT_X.into(),
                    rect_y.into(),
                    rect_width.into(),
                    HEADING_RECT_HEIGHT.into(),
                ],
            ),
            Operation::new("f", vec![]),
            // Titre jaune
            Operation::new("BT", vec![]),
            Operation::new("rg", vec![1f32.into(), 1f32.into(), 0f32.into()]),
            Operation::new("Tf", vec!["F1".into(), HEADING_FONT_SIZE.into()]),
            Operation::new("Td", vec![HEADING_TEXT_X.into(), text_y.into()]),
            Operation::new(
                "Tj",
                vec![Object::string_literal(image.display_name.clone())],
            ),
            Operation::new("ET", vec![]),
            Operation::new("Q", vec![]),
            // Image centrée sous le bandeau
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    image.display_width.into(),
                    0f32.into(),
                    0f32.into(),
                    image.display_height.into(),
                    image_x.into(),
                    image_y.into(),
                ],
            ),
            Operation::new("Do", vec!["Im1".into()]),
            Operation::new("Q", vec![]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared(name: &str, width: u32, height: u32) -> PreparedImage {
        // JPEG minimal factice: seul le conteneur PDF est vérifié ici
        PreparedImage {
            display_name: name.to_string(),
            jpeg_data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            pixel_width: width,
            pixel_height: height,
            display_width: width as f32,
            display_height: height as f32,
        }
    }

    fn page_headings(pdf: &[u8]) -> Vec<String> {
        let mut doc = Document::load_mem(pdf).unwrap();
        doc.decompress();

        let mut headings = Vec::new();
        for (_, page_id) in doc.get_pages() {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            for op in &content.operations {
                if op.operator == "Tj" {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        headings.push(String::from_utf8_lossy(bytes).into_owned());
                    }
                }
            }
        }
        headings
    }

    #[test]
    fn test_assemble_one_page_per_image() {
        let assembler = PdfAssembler::new(PageSize::Letter);
        let pdf = assembler
            .assemble(&[prepared("un", 10, 10), prepared("deux", 20, 10), prepared("trois", 5, 5)])
            .unwrap();

        let doc = Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_assemble_preserves_order() {
        let assembler = PdfAssembler::new(PageSize::Letter);
        let pdf = assembler
            .assemble(&[prepared("premier", 10, 10), prepared("second", 10, 10)])
            .unwrap();

        assert_eq!(page_headings(&pdf), vec!["premier", "second"]);
    }

    #[test]
    fn test_assemble_a4_media_box() {
        let assembler = PdfAssembler::new(PageSize::A4);
        let pdf = assembler.assemble(&[prepared("page", 10, 10)]).unwrap();

        let doc = Document::load_mem(&pdf).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap().clone();

        let width = media_box[2].as_float().unwrap();
        let height = media_box[3].as_float().unwrap();
        assert!((width - 595.28).abs() < 0.01);
        assert!((height - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_assemble_empty_batch_yields_no_pages() {
        let assembler = PdfAssembler::new(PageSize::Letter);
        let pdf = assembler.assemble(&[]).unwrap();

        let doc = Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 0);
    }
}
