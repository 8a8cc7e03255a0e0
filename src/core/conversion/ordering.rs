//! # Ordonnancement du lot
//!
//! Détermine l'ordre final des pages avant l'assemblage du PDF:
//! 1. Les fichiers dont le nom contient `;` forment un premier groupe,
//!    les autres un second
//! 2. Chaque groupe est trié selon la liste de priorité (mots-clés ordonnés)
//! 3. Les fichiers sans correspondance gardent leur ordre relatif de
//!    soumission, après les fichiers priorisés
//!
//! Sans liste de priorité et sans `;`, l'ordre de soumission est conservé
//! tel quel.

use crate::models::UploadedImage;

/// Parser la liste de priorité depuis la chaîne du formulaire
/// (mots-clés séparés par des virgules)
pub fn parse_priority_list(priority_str: &str) -> Vec<String> {
    priority_str
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Séparer les fichiers en deux groupes selon la présence de `;` dans le nom
pub fn split_by_semicolon(images: Vec<UploadedImage>) -> (Vec<UploadedImage>, Vec<UploadedImage>) {
    images
        .into_iter()
        .partition(|image| image.filename.contains(';'))
}

/// Index de priorité d'un fichier: position du premier mot-clé qui est égal
/// au nom ou contenu dans le nom; sinon un index élevé qui préserve l'ordre
/// relatif de soumission
fn priority_index(filename: &str, priority_list: &[String], position: usize) -> usize {
    for (idx, item) in priority_list.iter().enumerate() {
        if item == filename || filename.contains(item.as_str()) {
            return idx;
        }
    }

    priority_list.len() + position
}

/// Trier des fichiers selon la liste de priorité
pub fn sort_by_priority(
    images: Vec<UploadedImage>,
    priority_list: &[String],
) -> Vec<UploadedImage> {
    let mut keyed: Vec<(usize, UploadedImage)> = images
        .into_iter()
        .enumerate()
        .map(|(position, image)| {
            (
                priority_index(&image.filename, priority_list, position),
                image,
            )
        })
        .collect();

    keyed.sort_by_key(|(key, _)| *key);

    keyed.into_iter().map(|(_, image)| image).collect()
}

/// Ordre final du lot: groupe `;` trié, puis le reste trié
pub fn order_batch(images: Vec<UploadedImage>, priority_list: &[String]) -> Vec<UploadedImage> {
    let (group_semicolon, group_rest) = split_by_semicolon(images);

    let mut ordered = sort_by_priority(group_semicolon, priority_list);
    ordered.extend(sort_by_priority(group_rest, priority_list));

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(filename: &str) -> UploadedImage {
        UploadedImage {
            filename: filename.to_string(),
            content_type: None,
            data: vec![0],
        }
    }

    fn names(images: &[UploadedImage]) -> Vec<&str> {
        images.iter().map(|i| i.filename.as_str()).collect()
    }

    #[test]
    fn test_parse_priority_list() {
        assert_eq!(parse_priority_list(""), Vec::<String>::new());
        assert_eq!(parse_priority_list("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_priority_list(" , ,x,"), vec!["x"]);
    }

    #[test]
    fn test_split_by_semicolon() {
        let (with, without) = split_by_semicolon(vec![
            image("a.png"),
            image("intro;1.png"),
            image("b.jpg"),
        ]);
        assert_eq!(names(&with), vec!["intro;1.png"]);
        assert_eq!(names(&without), vec!["a.png", "b.jpg"]);
    }

    #[test]
    fn test_sort_by_priority_keyword_order() {
        let priority = parse_priority_list("sommaire,annexe");
        let sorted = sort_by_priority(
            vec![
                image("photo.png"),
                image("annexe_b.png"),
                image("sommaire.png"),
            ],
            &priority,
        );
        assert_eq!(names(&sorted), vec!["sommaire.png", "annexe_b.png", "photo.png"]);
    }

    #[test]
    fn test_sort_preserves_relative_order_of_unmatched() {
        let priority = parse_priority_list("z");
        let sorted = sort_by_priority(
            vec![image("c.png"), image("a.png"), image("b.png")],
            &priority,
        );
        // Aucune correspondance: ordre de soumission conservé
        assert_eq!(names(&sorted), vec!["c.png", "a.png", "b.png"]);
    }

    #[test]
    fn test_sort_without_priority_is_identity() {
        let sorted = sort_by_priority(vec![image("b.png"), image("a.png")], &[]);
        assert_eq!(names(&sorted), vec!["b.png", "a.png"]);
    }

    #[test]
    fn test_order_batch_semicolon_group_first() {
        let ordered = order_batch(
            vec![image("z.png"), image("fin;2.png"), image("a.jpg")],
            &[],
        );
        assert_eq!(names(&ordered), vec!["fin;2.png", "z.png", "a.jpg"]);
    }

    #[test]
    fn test_order_batch_priority_applies_to_both_groups() {
        let priority = parse_priority_list("2,1");
        let ordered = order_batch(
            vec![
                image("ch;1.png"),
                image("ch;2.png"),
                image("page1.png"),
                image("page2.png"),
            ],
            &priority,
        );
        assert_eq!(
            names(&ordered),
            vec!["ch;2.png", "ch;1.png", "page2.png", "page1.png"]
        );
    }
}
