// utils/helpers.rs
use std::path::Path;

/// Nettoyer une chaîne pour un nom de fichier
pub fn sanitize_filename(filename: &str) -> String {
    // Ne garder que le dernier composant du chemin
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || " .-_;()".contains(c) {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim().trim_start_matches('.').to_string();

    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

/// Extension d'un fichier en minuscules
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Nom d'un fichier sans son extension
pub fn file_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
        .to_string()
}

/// Formatter une taille en octets lisible
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = (bytes_f64.log10() / base.log10()).floor() as i32;
    let unit_index = exponent.clamp(0, 4) as usize;

    let size = bytes_f64 / base.powi(unit_index as i32);

    format!("{:.2} {}", size, UNITS[unit_index])
}
