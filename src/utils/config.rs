// utils/config.rs
use crate::utils::error::{AppError, Result};
use dotenv::dotenv;
use serde::Deserialize;
use std::env;
use tracing::warn;

/// Clé de session par défaut (développement uniquement)
const DEV_SECRET_KEY: &str = "dev-secret-key-change-in-production";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Environnement et serveur
    pub run_mode: String,
    pub server_host: String,
    pub server_port: u16,
    pub workers: usize,
    pub log_level: String,
    pub log_format: String,

    // Sécurité
    pub secret_key: String,

    // Limites d'upload
    pub max_upload_size_mb: u64,
    pub max_file_size_mb: u64,

    // Conversion
    pub max_image_dimension: u32,
    pub jpeg_quality: u8,
}

impl Config {
    /// Charger la configuration depuis les variables d'environnement
    pub fn from_env() -> Result<Self> {
        // Charger le fichier .env si présent
        let _ = dotenv().ok();

        let config = Config {
            // Environnement et serveur
            run_mode: env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()),
            server_host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            // PORT est fourni par la plateforme d'hébergement
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| AppError::Validation("PORT must be a number".to_string()))?,
            workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .map_err(|_| AppError::Validation("WORKERS must be a number".to_string()))?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),

            // Sécurité
            secret_key: env::var("SECRET_KEY").unwrap_or_else(|_| DEV_SECRET_KEY.to_string()),

            // Limites d'upload
            max_upload_size_mb: env::var("MAX_UPLOAD_SIZE_MB")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .map_err(|_| AppError::Validation("MAX_UPLOAD_SIZE_MB must be a number".to_string()))?,
            max_file_size_mb: env::var("MAX_FILE_SIZE_MB")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .map_err(|_| AppError::Validation("MAX_FILE_SIZE_MB must be a number".to_string()))?,

            // Conversion
            max_image_dimension: env::var("MAX_IMAGE_DIMENSION")
                .unwrap_or_else(|_| "2048".to_string())
                .parse()
                .map_err(|_| AppError::Validation("MAX_IMAGE_DIMENSION must be a number".to_string()))?,
            jpeg_quality: env::var("JPEG_QUALITY")
                .unwrap_or_else(|_| "92".to_string())
                .parse()
                .map_err(|_| AppError::Validation("JPEG_QUALITY must be a number".to_string()))?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Valider les paramètres critiques
    fn validate(&self) -> Result<()> {
        if self.max_file_size_mb == 0 || self.max_upload_size_mb == 0 {
            return Err(AppError::Validation(
                "Upload size limits must be greater than zero".to_string(),
            ));
        }

        if self.max_file_size_mb > self.max_upload_size_mb {
            return Err(AppError::Validation(
                "MAX_FILE_SIZE_MB cannot exceed MAX_UPLOAD_SIZE_MB".to_string(),
            ));
        }

        if self.max_image_dimension < 16 {
            return Err(AppError::Validation(
                "MAX_IMAGE_DIMENSION must be at least 16 pixels".to_string(),
            ));
        }

        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(AppError::Validation(
                "JPEG_QUALITY must be between 1 and 100".to_string(),
            ));
        }

        if self.is_production() && self.secret_key == DEV_SECRET_KEY {
            warn!("⚠️  SECRET_KEY utilise la valeur de développement en production");
        }

        Ok(())
    }

    /// Taille maximale d'un fichier en octets
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }

    /// Taille maximale de la requête complète en octets
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb * 1024 * 1024
    }

    /// Vérifier si on est en production
    pub fn is_production(&self) -> bool {
        self.run_mode == "production"
    }

    /// Vérifier si on est en développement
    pub fn is_development(&self) -> bool {
        self.run_mode == "development"
    }
}

#[cfg(test)]
impl Default for Config {
    /// Configuration par défaut pour les tests
    fn default() -> Self {
        Config {
            run_mode: "test".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            workers: 1,
            log_level: "info".to_string(),
            log_format: "compact".to_string(),
            secret_key: DEV_SECRET_KEY.to_string(),
            max_upload_size_mb: 500,
            max_file_size_mb: 50,
            max_image_dimension: 2048,
            jpeg_quality: 92,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limits_in_bytes() {
        let config = Config::default();
        assert_eq!(config.max_file_size_bytes(), 50 * 1024 * 1024);
        assert_eq!(config.max_upload_size_bytes(), 500 * 1024 * 1024);
    }

    #[test]
    fn test_validate_rejects_inconsistent_limits() {
        let config = Config {
            max_file_size_mb: 600,
            max_upload_size_mb: 500,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_jpeg_quality() {
        let config = Config {
            jpeg_quality: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            jpeg_quality: 101,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
