//! Configuration module
//!
//! This module provides the configuration structures for the API and the
//! thumbnail pipeline: server settings, the signing secret, download-link
//! lifetime, storage locations, and the thumbnail feature surface.

use std::env;
use std::path::PathBuf;

// Common constants
pub const DOWNLOAD_URL_LIFETIME_SECS: i64 = 3600;
pub const THUMBNAIL_MAX_DIMENSION: u32 = 300;

/// Base configuration shared by every process that serves HTTP
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub secret_key: String,
    pub environment: String,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base: BaseConfig,
    // Signed download links
    pub download_url_lifetime_secs: i64,
    // Object storage
    pub media_bucket: String,
    pub storage_dir: PathBuf,
    // Thumbnail pipeline
    pub thumbnails_enabled: bool,
    pub thumbnail_content_types: Vec<String>,
    pub thumbnail_workspace_dir: PathBuf,
    pub thumbnail_max_dimension: u32,
}

impl AppConfig {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            secret_key: env::var("SECRET_KEY")
                .map_err(|_| anyhow::anyhow!("SECRET_KEY must be set for link signing"))?,
            environment,
        };

        let thumbnail_content_types = env::var("THUMBNAIL_CONTENT_TYPES")
            .unwrap_or_else(|_| "image/jpeg,image/png,image/gif,image/webp".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = AppConfig {
            base,
            download_url_lifetime_secs: env::var("DOWNLOAD_URL_LIFETIME_SECS")
                .unwrap_or_else(|_| DOWNLOAD_URL_LIFETIME_SECS.to_string())
                .parse()
                .unwrap_or(DOWNLOAD_URL_LIFETIME_SECS),
            media_bucket: env::var("MEDIA_BUCKET").unwrap_or_else(|_| "arkiva-media".to_string()),
            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            thumbnails_enabled: env::var("THUMBNAILS_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            thumbnail_content_types,
            thumbnail_workspace_dir: env::var("THUMBNAIL_WORKSPACE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir().join("arkiva-thumbnails")),
            thumbnail_max_dimension: env::var("THUMBNAIL_MAX_DIMENSION")
                .unwrap_or_else(|_| THUMBNAIL_MAX_DIMENSION.to_string())
                .parse()
                .unwrap_or(THUMBNAIL_MAX_DIMENSION),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.secret_key.len() < 32 {
            return Err(anyhow::anyhow!(
                "SECRET_KEY must be at least 32 characters long"
            ));
        }

        if self.download_url_lifetime_secs <= 0 {
            return Err(anyhow::anyhow!(
                "DOWNLOAD_URL_LIFETIME_SECS must be greater than zero"
            ));
        }

        if self.media_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("MEDIA_BUCKET must not be empty"));
        }

        if self.thumbnail_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_CONTENT_TYPES must list at least one content type"
            ));
        }

        if self.thumbnail_max_dimension == 0 {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_MAX_DIMENSION must be greater than zero"
            ));
        }

        Ok(())
    }
}
