//! Configuration module
//!
//! Environment-driven settings for media uploads, preview rendering and storage.

use std::env;

use crate::constants::DEFAULT_CURRENCY_SYMBOL;
use crate::models::BusinessIdentity;
use crate::storage_types::StorageBackend;

const MAX_IMAGE_SIZE_MB: usize = 5;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub max_image_size_bytes: usize,
    pub currency_symbol: String,
    pub business_name: Option<String>,
    pub business_phone: Option<String>,
    pub storage_backend: StorageBackend,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .map(|s| s.parse::<StorageBackend>())
            .transpose()?
            .unwrap_or(StorageBackend::Memory);

        let config = Config {
            environment,
            max_image_size_bytes: env::var("MAX_IMAGE_SIZE_MB")
                .unwrap_or_else(|_| MAX_IMAGE_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_IMAGE_SIZE_MB)
                * 1024
                * 1024,
            currency_symbol: env::var("CURRENCY_SYMBOL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
            business_name: env::var("BUSINESS_NAME").ok().filter(|s| !s.is_empty()),
            business_phone: env::var("BUSINESS_PHONE").ok().filter(|s| !s.is_empty()),
            storage_backend,
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn business_identity(&self) -> BusinessIdentity {
        BusinessIdentity {
            name: self.business_name.clone(),
            phone: self.business_phone.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_image_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_IMAGE_SIZE_MB must be greater than zero"));
        }

        match self.storage_backend {
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
            StorageBackend::Memory => {
                if self.is_production() {
                    return Err(anyhow::anyhow!(
                        "memory storage backend cannot be used in production"
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            max_image_size_bytes: MAX_IMAGE_SIZE_MB * 1024 * 1024,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            business_name: None,
            business_phone: None,
            storage_backend: StorageBackend::Memory,
            local_storage_path: None,
            local_storage_base_url: None,
        }
    }
}
