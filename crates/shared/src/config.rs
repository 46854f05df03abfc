//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Defaults applied to new invoices.
    #[serde(default)]
    pub invoice: InvoiceDefaults,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Record storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding saved invoice records. `None` keeps records in memory only.
    #[serde(default = "default_invoices_path")]
    pub invoices_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            invoices_path: default_invoices_path(),
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_invoices_path() -> Option<PathBuf> {
    Some(PathBuf::from("data/invoices.json"))
}

/// Defaults applied when an invoice omits optional fields.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceDefaults {
    /// IGST rate (as a fraction) payable on RCM self-invoices.
    #[serde(default = "default_igst_rate")]
    pub igst_rate: Decimal,
    /// FX rate prefilled on new drafts.
    #[serde(default = "default_fx_rate")]
    pub default_fx_rate: Decimal,
    /// Letter of Undertaking reference printed on export invoices.
    #[serde(default = "default_lut_id")]
    pub lut_id: String,
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            igst_rate: default_igst_rate(),
            default_fx_rate: default_fx_rate(),
            lut_id: default_lut_id(),
        }
    }
}

fn default_igst_rate() -> Decimal {
    Decimal::new(18, 2) // 18%
}

fn default_fx_rate() -> Decimal {
    Decimal::new(8650, 2)
}

fn default_lut_id() -> String {
    "LUT-2025-001".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("GSTINV").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
