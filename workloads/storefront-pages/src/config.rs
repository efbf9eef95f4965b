//! Storefront configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::prelude::*;
use storefront_observability::{LogFormat, LogLevel, StructuredLogger, ViewId};

/// Storefront configuration file.
///
/// Every section and field has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Catalog display settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Review section settings.
    #[serde(default)]
    pub reviews: ReviewsConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a file (`.json`, otherwise TOML).
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path))?;
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<()> {
        self.currency()?;
        if self.reviews.star_count == 0 {
            bail!("reviews.star_count must be at least 1");
        }
        Ok(())
    }

    /// Configured display currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.catalog.currency)
            .with_context(|| format!("Unknown currency: {}", self.catalog.currency))
    }

    /// Free-shipping threshold as money.
    pub fn free_shipping_threshold(&self) -> Money {
        Money::new(
            self.catalog.free_shipping_threshold_cents,
            self.currency().unwrap_or_default(),
        )
    }

    /// "Free shipping on orders over $50".
    pub fn free_shipping_label(&self) -> String {
        let threshold = self.free_shipping_threshold();
        let places = threshold.currency.decimal_places();
        let unit = 10_i64.pow(places);
        let amount = if places > 0 && threshold.amount_cents % unit == 0 {
            format!(
                "{}{}",
                threshold.currency.symbol(),
                threshold.amount_cents / unit
            )
        } else {
            threshold.display()
        };
        format!("Free shipping on orders over {}", amount)
    }

    /// Logger for one page view, with the configured level and format.
    pub fn logger(&self, view_id: ViewId) -> StructuredLogger {
        StructuredLogger::new(view_id)
            .with_min_level(self.logging.level)
            .with_format(self.logging.format)
    }
}

/// Catalog display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Currency code for prices (default: USD).
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Stock below this shows an "Only N left" badge (default: 10).
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,

    /// Orders above this ship free (default: 5000 cents).
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold_cents: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            low_stock_threshold: default_low_stock_threshold(),
            free_shipping_threshold_cents: default_free_shipping_threshold(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_low_stock_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

fn default_free_shipping_threshold() -> i64 {
    5000
}

/// Review section settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewsConfig {
    /// Stars per rating display (default: 5).
    #[serde(default = "default_star_count")]
    pub star_count: usize,

    /// Maximum reviews rendered in the list; 0 renders all.
    #[serde(default)]
    pub max_rendered: usize,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            star_count: default_star_count(),
            max_rendered: 0,
        }
    }
}

fn default_star_count() -> usize {
    DEFAULT_STAR_COUNT
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level (default: info).
    #[serde(default)]
    pub level: LogLevel,

    /// Output format (default: json).
    #[serde(default)]
    pub format: LogFormat,
}
