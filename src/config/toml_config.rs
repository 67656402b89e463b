use crate::core::catalog::InMemoryCatalog;
use crate::core::engine::BookingEngine;
use crate::core::ledger::InMemoryLedger;
use crate::core::{Booking, Ledger, Resource, HOURS_PER_DAY};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{
    validate_iso_date, validate_non_empty_string, validate_range, validate_unique_ids, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub bookings: Vec<SeedBookingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub timezone_note: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "bike-booking".to_string(),
            timezone_note: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

/// 啟動時預先寫入 ledger 的預約
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedBookingConfig {
    pub resource_id: String,
    pub date: String,
    pub hour: i64,
    pub customer_name: String,
    pub customer_phone: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 沒有指定設定檔時使用：兩台車、沒有預約
    pub fn builtin() -> Self {
        Self {
            service: ServiceConfig::default(),
            logging: None,
            resources: vec![
                Resource::new("1", "bike1", 8_000_000),
                Resource::new("2", "super bike", 18_000_000),
            ],
            bookings: Vec::new(),
        }
    }

    /// 替換環境變數 (例如 ${BIKE_PRICE})，找不到的變數保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("service.name", &self.service.name)?;

        let level = self.log_level();
        if !LOG_LEVELS.contains(&level) {
            return Err(BookingError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: level.to_string(),
                reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
            });
        }

        validate_unique_ids(self.resources.iter().map(|r| r.id.as_str()))?;
        for resource in &self.resources {
            validate_non_empty_string("resources.id", &resource.id)?;
            validate_non_empty_string("resources.name", &resource.name)?;
            validate_range("resources.price_minor", resource.price_minor, 0, i64::MAX)?;
        }

        for booking in &self.bookings {
            if !self.resources.iter().any(|r| r.id == booking.resource_id) {
                return Err(BookingError::InvalidConfigValueError {
                    field: "bookings.resource_id".to_string(),
                    value: booking.resource_id.clone(),
                    reason: "Booking references a resource that is not configured".to_string(),
                });
            }
            validate_iso_date("bookings.date", &booking.date)?;
            validate_range("bookings.hour", booking.hour, 0, HOURS_PER_DAY as i64 - 1)?;
            validate_non_empty_string("bookings.customer_name", &booking.customer_name)?;
            validate_non_empty_string("bookings.customer_phone", &booking.customer_phone)?;
        }

        Ok(())
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or(LogFormat::Compact)
    }

    pub fn build_catalog(&self) -> Result<InMemoryCatalog> {
        InMemoryCatalog::new(self.resources.clone())
    }

    /// 透過 ledger 的原子寫入載入預約，重複時段會回報衝突
    pub fn seed_ledger<L: Ledger>(&self, ledger: &L) -> Result<usize> {
        for seed in &self.bookings {
            let hour = u8::try_from(seed.hour).map_err(|_| BookingError::InvalidConfigValueError {
                field: "bookings.hour".to_string(),
                value: seed.hour.to_string(),
                reason: "Hour must be between 0 and 23".to_string(),
            })?;
            ledger.try_append(Booking {
                id: Booking::derive_id(&seed.resource_id, &seed.date, hour),
                resource_id: seed.resource_id.clone(),
                date: seed.date.clone(),
                hour,
                customer_name: seed.customer_name.clone(),
                customer_phone: seed.customer_phone.clone(),
            })?;
        }
        Ok(self.bookings.len())
    }

    /// 驗證後建立完整的預約引擎
    pub fn build_engine(&self) -> Result<BookingEngine<InMemoryCatalog, InMemoryLedger>> {
        self.validate()?;
        let catalog = self.build_catalog()?;
        let ledger = InMemoryLedger::new();
        let seeded = self.seed_ledger(&ledger)?;
        tracing::info!(
            "📚 {} ready: {} resources, {} seeded bookings",
            self.service.name,
            catalog.len(),
            seeded
        );
        Ok(BookingEngine::new(catalog, ledger))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
