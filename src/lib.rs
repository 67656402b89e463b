#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::TomlConfig;
pub use core::{
    catalog::InMemoryCatalog, engine::BookingEngine, ledger::InMemoryLedger, BookingApi,
    ReservationOutcome, ReservationRequest,
};
pub use utils::error::{BookingError, Result};
