pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::report::QuoteReport;
pub use config::{LaborAreaBasis, PricingConfig};
pub use crate::core::{batch::quote_batch, engine::PricingEngine};
pub use domain::model::{CoilDimensions, FinDensity, PriceBreakdown, QuoteRequest, ServiceOptions};
pub use utils::error::{QuoteError, Result};
