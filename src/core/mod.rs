pub mod batch;
pub mod engine;

pub use crate::domain::model::{
    CoilDimensions, FinDensity, PriceBreakdown, QuoteRequest, ServiceOptions,
};
pub use crate::utils::error::Result;
