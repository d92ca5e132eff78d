use serde::{Deserialize, Serialize};

/// Physical size of the coil, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoilDimensions {
    pub length_m: f64,
    pub height_m: f64,
    pub depth_m: f64,
}

/// Fins per inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinDensity {
    pub fpi: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOptions {
    /// Arc/bend priming.
    pub include_primer: bool,
    /// On-site job rather than workshop.
    pub is_field_work: bool,
}

/// One quote as collected by an input surface (CLI flags, a CSV row, JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub length_m: f64,
    pub height_m: f64,
    pub depth_m: f64,
    pub fpi: u32,
    #[serde(default)]
    pub include_primer: bool,
    #[serde(default)]
    pub is_field_work: bool,
}

impl QuoteRequest {
    pub fn dimensions(&self) -> CoilDimensions {
        CoilDimensions {
            length_m: self.length_m,
            height_m: self.height_m,
            depth_m: self.depth_m,
        }
    }

    pub fn fin_density(&self) -> FinDensity {
        FinDensity { fpi: self.fpi }
    }

    pub fn options(&self) -> ServiceOptions {
        ServiceOptions {
            include_primer: self.include_primer,
            is_field_work: self.is_field_work,
        }
    }
}

/// Every intermediate of the pricing pipeline, for the details panel.
///
/// Areas are in m², money in the configured currency. `final_price` is the
/// only truncated value; everything else is the raw f64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub final_price: u64,
    pub fins_per_meter: f64,
    pub coated_area: f64,
    pub faced_area: f64,
    pub primer_area: f64,
    pub labor_hours: f64,
    pub cost_material: f64,
    pub cost_primer: f64,
    pub cost_labor: f64,
    pub fixed_prep_cost: f64,
    pub total_direct: f64,
    /// Direct costs with overhead applied.
    pub total_cost_before_profit: f64,
    pub price_before_field_adjustment: f64,
    pub field_surcharge: f64,
    pub total_before_truncation: f64,
}
