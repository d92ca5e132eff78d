//! The pricing formula.
//!
//! `compute` is a pure function of its inputs and the engine's immutable
//! configuration. It is defined only for positive dimensions and an fpi at or
//! above the configured minimum; `quote` checks that before computing.

use crate::config::{LaborAreaBasis, PricingConfig};
use crate::domain::model::{
    CoilDimensions, FinDensity, PriceBreakdown, QuoteRequest, ServiceOptions,
};
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{self, Validate};

#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Builds an engine, refusing configurations the formula cannot use.
    pub fn new(config: PricingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Validates a request and prices it. Nothing is computed for rejected input.
    pub fn quote(&self, request: &QuoteRequest) -> Result<PriceBreakdown> {
        if let Err(e) = self.validate_request(request) {
            tracing::warn!("Quote request rejected: {}", e);
            return Err(e);
        }

        let breakdown = self.compute(
            request.dimensions(),
            request.fin_density(),
            request.options(),
        );

        tracing::info!(
            final_price = breakdown.final_price,
            coated_area = breakdown.coated_area,
            include_primer = request.include_primer,
            is_field_work = request.is_field_work,
            "Quote computed"
        );
        Ok(breakdown)
    }

    pub fn validate_request(&self, request: &QuoteRequest) -> Result<()> {
        validation::validate_dimension("length_m", request.length_m)?;
        validation::validate_dimension("height_m", request.height_m)?;
        validation::validate_dimension("depth_m", request.depth_m)?;
        validation::validate_fpi("fpi", request.fpi, self.config.input.min_fpi)?;
        Ok(())
    }

    pub fn compute(
        &self,
        dimensions: CoilDimensions,
        fin_density: FinDensity,
        options: ServiceOptions,
    ) -> PriceBreakdown {
        let cfg = &self.config;
        let CoilDimensions {
            length_m,
            height_m,
            depth_m,
        } = dimensions;

        let fins_per_meter = f64::from(fin_density.fpi) * cfg.fins.per_meter_factor;
        // Front and back of every fin.
        let coated_area = length_m * height_m * depth_m * fins_per_meter * 2.0;
        let faced_area = length_m * height_m;

        let cost_material =
            coated_area * cfg.material.coverage_kg_per_m2 * cfg.material.price_per_kg;

        // Primer only goes on the arcs at the side profile.
        let (primer_area, cost_primer) = if options.include_primer {
            let area = height_m * depth_m;
            (area, area * cfg.primer.coverage_kg_per_m2 * cfg.primer.price_per_kg)
        } else {
            (0.0, 0.0)
        };

        let labor_area = match cfg.labor.area_basis {
            LaborAreaBasis::Faced => faced_area,
            LaborAreaBasis::Coated => coated_area,
        };
        let labor_hours = labor_area / cfg.labor.output_m2_per_hour;
        let cost_labor = labor_hours * cfg.labor.rate_per_hour;

        let total_direct = cost_material + cost_primer + cfg.costs.fixed_prep + cost_labor;
        let total_cost_before_profit = total_direct * (1.0 + cfg.costs.overhead_percent);
        let price_before_field_adjustment =
            total_cost_before_profit * (1.0 + cfg.costs.profit_margin);

        let field_surcharge = if options.is_field_work {
            cfg.costs.field_work_surcharge
        } else {
            0.0
        };
        let total_before_truncation = price_before_field_adjustment + field_surcharge;

        let breakdown = PriceBreakdown {
            final_price: truncate_price(total_before_truncation),
            fins_per_meter,
            coated_area,
            faced_area,
            primer_area,
            labor_hours,
            cost_material,
            cost_primer,
            cost_labor,
            fixed_prep_cost: cfg.costs.fixed_prep,
            total_direct,
            total_cost_before_profit,
            price_before_field_adjustment,
            field_surcharge,
            total_before_truncation,
        };

        tracing::debug!("Price breakdown: {:?}", breakdown);
        breakdown
    }
}

impl TryFrom<PricingConfig> for PricingEngine {
    type Error = QuoteError;

    fn try_from(config: PricingConfig) -> Result<Self> {
        Self::new(config)
    }
}

/// Drops the fractional part. Never rounds up.
fn truncate_price(total: f64) -> u64 {
    total.floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_request() -> QuoteRequest {
        QuoteRequest {
            length_m: 1.0,
            height_m: 1.0,
            depth_m: 0.13,
            fpi: 10,
            include_primer: false,
            is_field_work: false,
        }
    }

    fn engine() -> PricingEngine {
        PricingEngine::new(PricingConfig::default()).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let breakdown = engine().quote(&reference_request()).unwrap();

        assert!((breakdown.fins_per_meter - 393.700787).abs() < 1e-9);
        assert!((breakdown.coated_area - 102.36220462).abs() < 1e-6);
        assert!((breakdown.faced_area - 1.0).abs() < 1e-12);
        assert!((breakdown.cost_material - 494.3582672).abs() < 1e-4);
        assert_eq!(breakdown.cost_primer, 0.0);
        assert!((breakdown.labor_hours - 1.0 / 1.5).abs() < 1e-12);
        assert!((breakdown.cost_labor - 133.3333333).abs() < 1e-4);
        assert!((breakdown.total_direct - 677.6916005).abs() < 1e-4);
        assert!((breakdown.total_cost_before_profit - 779.3453406).abs() < 1e-4);
        assert!((breakdown.price_before_field_adjustment - 1169.0180109).abs() < 1e-4);
        assert_eq!(breakdown.field_surcharge, 0.0);
        assert_eq!(breakdown.final_price, 1169);
    }

    #[test]
    fn test_primer_is_marked_up_with_direct_costs() {
        let engine = engine();
        let without = engine.quote(&reference_request()).unwrap();
        let with = engine
            .quote(&QuoteRequest {
                include_primer: true,
                ..reference_request()
            })
            .unwrap();

        let primer = 1.0 * 0.13 * 2.5 * 96.74;
        assert!((with.primer_area - 0.13).abs() < 1e-12);
        assert!((with.cost_primer - primer).abs() < 1e-9);

        let expected_delta = primer * 1.15 * 1.5;
        let delta = with.total_before_truncation - without.total_before_truncation;
        assert!((delta - expected_delta).abs() < 1e-9);
        assert_eq!(with.final_price, 1223);
    }

    #[test]
    fn test_field_work_adds_flat_surcharge() {
        let engine = engine();
        let workshop = engine.quote(&reference_request()).unwrap();
        let field = engine
            .quote(&QuoteRequest {
                is_field_work: true,
                ..reference_request()
            })
            .unwrap();

        assert_eq!(field.field_surcharge, 2900.0);
        assert_eq!(
            field.price_before_field_adjustment,
            workshop.price_before_field_adjustment
        );
        assert!(
            (field.total_before_truncation - workshop.total_before_truncation - 2900.0).abs()
                < 1e-9
        );
        assert_eq!(field.final_price, 4069);
    }

    #[test]
    fn test_price_is_truncated_not_rounded() {
        assert_eq!(truncate_price(1169.999), 1169);
        assert_eq!(truncate_price(1169.0), 1169);
        assert_eq!(truncate_price(0.4), 0);
    }

    #[test]
    fn test_coated_labor_basis_reproduces_raw_fpi_sheet() {
        let mut config = PricingConfig::default();
        config.fins.per_meter_factor = 1.0;
        config.labor.area_basis = LaborAreaBasis::Coated;
        let engine = PricingEngine::new(config).unwrap();

        let breakdown = engine.quote(&reference_request()).unwrap();
        assert!((breakdown.coated_area - 2.6).abs() < 1e-12);
        assert!((breakdown.labor_hours - 2.6 / 1.5).abs() < 1e-12);
        assert_eq!(breakdown.final_price, 705);
    }

    #[test]
    fn test_invalid_dimensions_are_rejected() {
        let engine = engine();
        for request in [
            QuoteRequest {
                length_m: 0.0,
                ..reference_request()
            },
            QuoteRequest {
                height_m: -1.0,
                ..reference_request()
            },
            QuoteRequest {
                depth_m: f64::NAN,
                ..reference_request()
            },
            QuoteRequest {
                fpi: 0,
                ..reference_request()
            },
        ] {
            assert!(matches!(
                engine.quote(&request),
                Err(QuoteError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_minimum_fpi_is_inclusive() {
        let mut config = PricingConfig::default();
        config.input.min_fpi = 8;
        let engine = PricingEngine::new(config).unwrap();

        let at_minimum = QuoteRequest {
            fpi: 8,
            ..reference_request()
        };
        let below_minimum = QuoteRequest {
            fpi: 7,
            ..reference_request()
        };
        assert!(engine.quote(&at_minimum).is_ok());
        assert!(engine.quote(&below_minimum).is_err());
    }

    #[test]
    fn test_invalid_config_refuses_engine() {
        let mut config = PricingConfig::default();
        config.labor.output_m2_per_hour = 0.0;
        assert!(PricingEngine::new(config.clone()).is_err());
        assert!(PricingEngine::try_from(config).is_err());
    }
}
