use crate::domain::model::{PriceBreakdown, QuoteRequest};
use crate::utils::error::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

pub const TAX_DISCLAIMER: &str = "Price excludes VAT. Subject to change without notice.";

/// Everything an input surface shows the customer for one quote.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteReport<'a> {
    pub issued_on: NaiveDate,
    pub currency: &'a str,
    pub request: &'a QuoteRequest,
    pub breakdown: &'a PriceBreakdown,
    pub disclaimer: &'static str,
}

impl<'a> QuoteReport<'a> {
    pub fn new(
        request: &'a QuoteRequest,
        breakdown: &'a PriceBreakdown,
        currency: &'a str,
        issued_on: NaiveDate,
    ) -> Self {
        Self {
            issued_on,
            currency,
            request,
            breakdown,
            disclaimer: TAX_DISCLAIMER,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let b = self.breakdown;
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "Estimated quote: {} {}",
            format_thousands(b.final_price),
            self.currency
        );
        let _ = writeln!(
            out,
            "Coil: {} x {} x {} m, {} FPI",
            self.request.length_m, self.request.height_m, self.request.depth_m, self.request.fpi
        );
        out.push('\n');
        out.push_str("Details\n");

        let lines: [(&str, String); 13] = [
            ("Fin density", format!("{} fins/m", format_money(b.fins_per_meter))),
            ("Coated area", format!("{} m²", format_money(b.coated_area))),
            ("Faced area", format!("{} m²", format_money(b.faced_area))),
            ("Primer area", format!("{} m²", format_money(b.primer_area))),
            ("Labor hours", format!("{} h", format_money(b.labor_hours))),
            ("Coating material", format_money(b.cost_material)),
            ("Primer", format_money(b.cost_primer)),
            ("Labor", format_money(b.cost_labor)),
            ("Fixed preparation", format_money(b.fixed_prep_cost)),
            ("Direct costs", format_money(b.total_direct)),
            ("With overhead", format_money(b.total_cost_before_profit)),
            ("With profit", format_money(b.price_before_field_adjustment)),
            ("Field surcharge", format_money(b.field_surcharge)),
        ];
        for (label, value) in lines {
            let _ = writeln!(out, "  {:<20}{:>16}", format!("{}:", label), value);
        }

        if self.request.include_primer {
            out.push_str("✅ Includes arc/bend primer\n");
        }
        if self.request.is_field_work {
            out.push_str("✅ Includes on-site field work\n");
        }
        let _ = writeln!(out, "{} Issued {}.", self.disclaimer, self.issued_on);
        out
    }
}

/// `1234567` -> `1,234,567`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Two decimals with thousands separators, e.g. `1,169.02`.
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let whole = whole.parse::<u64>().map(format_thousands).unwrap_or_else(|_| whole.to_string());
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, whole, fraction)
}
