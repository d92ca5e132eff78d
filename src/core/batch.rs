//! Batch quoting: one CSV row in, one priced (or rejected) row out.

use crate::core::engine::PricingEngine;
use crate::domain::model::QuoteRequest;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
struct BatchInputRow {
    reference: Option<String>,
    length_m: f64,
    height_m: f64,
    depth_m: f64,
    fpi: u32,
    include_primer: Option<bool>,
    is_field_work: Option<bool>,
}

impl BatchInputRow {
    fn to_request(&self) -> QuoteRequest {
        QuoteRequest {
            length_m: self.length_m,
            height_m: self.height_m,
            depth_m: self.depth_m,
            fpi: self.fpi,
            include_primer: self.include_primer.unwrap_or(false),
            is_field_work: self.is_field_work.unwrap_or(false),
        }
    }
}

/// Output row. Price columns are empty when `rejection` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchQuoteRow {
    pub reference: String,
    pub length_m: Option<f64>,
    pub height_m: Option<f64>,
    pub depth_m: Option<f64>,
    pub fpi: Option<u32>,
    pub include_primer: Option<bool>,
    pub is_field_work: Option<bool>,
    pub coated_area: Option<f64>,
    pub cost_material: Option<f64>,
    pub cost_primer: Option<f64>,
    pub cost_labor: Option<f64>,
    pub total_cost_before_profit: Option<f64>,
    pub final_price: Option<u64>,
    pub rejection: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub quoted: usize,
    pub rejected: usize,
}

/// Prices every row of `input` and writes the result CSV to `output`.
///
/// Rows that cannot be read or fail validation are rejected individually.
/// Output is written only once the whole file has been processed, so a
/// failure on the header or the underlying reader leaves `output` untouched.
pub fn quote_batch<R: Read, W: Write>(
    engine: &PricingEngine,
    input: R,
    mut output: W,
) -> Result<BatchSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers()?.clone();
    let reference_index = headers.iter().position(|h| h == "reference");

    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut summary = BatchSummary::default();

    for (index, record) in reader.records().enumerate() {
        let row = match record {
            Ok(record) => quote_record(engine, &headers, reference_index, index, &record),
            Err(e) => {
                tracing::warn!("Skipping unreadable row {}: {}", index + 1, e);
                BatchQuoteRow {
                    reference: format!("row {}", index + 1),
                    rejection: Some(format!("unreadable row: {}", e)),
                    ..Default::default()
                }
            }
        };

        if row.rejection.is_some() {
            summary.rejected += 1;
        } else {
            summary.quoted += 1;
        }
        writer.serialize(&row)?;
    }

    let buffer = writer.into_inner().map_err(|e| e.into_error())?;
    output.write_all(&buffer)?;
    output.flush()?;

    tracing::info!(
        "Batch complete: {} quoted, {} rejected",
        summary.quoted,
        summary.rejected
    );
    Ok(summary)
}

fn quote_record(
    engine: &PricingEngine,
    headers: &csv::StringRecord,
    reference_index: Option<usize>,
    index: usize,
    record: &csv::StringRecord,
) -> BatchQuoteRow {
    let fallback_reference = || {
        reference_index
            .and_then(|i| record.get(i))
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("row {}", index + 1))
    };

    match record.deserialize::<BatchInputRow>(Some(headers)) {
        Ok(input_row) => {
            let reference = input_row
                .reference
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or_else(fallback_reference);
            price_row(engine, reference, &input_row.to_request())
        }
        Err(e) => {
            tracing::warn!("Skipping unreadable row {}: {}", index + 1, e);
            BatchQuoteRow {
                reference: fallback_reference(),
                rejection: Some(format!("unreadable row: {}", e)),
                ..Default::default()
            }
        }
    }
}

pub fn quote_batch_file<P: AsRef<Path>, W: Write>(
    engine: &PricingEngine,
    path: P,
    output: W,
) -> Result<BatchSummary> {
    tracing::info!("📁 Reading batch from: {}", path.as_ref().display());
    let file = std::fs::File::open(path)?;
    quote_batch(engine, file, output)
}

fn price_row(engine: &PricingEngine, reference: String, request: &QuoteRequest) -> BatchQuoteRow {
    let mut row = BatchQuoteRow {
        reference,
        length_m: Some(request.length_m),
        height_m: Some(request.height_m),
        depth_m: Some(request.depth_m),
        fpi: Some(request.fpi),
        include_primer: Some(request.include_primer),
        is_field_work: Some(request.is_field_work),
        ..Default::default()
    };

    match engine.quote(request) {
        Ok(breakdown) => {
            row.coated_area = Some(breakdown.coated_area);
            row.cost_material = Some(breakdown.cost_material);
            row.cost_primer = Some(breakdown.cost_primer);
            row.cost_labor = Some(breakdown.cost_labor);
            row.total_cost_before_profit = Some(breakdown.total_cost_before_profit);
            row.final_price = Some(breakdown.final_price);
        }
        Err(e) => row.rejection = Some(e.to_string()),
    }
    row
}
