// Presentation of finished quotes. Pricing happens in core.

pub mod report;
