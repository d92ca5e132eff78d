use coil_quote::core::batch::{quote_batch_file, BatchSummary};
use coil_quote::{PricingConfig, PricingEngine};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_batch_file_quotes_and_rejects_rows() {
    let mut input = NamedTempFile::new().unwrap();
    input
        .write_all(
            b"reference,length_m,height_m,depth_m,fpi,include_primer,is_field_work\n\
              AHU-1,1.0,1.0,0.13,10,false,false\n\
              AHU-2,1.0,1.0,0.13,10,true,false\n\
              AHU-3,1.0,1.0,0.13,10,false,true\n\
              AHU-4,0,1.0,0.13,10,false,false\n\
              AHU-5,1.0,1.0,0.13,0,,\n",
        )
        .unwrap();

    let engine = PricingEngine::new(PricingConfig::default()).unwrap();
    let mut output = Vec::new();
    let summary = quote_batch_file(&engine, input.path(), &mut output).unwrap();
    assert_eq!(summary, BatchSummary { quoted: 3, rejected: 2 });

    let mut reader = csv::Reader::from_reader(output.as_slice());
    let headers = reader.headers().unwrap().clone();
    let price_col = headers.iter().position(|h| h == "final_price").unwrap();
    let rejection_col = headers.iter().position(|h| h == "rejection").unwrap();

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);

    assert_eq!(&rows[0][price_col], "1169");
    assert_eq!(&rows[1][price_col], "1223");
    assert_eq!(&rows[2][price_col], "4069");

    assert_eq!(&rows[3][0], "AHU-4");
    assert_eq!(&rows[3][price_col], "");
    assert!(rows[3][rejection_col].contains("length_m"));

    assert!(rows[4][rejection_col].contains("fpi"));
    for row in &rows[..3] {
        assert_eq!(&row[rejection_col], "");
    }
}

#[test]
fn test_missing_batch_file_is_an_error() {
    let engine = PricingEngine::new(PricingConfig::default()).unwrap();
    let result = quote_batch_file(&engine, "/nonexistent/coils.csv", Vec::new());
    assert!(result.is_err());
}
