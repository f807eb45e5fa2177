use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::{
    data::point::DataPoint,
    error::{ScError, ScResult},
    utils::datetime::date_from_str,
};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Company")]
    company: String,

    #[serde(rename = "Date")]
    date: String,

    #[serde(rename = "Open")]
    open: String,

    #[serde(rename = "Close")]
    close: String,
}

pub async fn load_csv(path: &Path, delimiter: u8) -> ScResult<Vec<DataPoint>> {
    if !path.is_file() {
        return Err(ScError::NotExists {
            code: "DATASET_NOT_EXISTS",
            message: format!("Dataset '{}' does not exist", path.to_string_lossy()),
        });
    }

    let content = tokio::fs::read(path).await?;
    let points = parse_csv(&content, delimiter)?;
    debug!(
        "Loaded {} data points from '{}'",
        points.len(),
        path.to_string_lossy()
    );

    Ok(points)
}

/// Parses delimited text with a `Company,Date,Open,Close` header (extra columns are ignored).
/// Fails on the first malformed row. Company values are kept as written.
pub fn parse_csv(content: &[u8], delimiter: u8) -> ScResult<Vec<DataPoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .from_reader(content);

    let mut points: Vec<DataPoint> = vec![];

    for (i, record) in reader.deserialize::<CsvRecord>().enumerate() {
        let row = i + 1;
        let record = record?;

        let date = date_from_str(&record.date).map_err(|_| ScError::Invalid {
            code: "INVALID_DATE",
            message: format!("Row {row}: unable to parse date '{}'", record.date),
        })?;
        let open = parse_price(&record.open, "Open", row)?;
        let close = parse_price(&record.close, "Close", row)?;

        let point = DataPoint::new(&record.company, date, open, close).map_err(|err| match err {
            ScError::Invalid { code, message } => ScError::Invalid {
                code,
                message: format!("Row {row}: {message}"),
            },
            err => err,
        })?;

        points.push(point);
    }

    Ok(points)
}

fn parse_price(text: &str, field: &str, row: usize) -> ScResult<f64> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ScError::Invalid {
            code: "INVALID_PRICE",
            message: format!("Row {row}: unable to parse {field} price '{text}'"),
        }),
    }
}
