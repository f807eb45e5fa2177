use chrono::{DateTime, Datelike, NaiveDate};

use crate::error::{ScError, ScResult};

pub fn date_from_str(s: &str) -> ScResult<NaiveDate> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y%m%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%Y-%m-%dT%H:%M:%S%.f", // ISO 8601 Extended
    ];

    let s = s.trim();

    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        // RFC 3339
        return Ok(datetime.date_naive());
    }

    Err(ScError::Invalid {
        code: "INVALID_DATE",
        message: format!("Unable to parse date '{s}'"),
    })
}

pub fn date_to_str(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Axis label, e.g. `03-Nov`
pub fn date_to_day_month(date: &NaiveDate) -> String {
    date.format("%d-%b").to_string()
}

/// Tooltip label, e.g. `03-Nov-2020`
pub fn date_to_day_month_year(date: &NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

/// Continuous day number used to place dates on a time axis.
pub fn date_to_day_number(date: &NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_str() {
        assert_eq!(
            date_to_str(&date_from_str("2020-11-03").unwrap()),
            "2020-11-03"
        );
        assert_eq!(
            date_to_str(&date_from_str("20201103").unwrap()),
            "2020-11-03"
        );
        assert_eq!(
            date_to_str(&date_from_str("2020/11/03").unwrap()),
            "2020-11-03"
        );
        assert_eq!(
            date_to_str(&date_from_str("11/03/2020").unwrap()),
            "2020-11-03"
        );
        assert_eq!(
            date_to_str(&date_from_str(" 2020-11-03T09:30:00 ").unwrap()),
            "2020-11-03"
        );
        assert_eq!(
            date_to_str(&date_from_str("2020-11-03T23:59:59+08:00").unwrap()),
            "2020-11-03"
        );
        assert!(date_from_str("invalid-date").is_err());
        assert!(date_from_str("").is_err());
    }

    #[test]
    fn test_date_labels() {
        let date = NaiveDate::from_ymd_opt(2020, 11, 3).unwrap();

        assert_eq!(date_to_day_month(&date), "03-Nov");
        assert_eq!(date_to_day_month_year(&date), "03-Nov-2020");
    }

    #[test]
    fn test_date_to_day_number() {
        let a = NaiveDate::from_ymd_opt(2020, 11, 3).unwrap();
        let b = NaiveDate::from_ymd_opt(2020, 11, 10).unwrap();

        assert_eq!(date_to_day_number(&b) - date_to_day_number(&a), 7.0);
    }
}
