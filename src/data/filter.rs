use crate::data::point::{Company, DataPoint, Month};

/// Points of `company` dated within `month` (any year), sorted ascending by date.
///
/// Sorting is stable, so points sharing a date keep their input order. No match yields an
/// empty series.
pub fn filter_series(dataset: &[DataPoint], company: Company, month: Month) -> Vec<DataPoint> {
    let mut series: Vec<DataPoint> = dataset
        .iter()
        .filter(|p| p.is_company(company) && p.is_month(month))
        .cloned()
        .collect();

    series.sort_by_key(|p| p.date());

    series
}
