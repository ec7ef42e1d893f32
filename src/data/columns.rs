//! Column Naming Module
//! Canonical column names and lookups that work before and after cleaning.

use polars::prelude::*;

pub const STARTUP_NAME: &str = "startup_name";
pub const CITY_LOCATION: &str = "city_location";
pub const DATE: &str = "date";
pub const AMOUNT_IN_USD: &str = "amount_in_usd";
pub const INDUSTRY_VERTICAL: &str = "industry_vertical";
pub const INVESTORS_NAME: &str = "investors_name";
pub const INVESTMENT_TYPE: &str = "investment_type";

/// Canonical form of a column name: trimmed, lowercased, words joined by `_`.
///
/// Runs of whitespace collapse to a single underscore, so `"City  Location"`
/// and `"city location"` both become `city_location`.
pub fn canonical_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Find a column whose canonical name matches `canonical`.
pub fn find_column<'a>(df: &'a DataFrame, canonical: &str) -> Option<&'a Column> {
    df.get_columns()
        .iter()
        .find(|col| canonical_name(col.name().as_str()) == canonical)
}

/// Whether the raw name has any space or surrounding whitespace.
pub fn has_spaces(raw: &str) -> bool {
    raw.contains(' ') || raw != raw.trim()
}

/// Rebuild `df` with new column names, in order.
///
/// Fails when the new names collide.
pub fn rename_columns(df: &DataFrame, names: &[String]) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .zip(names)
        .map(|(col, name)| col.clone().with_name(name.as_str().into()))
        .collect();
    DataFrame::new(columns)
}

/// Read a column as optional strings, casting non-text columns first.
pub fn text_values(column: &Column) -> PolarsResult<Vec<Option<String>>> {
    let as_text = column.cast(&DataType::String)?;
    let values = as_text
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect();
    Ok(values)
}
