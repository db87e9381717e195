//! Column conversion helpers shared by the query modules.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};

use crate::models::Criteria;

/// Wraps a parse failure of column `index` as a rusqlite conversion error.
fn conversion_error<E>(index: usize, error: E) -> rusqlite::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, error.into())
}

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp_column(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| conversion_error(index, e))
}

/// Reads a nullable RFC 3339 timestamp column.
pub(crate) fn optional_timestamp_column(
    row: &Row<'_>,
    index: usize,
) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(index)?
        .map(|s| s.parse::<Timestamp>().map_err(|e| conversion_error(index, e)))
        .transpose()
}

/// Reads an ISO 8601 civil date column.
pub(crate) fn date_column(row: &Row<'_>, index: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(index)?
        .parse::<Date>()
        .map_err(|e| conversion_error(index, e))
}

/// Reads a nullable ISO 8601 civil date column.
pub(crate) fn optional_date_column(
    row: &Row<'_>,
    index: usize,
) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(index)?
        .map(|s| s.parse::<Date>().map_err(|e| conversion_error(index, e)))
        .transpose()
}

/// Reads an enumeration stored through its `as_str` representation.
pub(crate) fn enum_column<T>(row: &Row<'_>, index: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    row.get::<_, String>(index)?
        .parse::<T>()
        .map_err(|e| conversion_error(index, e))
}

/// Reads an unsigned integer column that SQLite stores as `i64`.
pub(crate) fn id_column(row: &Row<'_>, index: usize) -> rusqlite::Result<u64> {
    row.get::<_, i64>(index).map(|v| v as u64)
}

/// Reads a nullable count column such as `times_per_week`.
pub(crate) fn optional_count_column(
    row: &Row<'_>,
    index: usize,
) -> rusqlite::Result<Option<u32>> {
    Ok(row.get::<_, Option<i64>>(index)?.map(|v| v as u32))
}

/// Reads a criteria column.
///
/// Stored criteria go through the same validation as user input, so loosely
/// shaped JSON never reaches the evaluator.
pub(crate) fn criteria_column(
    row: &Row<'_>,
    index: usize,
) -> rusqlite::Result<Option<Criteria>> {
    row.get::<_, Option<String>>(index)?
        .map(|json| Criteria::from_json(&json).map_err(|e| conversion_error(index, e.to_string())))
        .transpose()
}
