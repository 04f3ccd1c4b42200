//! Column coercion to declared datatypes.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::{
    Column, DataFrame, DataType as PlType, Int64Chunked, IntoColumn, IntoSeries, NamedFrom,
    NewChunkedArray, Series, TimeUnit,
};
use tracing::debug;

use corpus_model::{DataType, Header};

use crate::error::{CastError, Result};

/// Materializes a frame against its header collection.
///
/// Excluded columns are dropped entirely, retained columns are coerced to
/// their declared datatype, and the output column order follows the header
/// order. The operation is idempotent: re-casting an already-typed frame
/// yields an identical frame.
pub fn cast_frame(df: &DataFrame, headers: &[Header]) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::new();

    for header in headers.iter().filter(|h| h.include) {
        let column = df
            .column(&header.name)
            .map_err(|_| CastError::ColumnMissing {
                column: header.name.clone(),
            })?;
        debug!(column = %header.name, datatype = %header.datatype, "casting column");
        columns.push(cast_column(column, header)?);
    }

    DataFrame::new(columns).map_err(CastError::from)
}

fn cast_column(column: &Column, header: &Header) -> Result<Column> {
    match header.datatype {
        // Category is string-backed in the materialized frame; the semantic
        // distinction lives in the header, not the physical representation.
        DataType::String | DataType::Category => cast_to_string(column),
        DataType::Number => cast_to_number(column, header),
        DataType::Boolean => cast_to_boolean(column, header),
        DataType::Datetime => cast_to_datetime(column, header),
    }
}

fn cast_to_string(column: &Column) -> Result<Column> {
    if column.dtype() == &PlType::String {
        return Ok(column.clone());
    }
    Ok(column.cast(&PlType::String)?)
}

fn is_numeric_dtype(dtype: &PlType) -> bool {
    matches!(
        dtype,
        PlType::Int8
            | PlType::Int16
            | PlType::Int32
            | PlType::Int64
            | PlType::UInt8
            | PlType::UInt16
            | PlType::UInt32
            | PlType::UInt64
            | PlType::Float32
            | PlType::Float64
    )
}

fn cast_to_number(column: &Column, header: &Header) -> Result<Column> {
    let dtype = column.dtype();

    if dtype == &PlType::Float64 {
        return Ok(column.clone());
    }
    if is_numeric_dtype(dtype) || dtype == &PlType::Boolean {
        return Ok(column.cast(&PlType::Float64)?);
    }
    if dtype != &PlType::String {
        return Err(unsupported(header, dtype));
    }

    let values = column.str()?;
    let mut out: Vec<Option<f64>> = Vec::with_capacity(values.len());
    for opt in values.iter() {
        match opt.map(str::trim) {
            None => out.push(None),
            Some("") => out.push(None),
            Some(raw) => match raw.parse::<f64>() {
                Ok(n) => out.push(Some(n)),
                Err(_) => return Err(coercion(header, raw)),
            },
        }
    }
    Ok(Series::new(header.name.as_str().into(), out).into_column())
}

fn cast_to_boolean(column: &Column, header: &Header) -> Result<Column> {
    let dtype = column.dtype();

    if dtype == &PlType::Boolean {
        return Ok(column.clone());
    }

    if is_numeric_dtype(dtype) {
        let floats = column.cast(&PlType::Float64)?;
        let values = floats.f64()?;
        let mut out: Vec<Option<bool>> = Vec::with_capacity(values.len());
        for opt in values.iter() {
            match opt {
                None => out.push(None),
                Some(v) if v == 0.0 => out.push(Some(false)),
                Some(v) if v == 1.0 => out.push(Some(true)),
                Some(v) => return Err(coercion(header, &v.to_string())),
            }
        }
        return Ok(Series::new(header.name.as_str().into(), out).into_column());
    }

    if dtype != &PlType::String {
        return Err(unsupported(header, dtype));
    }

    let values = column.str()?;
    let mut out: Vec<Option<bool>> = Vec::with_capacity(values.len());
    for opt in values.iter() {
        match opt.map(str::trim) {
            None => out.push(None),
            Some("") => out.push(None),
            Some(raw) => match parse_bool(raw) {
                Some(b) => out.push(Some(b)),
                None => return Err(coercion(header, raw)),
            },
        }
    }
    Ok(Series::new(header.name.as_str().into(), out).into_column())
}

fn cast_to_datetime(column: &Column, header: &Header) -> Result<Column> {
    let target = PlType::Datetime(TimeUnit::Microseconds, None);
    let dtype = column.dtype();

    if dtype == &target {
        return Ok(column.clone());
    }
    if matches!(dtype, PlType::Datetime(_, _) | PlType::Date) {
        return Ok(column.cast(&target)?);
    }
    if dtype != &PlType::String {
        return Err(unsupported(header, dtype));
    }

    let values = column.str()?;
    let mut out: Vec<Option<i64>> = Vec::with_capacity(values.len());
    for opt in values.iter() {
        match opt.map(str::trim) {
            None => out.push(None),
            Some("") => out.push(None),
            Some(raw) => match parse_datetime(raw) {
                Some(dt) => out.push(Some(dt.and_utc().timestamp_micros())),
                None => return Err(coercion(header, raw)),
            },
        }
    }

    let ca = Int64Chunked::from_iter_options(header.name.as_str().into(), out.into_iter());
    Ok(ca
        .into_datetime(TimeUnit::Microseconds, None)
        .into_series()
        .into_column())
}

/// Parses the boolean spellings commonly found in hand-edited tables.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Parses ISO-style datetime values: full timestamps with `T` or space
/// separators (optional fractional seconds, optional seconds), and bare
/// dates, which land at midnight.
fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn coercion(header: &Header, value: &str) -> CastError {
    CastError::Coercion {
        column: header.name.clone(),
        datatype: header.datatype,
        value: value.to_string(),
    }
}

fn unsupported(header: &Header, from: &PlType) -> CastError {
    CastError::Unsupported {
        column: header.name.clone(),
        datatype: header.datatype,
        from: format!("{from:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn str_frame(columns: &[(&str, &[&str])]) -> DataFrame {
        let cols: Vec<Column> = columns
            .iter()
            .map(|(name, values)| {
                Series::new(
                    (*name).into(),
                    values.iter().copied().map(String::from).collect::<Vec<_>>(),
                )
                .into_column()
            })
            .collect();
        DataFrame::new(cols).unwrap()
    }

    fn header(name: &str, datatype: DataType, include: bool) -> Header {
        Header::new(name)
            .with_datatype(datatype)
            .with_include(include)
    }

    #[test]
    fn test_excluded_columns_are_dropped() {
        let df = str_frame(&[("id", &["1"]), ("junk", &["x"]), ("text", &["doc"])]);
        let headers = vec![
            header("id", DataType::String, true),
            header("junk", DataType::String, false),
            header("text", DataType::String, true),
        ];

        let out = cast_frame(&df, &headers).unwrap();
        let names: Vec<String> = out
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["id", "text"]);
    }

    #[test]
    fn test_output_follows_header_order() {
        let df = str_frame(&[("b", &["1"]), ("a", &["2"])]);
        let headers = vec![
            header("a", DataType::String, true),
            header("b", DataType::String, true),
        ];

        let out = cast_frame(&df, &headers).unwrap();
        let names: Vec<String> = out
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_number_cast_from_strings() {
        let df = str_frame(&[("year", &["2001", " 2002 ", ""])]);
        let headers = vec![header("year", DataType::Number, true)];

        let out = cast_frame(&df, &headers).unwrap();
        let years = out.column("year").unwrap();
        assert_eq!(years.dtype(), &PlType::Float64);
        let values: Vec<Option<f64>> = years.f64().unwrap().iter().collect();
        assert_eq!(values, vec![Some(2001.0), Some(2002.0), None]);
    }

    #[test]
    fn test_number_cast_failure_names_column() {
        let df = str_frame(&[("year", &["2001", "about 2002"])]);
        let headers = vec![header("year", DataType::Number, true)];

        let err = cast_frame(&df, &headers).unwrap_err();
        assert!(matches!(
            err,
            CastError::Coercion { ref column, datatype: DataType::Number, ref value }
                if column == "year" && value == "about 2002"
        ));
    }

    #[test]
    fn test_boolean_cast_spellings() {
        let df = str_frame(&[("flag", &["true", "N", "1", "no", ""])]);
        let headers = vec![header("flag", DataType::Boolean, true)];

        let out = cast_frame(&df, &headers).unwrap();
        let values: Vec<Option<bool>> = out.column("flag").unwrap().bool().unwrap().iter().collect();
        assert_eq!(
            values,
            vec![Some(true), Some(false), Some(true), Some(false), None]
        );
    }

    #[test]
    fn test_datetime_cast_full_and_date_only() {
        let df = str_frame(&[("when", &["2024-01-15T08:30:00", "2024-01-16"])]);
        let headers = vec![header("when", DataType::Datetime, true)];

        let out = cast_frame(&df, &headers).unwrap();
        assert_eq!(
            out.column("when").unwrap().dtype(),
            &PlType::Datetime(TimeUnit::Microseconds, None)
        );
    }

    #[test]
    fn test_datetime_cast_rejects_garbage() {
        let df = str_frame(&[("when", &["last tuesday"])]);
        let headers = vec![header("when", DataType::Datetime, true)];

        let err = cast_frame(&df, &headers).unwrap_err();
        assert!(matches!(err, CastError::Coercion { .. }));
    }

    #[test]
    fn test_cast_is_idempotent() {
        let df = str_frame(&[
            ("id", &["1", "2"]),
            ("score", &["0.5", "1.5"]),
            ("flag", &["yes", "no"]),
            ("when", &["2024-01-15", "2024-02-20"]),
        ]);
        let headers = vec![
            header("id", DataType::Category, true),
            header("score", DataType::Number, true),
            header("flag", DataType::Boolean, true),
            header("when", DataType::Datetime, true),
        ];

        let once = cast_frame(&df, &headers).unwrap();
        let twice = cast_frame(&once, &headers).unwrap();
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let df = str_frame(&[("id", &["1"])]);
        let headers = vec![header("ghost", DataType::String, true)];

        let err = cast_frame(&df, &headers).unwrap_err();
        assert!(matches!(
            err,
            CastError::ColumnMissing { ref column } if column == "ghost"
        ));
    }

    #[test]
    fn test_category_is_string_backed() {
        let df = str_frame(&[("genre", &["news", "fiction"])]);
        let headers = vec![header("genre", DataType::Category, true)];

        let out = cast_frame(&df, &headers).unwrap();
        assert_eq!(out.column("genre").unwrap().dtype(), &PlType::String);
    }
}
