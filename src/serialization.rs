//! JSON persistence for interpolation tables.
//!
//! The wire shape is plain nested `[coordinate, payload]` arrays (see
//! [`crate::table::Level`]); any producer that preserves nested-array shape
//! and numeric precision can feed [`read_table`]. Loaded tables are
//! structurally validated before being handed to the caller, so a table that
//! reads back successfully is safe to interpolate.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::errors::LutError;
use crate::table::Level;

/// Read a table from a JSON file and validate its structure (uniform depth,
/// unique per-level coordinates).
pub fn read_table<E: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Level<E>, LutError>
{
    let bytes = std::fs::read(path).map_err(|_| LutError::FileIOError)?;
    let table = from_json(&bytes)?;
    table.validate()?;
    Ok(table)
}

/// Write a table to a JSON file.
pub fn write_table<E: Serialize>(table: &Level<E>, path: impl AsRef<Path>) -> Result<(), LutError>
{
    let bytes = to_json(table)?;
    std::fs::write(path, bytes).map_err(|_| LutError::FileIOError)
}

/// Parse a table from JSON bytes without touching the filesystem. Does not
/// validate; callers holding untrusted data should follow up with
/// [`Level::validate`].
pub fn from_json<E: DeserializeOwned>(bytes: &[u8]) -> Result<Level<E>, LutError>
{
    serde_json::from_slice(bytes).map_err(|_| LutError::DeserializationFailed)
}

/// Serialize a table to JSON bytes.
pub fn to_json<E: Serialize>(table: &Level<E>) -> Result<Vec<u8>, LutError>
{
    serde_json::to_vec(table).map_err(|_| LutError::SerializationFailed)
}

#[cfg(test)]
fn two_d_table() -> Level<f64>
{
    Level::Table(vec![
        (0.0, Level::Table(vec![(0.0, Level::Leaf(1.0)), (1.0, Level::Leaf(2.0))])),
        (1.0, Level::Table(vec![(0.0, Level::Leaf(3.0)), (1.0, Level::Leaf(4.0))])),
    ])
}

#[test]
fn check_json_shape()
{
    let table = two_d_table();
    let json = String::from_utf8(to_json(&table).unwrap()).unwrap();
    assert_eq!(json, "[[0.0,[[0.0,1.0],[1.0,2.0]]],[1.0,[[0.0,3.0],[1.0,4.0]]]]");
    let parsed: Level<f64> = from_json(json.as_bytes()).unwrap();
    assert_eq!(parsed, table);
}

#[test]
fn check_read_write_table()
{
    let table = two_d_table();
    let path = std::env::temp_dir().join("lutable_check_read_write_table.json");
    write_table(&table, &path).expect("Could not write table.");
    let loaded: Level<f64> = read_table(&path).expect("Could not read table.");
    assert_eq!(loaded, table);
    std::fs::remove_file(&path).ok();
}

#[test]
fn check_read_table_rejects_duplicates()
{
    let path = std::env::temp_dir().join("lutable_check_read_table_rejects_duplicates.json");
    std::fs::write(&path, "[[1.0,10.0],[1.0,20.0]]").unwrap();
    let result: Result<Level<f64>, _> = read_table(&path);
    assert_eq!(result, Err(LutError::DuplicateCoordinate));
    std::fs::remove_file(&path).ok();
}

#[test]
fn check_read_table_missing_file()
{
    let result: Result<Level<f64>, _> = read_table("/nonexistent/lutable.json");
    assert_eq!(result, Err(LutError::FileIOError));
}

#[test]
fn check_from_json_malformed()
{
    let result: Result<Level<f64>, _> = from_json(b"not json");
    assert_eq!(result, Err(LutError::DeserializationFailed));
}
