//! Scalar interpolation over a one-dimensional list of `(coordinate, payload)`
//! anchors.
//!
//! If an anchor's coordinate matches the probe exactly, its payload is
//! returned unchanged and the interpolator is never invoked. Otherwise the
//! interpolator runs exactly once with the two bracketing payloads and a
//! normalized factor: `0.5` means halfway between them, values outside
//! `[0,1]` mean the probe fell outside the table's range and the bracket is
//! the two outermost anchors (extrapolation). Interpolators that cannot
//! extrapolate should reject factors outside `[0,1]` themselves.

use crate::bracket::{bracket_by, Bracket, ExtrapolationPolicy};
use crate::errors::LutError;

/// Interpolate a payload at `value` from anchors sorted ascending by
/// coordinate. Requires at least two anchors unless one matches `value`
/// exactly; otherwise fails with `InsufficientEntries`.
pub fn sorted_interpolate<E: Clone>(
    value: f64,
    entries: &[(f64, E)],
    interpolator: impl FnOnce(f64, f64, &E, &E) -> E,
) -> Result<E, LutError>
{
    match bracket_by(value, entries, |entry| entry.0, ExtrapolationPolicy::Extrapolate, 0)?
    {
        Bracket::Collapsed(index) => Ok(entries[index].1.clone()),
        Bracket::Span { lower, upper, factor } =>
        {
            Ok(interpolator(value, factor, &entries[lower].1, &entries[upper].1))
        }
    }
}

/// Same as [`sorted_interpolate`] but accepts anchors in any order. The
/// caller's slice is read through a sorted view and never mutated.
pub fn interpolate<E: Clone>(
    value: f64,
    entries: &[(f64, E)],
    interpolator: impl FnOnce(f64, f64, &E, &E) -> E,
) -> Result<E, LutError>
{
    let mut sorted: Vec<&(f64, E)> = entries.iter().collect();
    sorted.sort_by(|entry0, entry1| entry0.0.total_cmp(&entry1.0));
    match bracket_by(value, &sorted, |entry| entry.0, ExtrapolationPolicy::Extrapolate, 0)?
    {
        Bracket::Collapsed(index) => Ok(sorted[index].1.clone()),
        Bracket::Span { lower, upper, factor } =>
        {
            Ok(interpolator(value, factor, &sorted[lower].1, &sorted[upper].1))
        }
    }
}

/// Interpolate over arbitrary records in any order, reading each record's
/// coordinate through `key`.
pub fn interpolate_by<T: Clone>(
    value: f64,
    items: &[T],
    key: impl Fn(&T) -> f64,
    interpolator: impl FnOnce(f64, f64, &T, &T) -> T,
) -> Result<T, LutError>
{
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|item0, item1| key(item0).total_cmp(&key(item1)));
    match bracket_by(value, &sorted, |item| key(item), ExtrapolationPolicy::Extrapolate, 0)?
    {
        Bracket::Collapsed(index) => Ok(sorted[index].clone()),
        Bracket::Span { lower, upper, factor } =>
        {
            Ok(interpolator(value, factor, sorted[lower], sorted[upper]))
        }
    }
}

#[cfg(test)]
fn describe(value: f64, factor: f64, lower: &String, upper: &String) -> String
{
    format!("{value}={lower}:{upper}:{factor}")
}

#[cfg(test)]
fn string_entries() -> Vec<(f64, String)>
{
    vec![(1.0, "a".to_string()), (2.0, "b".to_string()), (3.0, "c".to_string())]
}

#[test]
fn check_interpolate_above_max()
{
    assert_eq!(interpolate(4.0, &string_entries(), describe).unwrap(), "4=b:c:2");
}

#[test]
fn check_interpolate_below_min()
{
    assert_eq!(interpolate(0.0, &string_entries(), describe).unwrap(), "0=a:b:-1");
}

#[test]
fn check_interpolate_in_range()
{
    assert_eq!(interpolate(1.25, &string_entries(), describe).unwrap(), "1.25=a:b:0.25");
}

#[test]
fn check_interpolate_exact_matches()
{
    let entries = string_entries();
    for (coordinate, payload) in &entries
    {
        let result = interpolate(*coordinate, &entries, |_, _, _, _| panic!("interpolator must not run")).unwrap();
        assert_eq!(&result, payload);
    }
}

#[test]
fn check_interpolate_unsorted_input()
{
    let entries = vec![(3.0, "c".to_string()), (1.0, "a".to_string()), (2.0, "b".to_string())];
    assert_eq!(interpolate(1.25, &entries, describe).unwrap(), "1.25=a:b:0.25");
    // caller's order is untouched
    assert_eq!(entries[0].0, 3.0);
}

#[test]
fn check_interpolate_insufficient_entries()
{
    let empty: Vec<(f64, String)> = vec![];
    assert_eq!(interpolate(1.0, &empty, describe), Err(LutError::InsufficientEntries(0)));
    let single = vec![(1.0, "a".to_string())];
    assert_eq!(interpolate(2.0, &single, describe), Err(LutError::InsufficientEntries(0)));
    // but a single anchor that matches exactly is fine
    assert_eq!(interpolate(1.0, &single, describe).unwrap(), "a");
}

#[test]
fn check_sorted_interpolate_factor()
{
    use crate::utilities::float::lerp;
    let entries = [(0.0, 10.0), (4.0, 20.0)];
    let value = sorted_interpolate(3.0, &entries, |_, factor, lower, upper|
    {
        assert_eq!(factor, 0.75);
        lerp(factor, *lower, *upper)
    }).unwrap();
    assert_eq!(value, 17.5);
}

#[test]
fn check_interpolate_by()
{
    #[derive(Clone, Debug, PartialEq)]
    struct Sample
    {
        coordinate: f64,
        name: String,
    }
    let samples = vec![
        Sample { coordinate: 2.0, name: "b".to_string() },
        Sample { coordinate: 0.0, name: "a".to_string() },
    ];
    let result = interpolate_by(1.0, &samples, |sample| sample.coordinate, |value, factor, lower, upper|
    {
        Sample { coordinate: value, name: format!("{}={}:{}:{}", value, lower.name, upper.name, factor) }
    }).unwrap();
    assert_eq!(result, Sample { coordinate: 1.0, name: "1=a:b:0.5".to_string() });
}
