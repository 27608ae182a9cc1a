//! Adjacency lookup: find the anchors surrounding a probe without ever
//! extrapolating. Out-of-range probes clamp to the nearest boundary anchor,
//! so the result is always one payload (boundary or exact match) or the two
//! bracketing payloads. No combiner is involved; callers merge as they wish.

use crate::bracket::{bracket_by, Bracket, ExtrapolationPolicy};
use crate::errors::LutError;

/// Pick the payloads adjacent to `value` from anchors sorted ascending by
/// coordinate. Returns the index of the lower (or sole) bracketing anchor and
/// one or two borrowed payloads. Fails with `InsufficientEntries` only on an
/// empty list.
pub fn sorted_pick_adjacent<'a, E>(value: f64, entries: &'a [(f64, E)]) -> Result<(usize, Vec<&'a E>), LutError>
{
    match bracket_by(value, entries, |entry| entry.0, ExtrapolationPolicy::Clamp, 0)?
    {
        Bracket::Collapsed(index) => Ok((index, vec![&entries[index].1])),
        Bracket::Span { lower, upper, .. } => Ok((lower, vec![&entries[lower].1, &entries[upper].1])),
    }
}

/// Same as [`sorted_pick_adjacent`] but accepts anchors in any order. The
/// returned index refers to the ascending-by-coordinate order, not the
/// caller's order.
pub fn pick_adjacent<'a, E>(value: f64, entries: &'a [(f64, E)]) -> Result<(usize, Vec<&'a E>), LutError>
{
    pick_adjacent_by(value, entries, |entry| entry.0).map(|(index, records)|
    {
        (index, records.into_iter().map(|record| &record.1).collect())
    })
}

/// Adjacency lookup over arbitrary records in any order, reading each
/// record's coordinate through `key`. Returns whole records rather than
/// payloads; the index refers to the ascending-by-`key` order.
pub fn pick_adjacent_by<'a, T>(
    value: f64,
    items: &'a [T],
    key: impl Fn(&T) -> f64,
) -> Result<(usize, Vec<&'a T>), LutError>
{
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|item0, item1| key(item0).total_cmp(&key(item1)));
    match bracket_by(value, &sorted, |item| key(item), ExtrapolationPolicy::Clamp, 0)?
    {
        Bracket::Collapsed(index) => Ok((index, vec![sorted[index]])),
        Bracket::Span { lower, upper, .. } => Ok((lower, vec![sorted[lower], sorted[upper]])),
    }
}

#[cfg(test)]
fn two_entries() -> Vec<(f64, String)>
{
    vec![(100.0, "abc".to_string()), (200.0, "def".to_string())]
}

#[test]
fn check_pick_adjacent_below_range()
{
    let entries = two_entries();
    let (index, picked) = sorted_pick_adjacent(0.0, &entries).unwrap();
    assert_eq!(index, 0);
    assert_eq!(picked, vec!["abc"]);
}

#[test]
fn check_pick_adjacent_above_range()
{
    let entries = two_entries();
    let (index, picked) = sorted_pick_adjacent(300.0, &entries).unwrap();
    assert_eq!(index, 1);
    assert_eq!(picked, vec!["def"]);
}

#[test]
fn check_pick_adjacent_in_range()
{
    let entries = two_entries();
    let (index, picked) = sorted_pick_adjacent(150.0, &entries).unwrap();
    assert_eq!(index, 0);
    assert_eq!(picked, vec!["abc", "def"]);
}

#[test]
fn check_pick_adjacent_exact_match()
{
    let entries = two_entries();
    let (index, picked) = sorted_pick_adjacent(200.0, &entries).unwrap();
    assert_eq!(index, 1);
    assert_eq!(picked, vec!["def"]);
}

#[test]
fn check_pick_adjacent_single_and_empty()
{
    let single = vec![(10.0, "only".to_string())];
    let (index, picked) = sorted_pick_adjacent(999.0, &single).unwrap();
    assert_eq!(index, 0);
    assert_eq!(picked, vec!["only"]);
    let empty: Vec<(f64, String)> = vec![];
    assert_eq!(sorted_pick_adjacent(0.0, &empty), Err(LutError::InsufficientEntries(0)));
}

#[test]
fn check_pick_adjacent_unsorted()
{
    let entries = vec![(200.0, "def".to_string()), (100.0, "abc".to_string())];
    let (index, picked) = pick_adjacent(150.0, &entries).unwrap();
    assert_eq!(index, 0);
    assert_eq!(picked, vec!["abc", "def"]);
}

#[test]
fn check_pick_adjacent_by_key()
{
    struct Sample
    {
        coordinate: f64,
        name: &'static str,
    }
    let samples = vec![
        Sample { coordinate: 2.0, name: "b" },
        Sample { coordinate: 0.0, name: "a" },
        Sample { coordinate: 4.0, name: "c" },
    ];
    let (index, picked) = pick_adjacent_by(3.0, &samples, |sample| sample.coordinate).unwrap();
    assert_eq!(index, 1);
    assert_eq!(picked.iter().map(|sample| sample.name).collect::<Vec<_>>(), vec!["b", "c"]);
}
