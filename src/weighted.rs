//! Multidimensional weighted interpolation.
//!
//! The engine descends an n-level [`Level`] table, one probe coordinate per
//! level, bracketing at each level with the same semantics as
//! [`crate::interpolation::interpolate`] (anchors in any order, exact match
//! collapses the bracket, out-of-range probes extrapolate). Alongside the
//! blended value it reconstructs the contribution of every terminal payload
//! that participated: each leaf's weight is the product of its per-level
//! proximities, exactly the corner weights of multilinear interpolation over
//! an n-dimensional hypercube.
//!
//! Every call is pure and allocates only transient state, so a table shared
//! across threads can be interpolated concurrently without synchronization.
//! Recursion depth equals table depth. Without exact matches the descent
//! visits both children at every level, so a D-dimensional probe performs
//! O(2^D) deepest-level blends; this is inherent, since the weight walk
//! needs the payload reached by every hypercube corner. An exact match at a
//! level collapses one branch and halves the remaining work below it.

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

use crate::bracket::{bracket_by, Bracket, ExtrapolationPolicy};
use crate::errors::LutError;
use crate::table::Level;

/// Blended value plus the contribution of every participating leaf.
///
/// `weights` borrows leaves from the caller's table, holds each distinct leaf
/// (by table position) at most once, and is sorted by descending weight.
/// When every per-level factor lies in `[0,1]` the weights sum to 1.0 within
/// floating-point tolerance; extrapolation at any level can push individual
/// weights below 0 or above 1.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedInterpolation<'a, E>
{
    pub value: E,
    pub weights: Vec<(&'a E, f64)>,
}

/// Interpolate `table` at `probe`, one coordinate per table level
/// (`probe[0]` addresses the outermost level).
///
/// The interpolator receives `(probe coordinate, factor, lower, upper)` for
/// each blend, deepest level first; an exact match at a level skips the
/// blend for that branch. Fails with `InsufficientEntries` if any visited
/// level cannot bracket its coordinate, and with `DimensionMismatch` if the
/// probe length differs from the table depth.
pub fn weighted_interpolate<'a, E, F>(
    probe: &[f64],
    table: &'a Level<E>,
    mut interpolator: F,
) -> Result<WeightedInterpolation<'a, E>, LutError>
where
    E: Clone,
    F: FnMut(f64, f64, &E, &E) -> E,
{
    if probe.is_empty()
    {
        return Err(LutError::DimensionMismatch);
    }
    let (value, root) = descend(probe, table, 0, &mut interpolator)?;
    let mut merge = WeightMerge::new();
    merge.walk(&root, 1.0);
    let mut weights = merge.weights;
    weights.sort_by(|entry0, entry1| entry1.1.total_cmp(&entry0.1));
    Ok(WeightedInterpolation { value, weights })
}

/// Interpolate many probes against one table in parallel.
pub fn weighted_interpolate_batch<'a, E, F>(
    probes: &[Vec<f64>],
    table: &'a Level<E>,
    interpolator: F,
) -> Result<Vec<WeightedInterpolation<'a, E>>, LutError>
where
    E: Clone + Send + Sync,
    F: Fn(f64, f64, &E, &E) -> E + Send + Sync,
{
    probes.par_iter().map(|probe| weighted_interpolate(probe, table, &interpolator)).collect()
}

/// Transient record of one level's bracket on the path taken by the probe.
/// Built bottom-up during the descent, consumed by the weight walk, then
/// dropped; nothing survives the call.
enum Slot<'a, E>
{
    /// Deepest level, probe landed on an anchor.
    Anchor(&'a E),
    /// Deepest level, two terminal payloads blended.
    Blend { factor: f64, lower: &'a E, upper: &'a E },
    /// Intermediate level collapsed onto a single child by an exact match;
    /// the running weight passes through untouched.
    Pass(Box<Slot<'a, E>>),
    /// Intermediate level blended two child subtrees.
    Branch { factor: f64, lower: Box<Slot<'a, E>>, upper: Box<Slot<'a, E>> },
}

fn descend<'a, E, F>(
    probe: &[f64],
    table: &'a Level<E>,
    level: usize,
    interpolator: &mut F,
) -> Result<(E, Slot<'a, E>), LutError>
where
    E: Clone,
    F: FnMut(f64, f64, &E, &E) -> E,
{
    let entries = table.as_table().ok_or(LutError::DimensionMismatch)?;
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&index0, &index1| entries[index0].0.total_cmp(&entries[index1].0));
    let outcome = bracket_by(probe[0], &order, |&index| entries[index].0, ExtrapolationPolicy::Extrapolate, level)?;
    let deepest = probe.len() == 1;
    match outcome
    {
        Bracket::Collapsed(position) =>
        {
            let child = &entries[order[position]].1;
            if deepest
            {
                match child
                {
                    Level::Leaf(payload) => Ok((payload.clone(), Slot::Anchor(payload))),
                    Level::Table(_) => Err(LutError::DimensionMismatch),
                }
            }
            else
            {
                let (value, slot) = descend(&probe[1..], child, level + 1, interpolator)?;
                Ok((value, Slot::Pass(Box::new(slot))))
            }
        }
        Bracket::Span { lower, upper, factor } =>
        {
            let lower_child = &entries[order[lower]].1;
            let upper_child = &entries[order[upper]].1;
            if deepest
            {
                match (lower_child, upper_child)
                {
                    (Level::Leaf(lower_payload), Level::Leaf(upper_payload)) =>
                    {
                        let value = interpolator(probe[0], factor, lower_payload, upper_payload);
                        Ok((value, Slot::Blend { factor, lower: lower_payload, upper: upper_payload }))
                    }
                    _ => Err(LutError::DimensionMismatch),
                }
            }
            else
            {
                let (lower_value, lower_slot) = descend(&probe[1..], lower_child, level + 1, interpolator)?;
                let (upper_value, upper_slot) = descend(&probe[1..], upper_child, level + 1, interpolator)?;
                let value = interpolator(probe[0], factor, &lower_value, &upper_value);
                Ok((value, Slot::Branch { factor, lower: Box::new(lower_slot), upper: Box::new(upper_slot) }))
            }
        }
    }
}

/// Accumulates per-leaf weights during the depth-first walk, merging
/// contributions that reach the same table position. Leaves are keyed by
/// address, which for a caller-owned table is position identity: equal
/// payload values at different positions stay distinct.
struct WeightMerge<'a, E>
{
    weights: Vec<(&'a E, f64)>,
    positions: FxHashMap<*const E, usize>,
}

impl<'a, E> WeightMerge<'a, E>
{
    fn new() -> Self
    {
        Self { weights: Vec::new(), positions: FxHashMap::default() }
    }

    fn add(&mut self, leaf: &'a E, weight: f64)
    {
        match self.positions.entry(leaf as *const E)
        {
            Entry::Occupied(position) => self.weights[*position.get()].1 += weight,
            Entry::Vacant(position) =>
            {
                position.insert(self.weights.len());
                self.weights.push((leaf, weight));
            }
        }
    }

    fn walk(&mut self, slot: &Slot<'a, E>, weight: f64)
    {
        match slot
        {
            Slot::Anchor(leaf) => self.add(leaf, weight),
            Slot::Blend { factor, lower, upper } =>
            {
                self.add(lower, weight * (1.0 - factor));
                self.add(upper, weight * factor);
            }
            Slot::Pass(inner) => self.walk(inner, weight),
            Slot::Branch { factor, lower, upper } =>
            {
                self.walk(lower, weight * (1.0 - factor));
                self.walk(upper, weight * factor);
            }
        }
    }
}

#[cfg(test)]
use crate::utilities::float::lerp;

/// Three-level table of f(x, y, z) = 4x + 2y + z over the unit cube corners.
#[cfg(test)]
fn unit_cube_table() -> Level<f64>
{
    let inner = |x: f64, y: f64| Level::Table(vec![
        (0.0, Level::Leaf(4.0 * x + 2.0 * y)),
        (1.0, Level::Leaf(4.0 * x + 2.0 * y + 1.0)),
    ]);
    Level::Table(vec![
        (0.0, Level::Table(vec![(0.0, inner(0.0, 0.0)), (1.0, inner(0.0, 1.0))])),
        (1.0, Level::Table(vec![(0.0, inner(1.0, 0.0)), (1.0, inner(1.0, 1.0))])),
    ])
}

#[cfg(test)]
fn blend(_: f64, factor: f64, lower: &f64, upper: &f64) -> f64
{
    lerp(factor, *lower, *upper)
}

#[test]
fn check_weighted_exact_match_all_levels()
{
    let table = unit_cube_table();
    let result = weighted_interpolate(&[1.0, 0.0, 1.0], &table, blend).unwrap();
    assert_eq!(result.value, 5.0);
    assert_eq!(result.weights.len(), 1);
    assert_eq!(*result.weights[0].0, 5.0);
    assert_eq!(result.weights[0].1, 1.0);
}

#[test]
fn check_weighted_full_interpolation()
{
    let table = unit_cube_table();
    let result = weighted_interpolate(&[0.5, 0.25, 0.75], &table, blend).unwrap();
    assert!((result.value - (4.0 * 0.5 + 2.0 * 0.25 + 0.75)).abs() < 1e-12);
    assert_eq!(result.weights.len(), 8);
    let total: f64 = result.weights.iter().map(|entry| entry.1).sum();
    assert!((total - 1.0).abs() < 1e-9);
    // corner (x=0, y=0, z=1): 0.5 * 0.75 * 0.75
    let heaviest = result.weights[0];
    assert_eq!(*heaviest.0, 1.0);
    assert!((heaviest.1 - 0.5 * 0.75 * 0.75).abs() < 1e-12);
    // descending order
    for pair in result.weights.windows(2)
    {
        assert!(pair[0].1 >= pair[1].1);
    }
}

#[test]
fn check_weighted_middle_level_collapse()
{
    let table = unit_cube_table();
    // exact match on y halves the leaf count
    let result = weighted_interpolate(&[0.5, 1.0, 0.5], &table, blend).unwrap();
    assert_eq!(result.weights.len(), 4);
    let total: f64 = result.weights.iter().map(|entry| entry.1).sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!((result.value - (4.0 * 0.5 + 2.0 + 0.5)).abs() < 1e-12);
}

#[test]
fn check_weighted_extrapolation_weights()
{
    let table: Level<f64> = Level::Table(vec![(0.0, Level::Leaf(10.0)), (1.0, Level::Leaf(20.0))]);
    let result = weighted_interpolate(&[2.0], &table, blend).unwrap();
    assert_eq!(result.value, 30.0);
    assert_eq!(result.weights.len(), 2);
    // factor 2 puts weight 2 on the upper leaf and -1 on the lower
    assert_eq!(*result.weights[0].0, 20.0);
    assert_eq!(result.weights[0].1, 2.0);
    let total: f64 = result.weights.iter().map(|entry| entry.1).sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(result.weights.iter().any(|entry| entry.1 < 0.0));
}

#[test]
fn check_weighted_idempotent_at_anchors()
{
    let table = unit_cube_table();
    for x in [0.0, 1.0]
    {
        for y in [0.0, 1.0]
        {
            for z in [0.0, 1.0]
            {
                let result = weighted_interpolate(&[x, y, z], &table, blend).unwrap();
                assert_eq!(result.value, 4.0 * x + 2.0 * y + z);
                assert_eq!(result.weights.len(), 1);
                assert_eq!(result.weights[0].1, 1.0);
            }
        }
    }
}

#[test]
fn check_weighted_insufficient_entries_propagates()
{
    // the upper branch of the outer level has a single non-matching anchor
    let table: Level<f64> = Level::Table(vec![
        (0.0, Level::Table(vec![(0.0, Level::Leaf(1.0)), (1.0, Level::Leaf(2.0))])),
        (1.0, Level::Table(vec![(0.0, Level::Leaf(3.0))])),
    ]);
    assert_eq!(weighted_interpolate(&[0.5, 0.5], &table, blend), Err(LutError::InsufficientEntries(1)));
    // but a probe that matches the sole anchor exactly descends fine
    let result = weighted_interpolate(&[0.5, 0.0], &table, blend).unwrap();
    assert!((result.value - 2.0).abs() < 1e-12);
}

#[test]
fn check_weighted_dimension_mismatch()
{
    let table = unit_cube_table();
    assert_eq!(weighted_interpolate(&[], &table, blend), Err(LutError::DimensionMismatch));
    assert_eq!(weighted_interpolate(&[0.5], &table, blend), Err(LutError::DimensionMismatch));
    assert_eq!(weighted_interpolate(&[0.5, 0.5, 0.5, 0.5], &table, blend), Err(LutError::DimensionMismatch));
}

#[test]
fn check_weighted_unsorted_levels()
{
    let table: Level<f64> = Level::Table(vec![
        (1.0, Level::Table(vec![(1.0, Level::Leaf(6.0)), (0.0, Level::Leaf(4.0))])),
        (0.0, Level::Table(vec![(0.0, Level::Leaf(0.0)), (1.0, Level::Leaf(2.0))])),
    ]);
    let result = weighted_interpolate(&[0.5, 0.5], &table, blend).unwrap();
    assert!((result.value - 3.0).abs() < 1e-12);
    let total: f64 = result.weights.iter().map(|entry| entry.1).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn check_weighted_batch_matches_scalar()
{
    let table = unit_cube_table();
    let probes: Vec<Vec<f64>> = (0..32).map(|index|
    {
        let step = index as f64 / 32.0;
        vec![step, 1.0 - step, 0.5 * step]
    }).collect();
    let batch = weighted_interpolate_batch(&probes, &table, blend).unwrap();
    assert_eq!(batch.len(), probes.len());
    for (probe, result) in probes.iter().zip(&batch)
    {
        let scalar = weighted_interpolate(probe, &table, blend).unwrap();
        assert_eq!(result.value, scalar.value);
        assert_eq!(result.weights, scalar.weights);
    }
}
