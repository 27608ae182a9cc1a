//! Nested interpolation table: one level per input dimension.
//!
//! A table is a list of `(coordinate, child)` anchors; each child is either
//! another level (earlier dimensions) or a terminal payload (the deepest
//! dimension). The untagged serde representation keeps the on-disk shape as
//! plain nested `[coordinate, payload]` arrays, e.g. a two-dimensional table
//! of numbers:
//!
//! ```json
//! [[0.0, [[0.0, 1.0], [1.0, 2.0]]],
//!  [1.0, [[0.0, 3.0], [1.0, 4.0]]]]
//! ```
//!
//! Tables are owned by the caller and never mutated by any lookup. Anchors
//! may appear in any order within a level, but coordinates within one level
//! must be unique.

use serde::{Deserialize, Serialize};

use crate::errors::LutError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Level<E>
{
    /// A nested table level: anchors for one dimension. Tried first during
    /// deserialization so payloads that happen to deserialize from arrays do
    /// not shadow table structure.
    Table(Vec<(f64, Level<E>)>),
    /// A terminal payload at the deepest dimension.
    Leaf(E),
}

impl<E> Level<E>
{
    /// Number of dimensions below this node, taking the first anchor of each
    /// level as representative. A leaf has depth 0. Use [`Level::validate`]
    /// to confirm every branch agrees.
    pub fn depth(&self) -> usize
    {
        match self
        {
            Level::Leaf(_) => 0,
            Level::Table(entries) => match entries.first()
            {
                Some((_, child)) => 1 + child.depth(),
                None => 1,
            },
        }
    }

    /// The anchors of this level, or `None` for a leaf.
    pub fn as_table(&self) -> Option<&[(f64, Level<E>)]>
    {
        match self
        {
            Level::Table(entries) => Some(entries),
            Level::Leaf(_) => None,
        }
    }

    /// Check structural soundness and return the table depth: every leaf at
    /// the same depth (`RaggedTable` otherwise) and no repeated coordinate
    /// within any level (`DuplicateCoordinate`). An empty level counts as
    /// depth 1; lookups against it fail with `InsufficientEntries`.
    pub fn validate(&self) -> Result<usize, LutError>
    {
        match self
        {
            Level::Leaf(_) => Ok(0),
            Level::Table(entries) =>
            {
                let mut coordinates: Vec<f64> = entries.iter().map(|entry| entry.0).collect();
                coordinates.sort_by(f64::total_cmp);
                if coordinates.windows(2).any(|pair| pair[0] == pair[1])
                {
                    return Err(LutError::DuplicateCoordinate);
                }
                let mut child_depth = None;
                for (_, child) in entries
                {
                    let depth = child.validate()?;
                    if *child_depth.get_or_insert(depth) != depth
                    {
                        return Err(LutError::RaggedTable);
                    }
                }
                Ok(1 + child_depth.unwrap_or(0))
            }
        }
    }
}

#[test]
fn check_depth_and_validate()
{
    let table: Level<f64> = Level::Table(vec![
        (0.0, Level::Table(vec![(0.0, Level::Leaf(1.0)), (1.0, Level::Leaf(2.0))])),
        (1.0, Level::Table(vec![(0.0, Level::Leaf(3.0)), (1.0, Level::Leaf(4.0))])),
    ]);
    assert_eq!(table.depth(), 2);
    assert_eq!(table.validate().unwrap(), 2);
    assert!(table.as_table().is_some());
    assert!(Level::Leaf(1.0).as_table().is_none());
}

#[test]
fn check_validate_duplicate_coordinate()
{
    let table: Level<f64> = Level::Table(vec![(1.0, Level::Leaf(1.0)), (1.0, Level::Leaf(2.0))]);
    assert_eq!(table.validate(), Err(LutError::DuplicateCoordinate));
    let nested: Level<f64> = Level::Table(vec![
        (0.0, Level::Table(vec![(2.0, Level::Leaf(1.0)), (2.0, Level::Leaf(2.0))])),
    ]);
    assert_eq!(nested.validate(), Err(LutError::DuplicateCoordinate));
}

#[test]
fn check_validate_ragged_table()
{
    let table: Level<f64> = Level::Table(vec![
        (0.0, Level::Leaf(1.0)),
        (1.0, Level::Table(vec![(0.0, Level::Leaf(2.0))])),
    ]);
    assert_eq!(table.validate(), Err(LutError::RaggedTable));
}
