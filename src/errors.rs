use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LutError
{
    /// A table level held fewer than two anchors and the probe did not match
    /// the sole anchor exactly. Carries the zero-based nesting level.
    InsufficientEntries(usize),
    /// Probe vector length does not match table depth.
    DimensionMismatch,
    /// Two anchors within one level share a coordinate.
    DuplicateCoordinate,
    /// Leaves of the table do not all sit at the same depth.
    RaggedTable,
    FileIOError,
    SerializationFailed,
    DeserializationFailed,
}
impl std::error::Error for LutError {}

impl Display for LutError
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", *self)
    }
}
