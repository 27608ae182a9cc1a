use crate::errors::LutError;

/// How a lookup treats a probe outside the coordinate range of a level.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ExtrapolationPolicy
{
    /// Project beyond the range using the two outermost anchors; the factor
    /// leaves `[0,1]`.
    #[default]
    Extrapolate,
    /// Collapse onto the nearest boundary anchor.
    Clamp,
}

/// Outcome of a bracket search over one ascending-sorted level.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Bracket
{
    /// The probe landed on a single anchor (exact match, or a clamped
    /// boundary); no blending is needed.
    Collapsed(usize),
    /// The probe falls between (or, when extrapolating, beyond) two anchors.
    /// `factor` is `(v - c_lower) / (c_upper - c_lower)`.
    Span { lower: usize, upper: usize, factor: f64 },
}

/// Locate the anchors bracketing `value` within `items`, which must be sorted
/// ascending by `key`. Coordinates within a level must be unique; a duplicate
/// pair at the bracket boundary would produce a degenerate factor.
///
/// `level` only tags the error when the search runs out of anchors.
pub(crate) fn bracket_by<T>(
    value: f64,
    items: &[T],
    key: impl Fn(&T) -> f64,
    policy: ExtrapolationPolicy,
    level: usize,
) -> Result<Bracket, LutError>
{
    let count = items.len();
    // First anchor at or above the probe.
    let at_or_above = items.iter().position(|item| key(item) >= value);
    if let Some(index) = at_or_above
    {
        if key(&items[index]) == value
        {
            return Ok(Bracket::Collapsed(index));
        }
    }
    let span = |lower: usize, upper: usize|
    {
        let lower_coord = key(&items[lower]);
        let upper_coord = key(&items[upper]);
        Bracket::Span { lower, upper, factor: (value - lower_coord) / (upper_coord - lower_coord) }
    };
    match policy
    {
        ExtrapolationPolicy::Extrapolate =>
        {
            if count < 2
            {
                return Err(LutError::InsufficientEntries(level));
            }
            Ok(match at_or_above
            {
                None => span(count - 2, count - 1),
                Some(0) => span(0, 1),
                Some(index) => span(index - 1, index),
            })
        }
        ExtrapolationPolicy::Clamp =>
        {
            if count == 0
            {
                return Err(LutError::InsufficientEntries(level));
            }
            Ok(match at_or_above
            {
                None => Bracket::Collapsed(count - 1),
                Some(0) => Bracket::Collapsed(0),
                Some(index) => span(index - 1, index),
            })
        }
    }
}

#[test]
fn check_bracket_extrapolate()
{
    let entries = [(1.0, "a"), (2.0, "b"), (3.0, "c")];
    let key = |entry: &(f64, &str)| entry.0;
    assert_eq!(bracket_by(2.0, &entries, key, ExtrapolationPolicy::Extrapolate, 0).unwrap(), Bracket::Collapsed(1));
    assert_eq!(bracket_by(4.0, &entries, key, ExtrapolationPolicy::Extrapolate, 0).unwrap(),
        Bracket::Span { lower: 1, upper: 2, factor: 2.0 });
    assert_eq!(bracket_by(0.0, &entries, key, ExtrapolationPolicy::Extrapolate, 0).unwrap(),
        Bracket::Span { lower: 0, upper: 1, factor: -1.0 });
    assert_eq!(bracket_by(1.25, &entries, key, ExtrapolationPolicy::Extrapolate, 0).unwrap(),
        Bracket::Span { lower: 0, upper: 1, factor: 0.25 });
}

#[test]
fn check_bracket_clamp()
{
    let entries = [(100.0, "abc"), (200.0, "def")];
    let key = |entry: &(f64, &str)| entry.0;
    assert_eq!(bracket_by(0.0, &entries, key, ExtrapolationPolicy::Clamp, 0).unwrap(), Bracket::Collapsed(0));
    assert_eq!(bracket_by(300.0, &entries, key, ExtrapolationPolicy::Clamp, 0).unwrap(), Bracket::Collapsed(1));
    assert_eq!(bracket_by(150.0, &entries, key, ExtrapolationPolicy::Clamp, 0).unwrap(),
        Bracket::Span { lower: 0, upper: 1, factor: 0.5 });
    // the clamping policy is happy with a single anchor
    assert_eq!(bracket_by(42.0, &entries[..1], key, ExtrapolationPolicy::Clamp, 0).unwrap(), Bracket::Collapsed(0));
}

#[test]
fn check_bracket_insufficient_entries()
{
    let empty: [(f64, &str); 0] = [];
    let single = [(1.0, "a")];
    let key = |entry: &(f64, &str)| entry.0;
    assert_eq!(bracket_by(1.0, &empty, key, ExtrapolationPolicy::Extrapolate, 3), Err(LutError::InsufficientEntries(3)));
    assert_eq!(bracket_by(2.0, &single, key, ExtrapolationPolicy::Extrapolate, 0), Err(LutError::InsufficientEntries(0)));
    // exact match against a single anchor still resolves
    assert_eq!(bracket_by(1.0, &single, key, ExtrapolationPolicy::Extrapolate, 0).unwrap(), Bracket::Collapsed(0));
    assert_eq!(bracket_by(1.0, &empty, key, ExtrapolationPolicy::Clamp, 1), Err(LutError::InsufficientEntries(1)));
}
