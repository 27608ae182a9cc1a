use num_traits::Float;

/// Linear blend between `lower` and `upper`. The stock interpolator for
/// numeric payload tables; factors outside `[0,1]` extrapolate.
#[inline]
pub fn lerp<F: Float>(factor: F, lower: F, upper: F) -> F
{
    lower + (upper - lower) * factor
}

/// Scale (by rounding) a value to some number of decimal digits. Half-way
/// cases round toward positive infinity: `scale(-1.2345, 3)` is `-1.234`.
///
/// Note: the returned value may print with a number of decimal digits
/// different from `digits` due to binary floating point representation.
pub fn scale(value: f64, digits: u32) -> f64
{
    if digits == 0
    {
        return round_half_up(value);
    }
    // 10^309 overflows f64, so larger digit counts gain nothing
    let multiplier = 10f64.powi(digits.min(308) as i32);
    round_half_up(value * multiplier) / multiplier
}

#[inline]
fn round_half_up(value: f64) -> f64
{
    (value + 0.5).floor()
}

#[test]
fn check_lerp()
{
    assert_eq!(lerp(0.0, 10.0, 20.0), 10.0);
    assert_eq!(lerp(1.0, 10.0, 20.0), 20.0);
    assert_eq!(lerp(0.25, 10.0, 20.0), 12.5);
    assert_eq!(lerp(2.0, 10.0, 20.0), 30.0);
    assert_eq!(lerp(-1.0, 10.0, 20.0), 0.0);
    assert_eq!(lerp(0.5_f32, 1.0, 2.0), 1.5);
}

#[test]
fn check_scale()
{
    assert_eq!(scale(1.2345, 2), 1.23);
    assert_eq!(scale(1.235, 1), 1.2);
    assert_eq!(scale(1.5, 0), 2.0);
    assert_eq!(scale(-1.2345, 3), -1.234);
    assert_eq!(scale(0.0, 4), 0.0);
}

#[test]
fn check_scale_rounds_half_toward_positive()
{
    // -1.2345 * 1000 is exactly -1234.5 in f64
    assert_eq!(scale(-1.2345, 3), -1.234);
    assert_eq!(scale(-1.5, 0), -1.0);
    assert_eq!(scale(-2.5, 0), -2.0);
    assert_eq!(scale(2.5, 0), 3.0);
    assert_eq!(scale(-0.25, 1), -0.2);
}

#[test]
fn check_scale_huge_digit_count()
{
    // a digit count beyond f64 range must not wrap into a negative exponent
    assert_eq!(scale(1.0, u32::MAX), 1.0);
    assert!((scale(1.5, u32::MAX) - 1.5).abs() < 1e-9);
    assert!((scale(-1.2345, 400) + 1.2345).abs() < 1e-9);
}
