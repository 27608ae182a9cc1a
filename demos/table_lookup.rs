use lutable::errors::LutError;
use lutable::interpolation::interpolate;
use lutable::table::Level;
use lutable::utilities::float::{lerp, scale};
use lutable::weighted::weighted_interpolate;

fn one_d() -> Result<(), LutError>
{
    println!("\nRunning \"one_d\" example\n");
    // Thrust (N) by throttle setting, anchors deliberately out of order.
    let entries = vec![(1.0, 5000.0), (0.25, 900.0), (0.5, 2100.0), (0.75, 3400.0)];
    let thrust = interpolate(0.6, &entries, |_, factor, lower, upper| lerp(factor, *lower, *upper))?;
    println!("thrust at throttle 0.6: {} N", scale(thrust, 1));
    // Probing beyond the table extrapolates from the outermost anchors.
    let thrust = interpolate(1.1, &entries, |_, factor, lower, upper| lerp(factor, *lower, *upper))?;
    println!("thrust at throttle 1.1 (extrapolated): {} N", scale(thrust, 1));
    Ok(())
}

fn two_d() -> Result<(), LutError>
{
    println!("\nRunning \"two_d\" example\n");
    // f(x, y) = x^2 + y^2 sampled on a coarse 2D table.
    let axis = [0.0, 0.25, 0.5, 0.75, 1.0];
    let table: Level<f64> = Level::Table(axis.iter().map(|&x|
    {
        (x, Level::Table(axis.iter().map(|&y| (y, Level::Leaf(x * x + y * y))).collect()))
    }).collect());

    let probe = [0.3, 0.1];
    let result = weighted_interpolate(&probe, &table, |_, factor, lower, upper| lerp(factor, *lower, *upper))?;
    let expected = probe[0] * probe[0] + probe[1] * probe[1];
    println!("x={:?}, calculated {}, expected {}. Error={}", probe, result.value, expected, (result.value - expected).abs());
    println!("contributing corners:");
    for (leaf, weight) in &result.weights
    {
        println!("  value {:>6} carries weight {}", leaf, scale(*weight, 4));
    }
    let total: f64 = result.weights.iter().map(|entry| entry.1).sum();
    println!("weights sum to {}", total);
    Ok(())
}

fn main() -> Result<(), LutError>
{
    one_d()?;
    two_d()?;
    Ok(())
}
