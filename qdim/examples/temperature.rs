//! Absolute versus relative temperatures: offset scales, point arithmetic
//! and why two readings cannot be summed.

use qdim::{Absolute, Registry};

fn main() -> qdim::Result<()> {
    let registry = Registry::with_si_kinds()?;
    let temp = registry.kind("Temperature")?;
    let celsius = registry.resolve("Temperature", "degC")?;
    let fahrenheit = registry.resolve("Temperature", "degF")?;

    let morning = Absolute::new(12.0, &temp, &celsius)?;
    let noon = Absolute::new(27.0, &temp, &celsius)?;
    assert!((noon.base_value() - 300.15).abs() < 1e-12);

    // Point minus point is a difference, in kelvin on the relative twin.
    let warming = noon.try_sub(&morning)?;
    assert_eq!(warming.kind().tag(), "TemperatureDifference");
    assert!((warming.value() - 15.0).abs() < 1e-12);

    // The same reading in Fahrenheit; payload unchanged, readout converted.
    let noon_f = noon.with_unit(&fahrenheit)?;
    assert!((noon_f.value() - 80.6).abs() < 1e-9);
    println!("noon is {noon_f}, warmed by {warming} since morning");

    // `morning + noon` does not compile: Absolute has no addition.
    Ok(())
}
