//! Minimal end-to-end example: unit conversion and a velocity from
//! length / duration.

use qdim::{Registry, Relative};

fn main() -> qdim::Result<()> {
    let registry = Registry::with_si_kinds()?;
    let length = registry.kind("Length")?;
    let duration = registry.kind("Duration")?;

    let d = Relative::new(1.0, &length, &registry.resolve("Length", "km")?)?;
    assert_eq!(d.base_value(), 1000.0);
    assert_eq!(d.in_unit(&registry.resolve("Length", "m")?)?, 1000.0);

    let t = Relative::new(100.0, &duration, &registry.resolve("Duration", "s")?)?;
    let v = d.divide(&t, &registry).cast(&registry.kind("Velocity")?)?;
    assert_eq!(v.value(), 10.0);
    println!("1 km in 100 s is {v}");
    Ok(())
}
