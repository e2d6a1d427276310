//! Unit-aware containers: sparse construction, layout conversion and
//! whole-container transcendentals via `assign`.

use qdim::{Layout, Registry, RelMatrix, RelVector};

fn main() -> qdim::Result<()> {
    let registry = Registry::with_si_kinds()?;
    let length = registry.kind("Length")?;
    let km = registry.resolve("Length", "km")?;

    // Sparse 4x4 distance matrix in kilometers; absent cells are 0 m.
    let distances = RelMatrix::from_triplets(
        4,
        4,
        &[(0, 1, 1.2), (1, 2, 0.8), (0, 3, 5.0)],
        &length,
        &km,
        Layout::Sparse,
    )?;
    assert_eq!(distances.stored_len(), 3);
    assert_eq!(distances.base_at(0, 3), 5000.0);

    // Layout conversion never changes observable values.
    let dense = distances.converted(Layout::Dense);
    assert_eq!(dense.base_at(1, 2), distances.base_at(1, 2));

    // assign applies a numeric function elementwise, in base units.
    let mut marks = RelVector::from_values(&[1.0, 4.0, 9.0], &length, &km, Layout::Dense)?;
    marks.assign(f64::sqrt);
    assert_eq!(marks.base_at(2), (9000.0f64).sqrt());

    println!(
        "sparse matrix holds {} of {} cells",
        distances.stored_len(),
        distances.rows() * distances.cols()
    );
    Ok(())
}
