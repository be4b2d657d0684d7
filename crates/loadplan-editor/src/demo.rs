//! Demo package sets for an order number.
//!
//! There is no order backend; an order number only decides how many
//! packages show up (2 to 5), and their sizes are random.

use rand::Rng;

use loadplan_logic::constants::palette;
use loadplan_logic::geometry::Rotation;
use loadplan_logic::package::{Container, Package};

/// Gap between neighbouring demo packages in a row.
pub const DEMO_SPACING: f64 = 0.5;

/// Package count for an order: `(n mod 4) + 2` for numeric orders, 3
/// otherwise.
pub fn demo_count(order: &str) -> usize {
    match order.trim().parse::<i64>() {
        Ok(n) => n.rem_euclid(4) as usize + 2,
        Err(_) => 3,
    }
}

/// Generate the demo set for `order`. Ids start at 1.
///
/// Packages are laid out in rows along the trailer, each one its own width
/// plus [`DEMO_SPACING`] after the last. A package that would run past the
/// back wall starts a new row beside the widest package of the current one.
pub fn demo_packages_for_order(
    order: &str,
    container: &Container,
    rng: &mut impl Rng,
) -> Vec<Package> {
    let order = order.trim();
    let (mut x, mut y, mut row_span) = (0.0, 0.0, 0.0_f64);
    (0..demo_count(order))
        .map(|i| {
            let id = i as u32 + 1;
            let width = rng.gen_range(2.5..3.5);
            let height = rng.gen_range(0.8..1.2);
            let depth = rng.gen_range(0.8..1.2);
            let weight = rng.gen_range(200.0..400.0);

            if x > 0.0 && x + width > container.length {
                x = 0.0;
                y += row_span;
                row_span = 0.0;
            }
            let package = Package {
                id,
                name: format!("PKG-{order}-{id}"),
                x,
                y,
                z: 0.0,
                width,
                height,
                depth,
                rotation: Rotation::Deg0,
                weight,
                stackable: false,
                color: palette::color_for(id).to_string(),
            };
            x += width + DEMO_SPACING;
            row_span = row_span.max(height);
            package
        })
        .collect()
}
