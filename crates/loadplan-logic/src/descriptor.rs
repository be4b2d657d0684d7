//! External package descriptors for bulk loading.
//!
//! Format: descriptors separated by `;`, fields by `,`:
//!
//! ```text
//! name,width,height,depth,weight[,stackable[,rotation]]
//! ```
//!
//! A descriptor that fails to parse is reported and skipped; the rest of
//! the batch still loads.

use crate::constants::palette;
use crate::error::MalformedDescriptor;
use crate::geometry::Rotation;
use crate::package::Package;

/// Gap left between packages laid out along the trailer on load.
pub const LOAD_SPACING: f64 = 0.5;

/// A validated package description, not yet placed.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDescriptor {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub weight: f64,
    pub stackable: bool,
    pub rotation: Rotation,
}

impl PackageDescriptor {
    /// Parse one descriptor. `index` is only used for error reporting.
    pub fn parse(index: usize, raw: &str) -> Result<Self, MalformedDescriptor> {
        let malformed = |reason: String| MalformedDescriptor { index, reason };

        let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
        if !(5..=7).contains(&fields.len()) {
            return Err(malformed(format!(
                "expected 5 to 7 fields, found {}",
                fields.len()
            )));
        }

        let name = fields[0];
        if name.is_empty() {
            return Err(malformed("empty name".into()));
        }

        let number = |field: &str, raw: &str| -> Result<f64, MalformedDescriptor> {
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(malformed(format!("{field} {raw:?} is not a number"))),
            }
        };
        let width = number("width", fields[1])?;
        let height = number("height", fields[2])?;
        let depth = number("depth", fields[3])?;
        let weight = number("weight", fields[4])?;

        for (field, v) in [("width", width), ("height", height), ("depth", depth)] {
            if v <= 0.0 {
                return Err(malformed(format!("{field} must be positive, got {v}")));
            }
        }
        if weight < 0.0 {
            return Err(malformed(format!("weight must not be negative, got {weight}")));
        }

        let stackable = match fields.get(5) {
            None => false,
            Some(raw) => parse_flag(raw)
                .ok_or_else(|| malformed(format!("stackable {raw:?} is not a flag")))?,
        };
        let rotation = match fields.get(6) {
            None => Rotation::Deg0,
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .and_then(Rotation::from_degrees)
                .ok_or_else(|| malformed(format!("rotation {raw:?} is not a quarter turn")))?,
        };

        Ok(Self {
            name: name.to_string(),
            width,
            height,
            depth,
            weight,
            stackable,
            rotation,
        })
    }

    pub fn into_package(self, id: u32, x: f64) -> Package {
        Package {
            id,
            name: self.name,
            x,
            y: 0.0,
            z: 0.0,
            width: self.width,
            height: self.height,
            depth: self.depth,
            rotation: self.rotation,
            weight: self.weight,
            stackable: self.stackable,
            color: palette::color_for(id).to_string(),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Parse a whole batch. Empty segments (e.g. a trailing `;`) are ignored.
pub fn parse_descriptors(raw: &str) -> (Vec<PackageDescriptor>, Vec<MalformedDescriptor>) {
    let mut ok = Vec::new();
    let mut bad = Vec::new();
    for (index, segment) in raw.split(';').enumerate() {
        if segment.trim().is_empty() {
            continue;
        }
        match PackageDescriptor::parse(index, segment) {
            Ok(d) => ok.push(d),
            Err(e) => bad.push(e),
        }
    }
    (ok, bad)
}

/// Turn descriptors into packages with ids from 1, laid out along the
/// length of the trailer. Callers clamp the result into their container.
pub fn layout_packages(descriptors: Vec<PackageDescriptor>) -> Vec<Package> {
    let mut x = 0.0;
    descriptors
        .into_iter()
        .zip(1u32..)
        .map(|(d, id)| {
            let along = if d.rotation.swaps_axes() { d.height } else { d.width };
            let p = d.into_package(id, x);
            x += along + LOAD_SPACING;
            p
        })
        .collect()
}
