//! Aggregate figures shown next to the 3D view.

use serde::{Deserialize, Serialize};

use crate::geometry::{total_volume, total_weight};
use crate::package::{Container, Package};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub package_count: usize,
    /// kg
    pub total_weight: f64,
    /// m³, from declared dimensions
    pub total_volume: f64,
    pub container_volume: f64,
    /// `total_volume / container_volume` as a fraction (0.0–1.0 when nothing
    /// overlaps).
    pub utilization: f64,
}

impl LoadSummary {
    pub fn of(packages: &[Package], container: &Container) -> Self {
        let total_volume = total_volume(packages);
        let container_volume = container.volume();
        let utilization = if container_volume > 0.0 {
            total_volume / container_volume
        } else {
            0.0
        };
        Self {
            package_count: packages.len(),
            total_weight: total_weight(packages),
            total_volume,
            container_volume,
            utilization,
        }
    }

    pub fn utilization_percent(&self) -> f64 {
        self.utilization * 100.0
    }
}
