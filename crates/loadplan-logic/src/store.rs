//! The session's package collection and trailer dimensions.
//!
//! `PackageStore` owns the authoritative list for one editing session.
//! Ids come from a monotonic counter and are never handed out twice, even
//! after deletion or a bulk load.
//!
//! ```
//! use loadplan_logic::package::Container;
//! use loadplan_logic::store::PackageStore;
//!
//! let mut store = PackageStore::new(Container::default());
//! let a = store.add();
//! let b = store.add();
//! store.remove(a);
//! assert_eq!(store.add(), b + 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{package_defaults, palette};
use crate::geometry::Rotation;
use crate::package::{Container, Package};
use crate::placement::{clamp_all, clamp_package};
use crate::summary::LoadSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageStore {
    container: Container,
    /// What `reset_container` goes back to.
    default_container: Container,
    packages: Vec<Package>,
    next_id: u32,
}

impl PackageStore {
    /// An empty store; the first package gets id 1.
    pub fn new(container: Container) -> Self {
        Self {
            container,
            default_container: container,
            packages: Vec::new(),
            next_id: 1,
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn default_container(&self) -> &Container {
        &self.default_container
    }

    pub fn get(&self, id: u32) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn list(&self) -> &[Package] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Id the next `add` will use.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Add a default-sized package at the origin and return its id.
    pub fn add(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let mut package = Package::with_defaults(id);
        clamp_package(&mut package, &self.container);
        self.packages.push(package);
        id
    }

    pub fn remove(&mut self, id: u32) -> Option<Package> {
        let idx = self.packages.iter().position(|p| p.id == id)?;
        Some(self.packages.remove(idx))
    }

    /// Swap in a whole new collection (bulk load, or the result of a
    /// placement edit). Packages are clamped into the container; a repeated
    /// id keeps its first occurrence. Returns how many packages were kept.
    pub fn replace_all(&mut self, packages: Vec<Package>) -> usize {
        let mut kept: Vec<Package> = Vec::with_capacity(packages.len());
        for p in packages {
            if kept.iter().any(|k| k.id == p.id) {
                continue;
            }
            kept.push(p);
        }
        self.packages = clamp_all(&kept, &self.container);

        let max_id = self.packages.iter().map(|p| p.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id.saturating_add(1));
        self.packages.len()
    }

    /// Resize the trailer and re-clamp every package into it.
    pub fn set_container(&mut self, container: Container) {
        self.container = container;
        self.packages = clamp_all(&self.packages, &self.container);
    }

    pub fn reset_container(&mut self) {
        self.set_container(self.default_container);
    }

    pub fn summary(&self) -> LoadSummary {
        LoadSummary::of(&self.packages, &self.container)
    }
}

/// The package a fresh session opens with.
pub fn initial_packages() -> Vec<Package> {
    vec![Package {
        id: 1,
        name: format!("{} 1", package_defaults::NAME_PREFIX),
        x: 0.0,
        y: 0.0,
        z: 0.0,
        width: 3.0,
        height: 0.86,
        depth: 1.2,
        rotation: Rotation::Deg0,
        weight: package_defaults::WEIGHT,
        stackable: false,
        color: palette::BLUE.to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assigns_monotonic_ids() {
        let mut store = PackageStore::new(Container::default());
        assert_eq!(store.add(), 1);
        assert_eq!(store.add(), 2);
        assert!(store.remove(2).is_some());
        assert_eq!(store.add(), 3, "ids are never reused");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_added_package_at_origin() {
        let mut store = PackageStore::new(Container::default());
        let id = store.add();
        let p = store.get(id).unwrap();
        assert_eq!((p.x, p.y, p.z), (0.0, 0.0, 0.0));
        assert_eq!(p.width, package_defaults::WIDTH);
    }

    #[test]
    fn test_remove_missing() {
        let mut store = PackageStore::new(Container::default());
        store.add();
        assert!(store.remove(42).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_all_advances_counter_and_clamps() {
        let mut store = PackageStore::new(Container::default());
        let mut far = Package::with_defaults(7);
        far.x = 40.0;
        let near = Package::with_defaults(3);
        let dup = Package::with_defaults(3);
        assert_eq!(store.replace_all(vec![far, near, dup]), 2);

        assert_eq!(store.next_id(), 8);
        let far = store.get(7).unwrap();
        assert!((far.x - 10.6).abs() < 1e-9, "x={}", far.x);
        assert_eq!(store.add(), 8);
    }

    #[test]
    fn test_replace_all_never_rewinds_counter() {
        let mut store = PackageStore::new(Container::default());
        for _ in 0..5 {
            store.add();
        }
        store.replace_all(vec![Package::with_defaults(1)]);
        assert_eq!(store.next_id(), 6);
    }

    #[test]
    fn test_shrinking_container_reclamps() {
        let mut store = PackageStore::new(Container::default());
        store.replace_all(initial_packages());
        let id = store.add();
        let mut moved = store.list().to_vec();
        for p in moved.iter_mut().filter(|p| p.id == id) {
            p.x = 10.0;
        }
        store.replace_all(moved);

        store.set_container(Container::new(6.0, 2.45, 2.7).unwrap());
        assert!(store.list().iter().all(|p| p.fits_within(store.container())));
        assert!((store.get(id).unwrap().x - 3.0).abs() < 1e-9);

        store.reset_container();
        assert_eq!(*store.container(), Container::default());
    }

    #[test]
    fn test_summary_counts() {
        let mut store = PackageStore::new(Container::default());
        store.add();
        store.add();
        let s = store.summary();
        assert_eq!(s.package_count, 2);
        assert!((s.total_weight - 600.0).abs() < 1e-9);
    }
}
