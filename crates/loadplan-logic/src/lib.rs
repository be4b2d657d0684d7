//! Pure placement logic for LoadPlan.
//!
//! This crate holds the whole spatial engine for arranging packages in a
//! truck trailer. Functions take plain data and return results; nothing here
//! renders, logs or touches the filesystem, so any front end (native, web,
//! headless harness) can drive it.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`command`] | Editor state and single-entry `apply` dispatch |
//! | [`config`] | Editor configuration and validation |
//! | [`constants`] | Trailer sizes, step sizes, package limits, palette |
//! | [`descriptor`] | `name,width,height,depth,weight` bulk-load strings |
//! | [`error`] | Rejections, warnings and descriptor errors |
//! | [`geometry`] | Rotation, rotated footprint, overlap, aggregates |
//! | [`package`] | `Package` and `Container` records |
//! | [`placement`] | Move, rotate, align, resize with clamping |
//! | [`stacking`] | Auto-stack support resolution |
//! | [`store`] | Package collection with monotonic ids |
//! | [`summary`] | Weight, volume and utilisation figures |

pub mod command;
pub mod config;
pub mod constants;
pub mod descriptor;
pub mod error;
pub mod geometry;
pub mod package;
pub mod placement;
pub mod stacking;
pub mod store;
pub mod summary;
