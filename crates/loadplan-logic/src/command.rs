//! Command dispatch: one entry point for every editor action.
//!
//! `apply` takes the current `EditorState` by reference and returns the next
//! one. A rejected command returns `Err` and the caller keeps the state it
//! already had, so there is no partial update to roll back.

use serde::{Deserialize, Serialize};

use crate::config::{validate_config, ConfigError, EditorConfig};
use crate::error::{PlacementError, PlacementWarning};
use crate::package::{Container, Package};
use crate::placement::{self, Placement, ResizeRequest, Wall};
use crate::store::{initial_packages, PackageStore};

/// Everything one editing session owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub store: PackageStore,
    pub selected: Option<u32>,
    pub auto_stack: bool,
    pub config: EditorConfig,
}

impl EditorState {
    /// A session holding the initial package set.
    ///
    /// Fails with every problem `validate_config` finds; a session never
    /// opens on a container it cannot keep packages inside.
    pub fn new(config: EditorConfig) -> Result<Self, Vec<ConfigError>> {
        let mut state = Self::empty(config)?;
        state.store.replace_all(initial_packages());
        Ok(state)
    }

    /// A session with no packages at all.
    pub fn empty(config: EditorConfig) -> Result<Self, Vec<ConfigError>> {
        let errors = validate_config(&config);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            store: PackageStore::new(config.container),
            selected: None,
            auto_stack: config.auto_stack,
            config,
        })
    }

    pub fn selected_package(&self) -> Option<&Package> {
        self.selected.and_then(|id| self.store.get(id))
    }

    fn require_selection(&self) -> Result<u32, PlacementError> {
        self.selected.ok_or(PlacementError::NoSelection)
    }
}

/// Nudge direction along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    XMinus,
    XPlus,
    YMinus,
    YPlus,
    ZMinus,
    ZPlus,
}

impl Direction {
    /// `(dx, dy, dz)` for a nudge of `step` metres.
    pub fn delta(self, step: f64) -> (f64, f64, f64) {
        match self {
            Direction::XMinus => (-step, 0.0, 0.0),
            Direction::XPlus => (step, 0.0, 0.0),
            Direction::YMinus => (0.0, -step, 0.0),
            Direction::YPlus => (0.0, step, 0.0),
            Direction::ZMinus => (0.0, 0.0, -step),
            Direction::ZPlus => (0.0, 0.0, step),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    AddPackage,
    Delete(u32),
    Select(u32),
    Deselect,
    Translate(Direction),
    SetPosition { x: f64, y: f64, z: f64 },
    SetGridPosition { cell_x: f64, cell_y: f64 },
    Rotate,
    Align(Wall),
    Resize(ResizeRequest),
    SetContainer { length: f64, width: f64, height: f64 },
    ResetContainer,
    SetAutoStack(bool),
    SetStackable { id: u32, stackable: bool },
    /// Replace every package. One invalid package rejects the batch.
    LoadPackages(Vec<Package>),
}

/// An accepted command: the next state and any warning it raised.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub state: EditorState,
    pub warning: Option<PlacementWarning>,
}

impl Applied {
    fn quiet(state: EditorState) -> Self {
        Self {
            state,
            warning: None,
        }
    }
}

/// Apply one command to `state`.
pub fn apply(state: &EditorState, command: Command) -> Result<Applied, PlacementError> {
    let container = *state.store.container();
    let packages = state.store.list();
    let stack = state.config.auto_stack_rule(state.auto_stack);

    match command {
        Command::Translate(direction) => {
            let id = state.require_selection()?;
            let delta = direction.delta(state.config.move_step);
            let placed = placement::translate(id, packages, &container, delta, stack)?;
            Ok(commit(state, placed))
        }
        Command::SetPosition { x, y, z } => {
            let id = state.require_selection()?;
            let placed =
                placement::set_absolute_position(id, packages, &container, (x, y, z), stack)?;
            Ok(commit(state, placed))
        }
        Command::SetGridPosition { cell_x, cell_y } => {
            let id = state.require_selection()?;
            let placed =
                placement::set_grid_position(id, packages, &container, (cell_x, cell_y), stack)?;
            Ok(commit(state, placed))
        }
        Command::Rotate => {
            let id = state.require_selection()?;
            let placed = placement::rotate90(id, packages, &container)?;
            Ok(commit(state, placed))
        }
        Command::Align(wall) => {
            let id = state.require_selection()?;
            let placed = placement::align_to_wall(id, packages, &container, wall)?;
            Ok(commit(state, placed))
        }
        Command::Resize(request) => {
            let id = state.require_selection()?;
            let placed = placement::resize(id, packages, &container, &request)?;
            Ok(commit(state, placed))
        }

        Command::AddPackage => {
            let mut next = state.clone();
            let id = next.store.add();
            next.selected = Some(id);
            Ok(Applied::quiet(next))
        }
        Command::Delete(id) => {
            let mut next = state.clone();
            next.store.remove(id);
            if next.selected == Some(id) {
                next.selected = None;
            }
            Ok(Applied::quiet(next))
        }
        Command::Select(id) => {
            if state.store.get(id).is_none() {
                return Err(PlacementError::UnknownPackage(id));
            }
            let mut next = state.clone();
            next.selected = Some(id);
            Ok(Applied::quiet(next))
        }
        Command::Deselect => {
            let mut next = state.clone();
            next.selected = None;
            Ok(Applied::quiet(next))
        }
        Command::SetContainer {
            length,
            width,
            height,
        } => {
            let resized = Container::new(length, width, height)?;
            let mut next = state.clone();
            next.store.set_container(resized);
            Ok(Applied::quiet(next))
        }
        Command::ResetContainer => {
            let mut next = state.clone();
            next.store.reset_container();
            Ok(Applied::quiet(next))
        }
        Command::SetAutoStack(enabled) => {
            let mut next = state.clone();
            next.auto_stack = enabled;
            Ok(Applied::quiet(next))
        }
        Command::SetStackable { id, stackable } => {
            if state.store.get(id).is_none() {
                return Err(PlacementError::UnknownPackage(id));
            }
            let mut flagged = packages.to_vec();
            for p in flagged.iter_mut().filter(|p| p.id == id) {
                p.stackable = stackable;
            }
            let mut next = state.clone();
            next.store.replace_all(flagged);
            Ok(Applied::quiet(next))
        }
        Command::LoadPackages(loaded) => {
            for p in &loaded {
                p.validate()?;
            }
            let mut next = state.clone();
            next.store.replace_all(loaded);
            if next.selected.is_some_and(|id| next.store.get(id).is_none()) {
                next.selected = None;
            }
            Ok(Applied::quiet(next))
        }
    }
}

fn commit(state: &EditorState, placement: Placement) -> Applied {
    let mut next = state.clone();
    next.store.replace_all(placement.packages);
    Applied {
        state: next,
        warning: placement.warning,
    }
}
