//! One editing session: turns intents into commands and keeps the state.

use rand::rngs::StdRng;
use rand::SeedableRng;

use loadplan_logic::command::{apply, Command, EditorState};
use loadplan_logic::config::{ConfigError, EditorConfig};
use loadplan_logic::descriptor::{layout_packages, parse_descriptors};
use loadplan_logic::error::{PlacementError, PlacementWarning};
use loadplan_logic::package::Package;
use loadplan_logic::placement::ResizeRequest;
use loadplan_logic::store::initial_packages;

use crate::demo::demo_packages_for_order;
use crate::frame::Frame;
use crate::intent::{key_action, parse_number, Axis, Intent, KeyAction, ResizeField};
use crate::url::UrlLoad;

/// How an intent was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    /// Applied, with part of it held back.
    Warned(PlacementWarning),
    /// Nothing changed.
    Rejected(PlacementError),
    /// Not an editor action (e.g. an unmapped key).
    Ignored,
}

pub struct Editor {
    state: EditorState,
    order: Option<String>,
    rng: StdRng,
    last_warning: Option<String>,
}

impl Editor {
    /// Open a session. An invalid config is refused with every problem
    /// found.
    pub fn new(config: EditorConfig) -> Result<Self, Vec<ConfigError>> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic demo sizes, for tests and the harness.
    pub fn with_seed(config: EditorConfig, seed: u64) -> Result<Self, Vec<ConfigError>> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EditorConfig, rng: StdRng) -> Result<Self, Vec<ConfigError>> {
        let state = EditorState::new(config).map_err(|errors| {
            for err in &errors {
                log::warn!("Invalid editor config: {err}");
            }
            errors
        })?;
        Ok(Self {
            state,
            order: None,
            rng,
            last_warning: None,
        })
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    pub fn last_warning(&self) -> Option<&str> {
        self.last_warning.as_deref()
    }

    pub fn frame(&self) -> Frame {
        Frame::build(&self.state, self.order(), self.last_warning())
    }

    pub fn handle(&mut self, intent: Intent) -> Outcome {
        let command = match intent {
            Intent::LoadUrl(href) => return self.load_url(&href),
            Intent::LoadOrder(order) => {
                if order.trim().is_empty() {
                    return Outcome::Ignored;
                }
                return self.load_order(&order);
            }
            other => self.command_for(other),
        };
        match command {
            Ok(Some(command)) => self.run(command),
            Ok(None) => Outcome::Ignored,
            Err(err) => self.reject(err),
        }
    }

    /// Validate raw input into a command. `Ok(None)` means nothing to do.
    fn command_for(&self, intent: Intent) -> Result<Option<Command>, PlacementError> {
        let command = match intent {
            Intent::AddPackage => Command::AddPackage,
            Intent::Delete(id) => Command::Delete(id),
            Intent::Select(id) => Command::Select(id),
            Intent::Deselect => Command::Deselect,
            Intent::Key(key) => match key_action(&key) {
                Some(KeyAction::Nudge(direction)) => Command::Translate(direction),
                Some(KeyAction::Rotate) => Command::Rotate,
                None => return Ok(None),
            },
            Intent::Nudge(direction) => Command::Translate(direction),
            Intent::PositionInput { x, y, z } => Command::SetPosition {
                x: parse_number("x", &x)?,
                y: parse_number("y", &y)?,
                z: parse_number("z", &z)?,
            },
            Intent::Slider(axis, value) => {
                let p = self
                    .state
                    .selected_package()
                    .ok_or(PlacementError::NoSelection)?;
                let (mut x, mut y, mut z) = (p.x, p.y, p.z);
                match axis {
                    Axis::X => x = value,
                    Axis::Y => y = value,
                    Axis::Z => z = value,
                }
                Command::SetPosition { x, y, z }
            }
            Intent::GridClick { cell_x, cell_y } => Command::SetGridPosition { cell_x, cell_y },
            Intent::Rotate => Command::Rotate,
            Intent::Align(wall) => Command::Align(wall),
            Intent::ResizeInput(field, raw) => {
                let value = Some(parse_number(field.name(), &raw)?);
                let mut request = ResizeRequest::default();
                match field {
                    ResizeField::Width => request.width = value,
                    ResizeField::Depth => request.depth = value,
                    ResizeField::Height => request.height = value,
                    ResizeField::Weight => request.weight = value,
                }
                Command::Resize(request)
            }
            Intent::ContainerInput {
                length,
                width,
                height,
            } => Command::SetContainer {
                length: parse_number("length", &length)?,
                width: parse_number("width", &width)?,
                height: parse_number("height", &height)?,
            },
            Intent::ResetContainer => Command::ResetContainer,
            Intent::ToggleAutoStack => Command::SetAutoStack(!self.state.auto_stack),
            Intent::ToggleStackable => {
                let p = self
                    .state
                    .selected_package()
                    .ok_or(PlacementError::NoSelection)?;
                Command::SetStackable {
                    id: p.id,
                    stackable: !p.stackable,
                }
            }
            Intent::LoadUrl(_) | Intent::LoadOrder(_) => return Ok(None),
        };
        Ok(Some(command))
    }

    fn run(&mut self, command: Command) -> Outcome {
        let label = describe(&command);
        // Nudges and slider drags arrive in bursts
        let chatty = matches!(
            command,
            Command::Translate(_) | Command::SetPosition { .. } | Command::SetGridPosition { .. }
        );
        match apply(&self.state, command) {
            Ok(applied) => {
                self.state = applied.state;
                match applied.warning {
                    Some(warning) => {
                        log::warn!("{label}: {warning}");
                        self.last_warning = Some(warning.to_string());
                        Outcome::Warned(warning)
                    }
                    None => {
                        if chatty {
                            log::debug!("{label}");
                        } else {
                            log::info!("{label}");
                        }
                        self.last_warning = None;
                        Outcome::Applied
                    }
                }
            }
            Err(err) => self.reject(err),
        }
    }

    fn reject(&mut self, err: PlacementError) -> Outcome {
        log::warn!("Rejected: {err}");
        self.last_warning = Some(err.to_string());
        Outcome::Rejected(err)
    }

    fn load_url(&mut self, href: &str) -> Outcome {
        match UrlLoad::from_href(href) {
            UrlLoad::Packages(raw) => {
                let (descriptors, malformed) = parse_descriptors(&raw);
                for err in &malformed {
                    log::warn!("Skipping {err}");
                }
                log::info!(
                    "Loading {} package(s) from URL, {} skipped",
                    descriptors.len(),
                    malformed.len()
                );
                let outcome = self.load(layout_packages(descriptors), None);
                if let Some(first) = malformed.first() {
                    self.last_warning = Some(format!(
                        "{} descriptor(s) skipped; first: {first}",
                        malformed.len()
                    ));
                }
                outcome
            }
            UrlLoad::Order(order) => self.load_order(&order),
            UrlLoad::Initial => {
                log::info!("No order in URL, loading initial packages");
                self.load(initial_packages(), None)
            }
        }
    }

    fn load_order(&mut self, order: &str) -> Outcome {
        let order = order.trim();
        let container = *self.state.store.container();
        let packages = demo_packages_for_order(order, &container, &mut self.rng);
        log::info!("Loading {} demo package(s) for order {order}", packages.len());
        self.load(packages, Some(order.to_string()))
    }

    fn load(&mut self, packages: Vec<Package>, order: Option<String>) -> Outcome {
        let outcome = self.run(Command::LoadPackages(packages));
        if outcome == Outcome::Applied {
            self.order = order;
        }
        outcome
    }
}

/// Short log label for a command.
fn describe(command: &Command) -> String {
    match command {
        Command::AddPackage => "Package added".into(),
        Command::Delete(id) => format!("Package {id} deleted"),
        Command::Select(id) => format!("Package {id} selected"),
        Command::Deselect => "Selection cleared".into(),
        Command::Translate(direction) => format!("Nudge {direction:?}"),
        Command::SetPosition { x, y, z } => format!("Position set to ({x:.2}, {y:.2}, {z:.2})"),
        Command::SetGridPosition { cell_x, cell_y } => {
            format!("Dropped on grid cell ({cell_x:.1}, {cell_y:.1})")
        }
        Command::Rotate => "Rotated 90°".into(),
        Command::Align(wall) => format!("Aligned to {wall:?}"),
        Command::Resize(request) => format!("Resize {request:?}"),
        Command::SetContainer {
            length,
            width,
            height,
        } => format!("Container set to {length}×{width}×{height}"),
        Command::ResetContainer => "Container reset".into(),
        Command::SetAutoStack(on) => format!("Auto-stack {}", if *on { "on" } else { "off" }),
        Command::SetStackable { id, stackable } => {
            format!("Package {id} stackable = {stackable}")
        }
        Command::LoadPackages(packages) => format!("Loaded {} package(s)", packages.len()),
    }
}
