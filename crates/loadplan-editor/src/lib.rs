//! Session shell for LoadPlan.
//!
//! Sits between a front end and `loadplan-logic`: raw UI intents go in,
//! validated commands are applied to one `EditorState`, and serializable
//! frames come out. Decisions are logged through the `log` facade; the
//! embedding application installs the logger.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`demo`] | Random demo package sets per order number |
//! | [`editor`] | The session: intent handling and state ownership |
//! | [`frame`] | Render frame and floor grid |
//! | [`intent`] | Raw UI events, key mapping, numeric text parsing |
//! | [`url`] | `?packages=` / `?order=` query ingestion |

pub mod demo;
pub mod editor;
pub mod frame;
pub mod intent;
pub mod url;

pub use editor::{Editor, Outcome};
pub use frame::Frame;
pub use intent::Intent;
