//! Player records and their selectable extension, with conformance checks
//! against plain key-value objects.

pub mod config;
pub mod logging;
pub mod player;
pub mod record;
pub mod roster;

pub use player::{Player, SelectablePlayer};
