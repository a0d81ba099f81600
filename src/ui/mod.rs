//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling per mode
//! - `events` - Player report processing
//! - `render` - Screen layout and overlay dispatch
//! - `tabs` - Tab bar widget
//! - `feed` - Search bar and post cards
//! - `filter_modal` - Filter & Sort overlay
//! - `profile` - Update Account screen
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod events;
mod feed;
mod filter_modal;
mod help;
mod input;
mod loop_runner;
mod profile;
mod render;
mod status;
mod tabs;

pub use loop_runner::{run, Action};
