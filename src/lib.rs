//! reel: a terminal social feed.
//!
//! Posts are searched, filtered and sorted by a pure query engine, and video
//! posts play only while their cards are on screen.

pub mod app;
pub mod config;
pub mod feed;
pub mod keybindings;
pub mod playback;
pub mod profile;
pub mod session;
pub mod theme;
pub mod ui;
pub mod util;
