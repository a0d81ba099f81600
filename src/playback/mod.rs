//! Video playback.
//!
//! - `coordinator` - Visibility-driven play/pause state per post
//! - `player` - Simulated player tasks behind [`MediaHandle`]

mod coordinator;
mod player;

pub use coordinator::{
    IgnoreReason, MediaHandle, PlayState, PlaybackCoordinator, StopReason, ToggleOutcome,
    VisibilityChange,
};
pub use player::{
    spawn_player, PlayerHandle, PlayerReport, PlayerReportKind, DEFAULT_DURATION_SECS,
    STARTUP_DELAY,
};
