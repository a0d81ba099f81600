//! Visibility-driven playback coordination.
//!
//! Each post is in one of three states:
//!
//! ```text
//!            report_visibility (in set)            request_toggle (play)
//!   Hidden ─────────────────────────────▶ VisibleIdle ◀──────────────▶ VisiblePlaying
//!     ▲        report_visibility (absent)      │        request_toggle (pause)   │
//!     └────────────────────────────────────────┴─────────────────────────────────┘
//!                                report_visibility (absent) pauses first
//! ```
//!
//! The one hard invariant: a post that is not visible is not playing. Image
//! posts never leave `Hidden`/`VisibleIdle`. Any number of videos may play at
//! once.
//!
//! Media side effects go through [`MediaHandle`]s registered per post. Calls
//! are fire-and-forget and the state map is updated optimistically; a missing
//! handle turns a toggle into a silent no-op.

use crate::feed::{MediaType, Post};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Host-side media player for one post.
///
/// Implementations may start and stop playback asynchronously; the
/// coordinator never waits on them.
pub trait MediaHandle: Send {
    fn play(&mut self);
    fn pause(&mut self);
    /// The handle's own view of playback, which can lag the coordinator.
    fn is_playing(&self) -> bool;
    /// Number of `play` calls so far. Handles that report asynchronously tag
    /// their reports with it.
    fn play_generation(&self) -> u64 {
        0
    }
}

/// Per-post playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Hidden,
    VisibleIdle,
    VisiblePlaying,
}

impl PlayState {
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Play was issued; the post is now `VisiblePlaying`.
    Started,
    /// Pause was issued; the post is now `VisibleIdle`.
    Paused,
    /// Nothing happened.
    Ignored(IgnoreReason),
}

/// Why an intent was dropped. These come from normal UI timing races and are
/// never surfaced as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownPost,
    NotVideo,
    NotVisible,
    NoHandle,
}

/// Why playback stopped on the media side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Ended,
    Failed,
}

/// What a visibility report changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityChange {
    /// Posts that went `Hidden → VisibleIdle`.
    pub shown: usize,
    /// Posts that went from visible to `Hidden`.
    pub hidden: usize,
    /// Posts that were playing and received a pause.
    pub paused: Vec<String>,
}

impl VisibilityChange {
    pub fn is_empty(&self) -> bool {
        self.shown == 0 && self.hidden == 0 && self.paused.is_empty()
    }
}

/// Tracks visibility and playback for every post in a session.
pub struct PlaybackCoordinator {
    media_types: HashMap<String, MediaType>,
    states: HashMap<String, PlayState>,
    handles: HashMap<String, Box<dyn MediaHandle>>,
}

impl PlaybackCoordinator {
    /// Every post starts `Hidden`.
    pub fn new(posts: &[Arc<Post>]) -> Self {
        let media_types: HashMap<String, MediaType> = posts
            .iter()
            .map(|p| (p.id.clone(), p.media_type))
            .collect();
        let states = media_types
            .keys()
            .map(|id| (id.clone(), PlayState::Hidden))
            .collect();
        Self {
            media_types,
            states,
            handles: HashMap::new(),
        }
    }

    /// Mark posts visible before the first viewport report arrives.
    ///
    /// Only `Hidden → VisibleIdle`; never issues side effects.
    pub fn seed_visible<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            if let Some(state) = self.states.get_mut(id.as_ref()) {
                if *state == PlayState::Hidden {
                    *state = PlayState::VisibleIdle;
                }
            }
        }
    }

    /// Apply the set of post ids currently on screen.
    ///
    /// Playing posts that left the set are paused, then hidden. Unknown ids
    /// are ignored. Reporting the same set twice is a no-op the second time.
    pub fn report_visibility<I, S>(&mut self, ids: I) -> VisibilityChange
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let visible: HashSet<String> = ids
            .into_iter()
            .filter_map(|id| {
                let id = id.as_ref();
                if self.states.contains_key(id) {
                    Some(id.to_string())
                } else {
                    tracing::debug!(post_id = %id, "Ignoring visibility for unknown post");
                    None
                }
            })
            .collect();

        let mut change = VisibilityChange::default();
        for (id, state) in self.states.iter_mut() {
            let on_screen = visible.contains(id);
            match (*state, on_screen) {
                (PlayState::Hidden, true) => {
                    *state = PlayState::VisibleIdle;
                    change.shown += 1;
                }
                (PlayState::VisibleIdle, false) => {
                    *state = PlayState::Hidden;
                    change.hidden += 1;
                }
                (PlayState::VisiblePlaying, false) => {
                    if let Some(handle) = self.handles.get_mut(id) {
                        handle.pause();
                    }
                    *state = PlayState::Hidden;
                    change.hidden += 1;
                    change.paused.push(id.clone());
                    tracing::debug!(post_id = %id, "Paused video scrolled off screen");
                }
                _ => {}
            }
        }

        if !change.is_empty() {
            tracing::debug!(
                shown = change.shown,
                hidden = change.hidden,
                paused = change.paused.len(),
                "Visibility updated"
            );
        }
        change
    }

    /// Play or pause a visible video post.
    pub fn request_toggle(&mut self, post_id: &str) -> ToggleOutcome {
        let outcome = self.toggle_inner(post_id);
        match outcome {
            ToggleOutcome::Ignored(reason) => {
                tracing::debug!(post_id = %post_id, ?reason, "Ignoring toggle request");
            }
            ToggleOutcome::Started | ToggleOutcome::Paused => {
                tracing::debug!(post_id = %post_id, ?outcome, "Toggled playback");
            }
        }
        outcome
    }

    fn toggle_inner(&mut self, post_id: &str) -> ToggleOutcome {
        let Some(media_type) = self.media_types.get(post_id) else {
            return ToggleOutcome::Ignored(IgnoreReason::UnknownPost);
        };
        if *media_type != MediaType::Video {
            return ToggleOutcome::Ignored(IgnoreReason::NotVideo);
        }
        let Some(state) = self.states.get_mut(post_id) else {
            return ToggleOutcome::Ignored(IgnoreReason::UnknownPost);
        };
        if !state.is_visible() {
            return ToggleOutcome::Ignored(IgnoreReason::NotVisible);
        }
        let Some(handle) = self.handles.get_mut(post_id) else {
            return ToggleOutcome::Ignored(IgnoreReason::NoHandle);
        };

        if *state == PlayState::VisiblePlaying {
            handle.pause();
            *state = PlayState::VisibleIdle;
            ToggleOutcome::Paused
        } else {
            handle.play();
            *state = PlayState::VisiblePlaying;
            ToggleOutcome::Started
        }
    }

    /// Register the media handle for a post, replacing any previous one.
    ///
    /// Handles for unknown posts are dropped.
    pub fn attach_media_handle(&mut self, post_id: &str, handle: Box<dyn MediaHandle>) {
        if !self.media_types.contains_key(post_id) {
            tracing::debug!(post_id = %post_id, "Ignoring media handle for unknown post");
            return;
        }
        self.handles.insert(post_id.to_string(), handle);
    }

    /// Drop a post's media handle. A playing post falls back to
    /// `VisibleIdle` since nothing can be playing without media.
    pub fn detach_media_handle(&mut self, post_id: &str) -> bool {
        if self.handles.remove(post_id).is_none() {
            return false;
        }
        if let Some(state) = self.states.get_mut(post_id) {
            if *state == PlayState::VisiblePlaying {
                *state = PlayState::VisibleIdle;
            }
        }
        true
    }

    pub fn has_handle(&self, post_id: &str) -> bool {
        self.handles.contains_key(post_id)
    }

    /// The media side stopped on its own (end of stream or failure).
    ///
    /// Resets `VisiblePlaying → VisibleIdle` without issuing a pause. Returns
    /// whether the state changed.
    pub fn report_playback_stopped(&mut self, post_id: &str, reason: StopReason) -> bool {
        match self.states.get_mut(post_id) {
            Some(state) if *state == PlayState::VisiblePlaying => {
                *state = PlayState::VisibleIdle;
                tracing::debug!(post_id = %post_id, ?reason, "Playback stopped by media");
                true
            }
            _ => false,
        }
    }

    pub fn state(&self, post_id: &str) -> PlayState {
        self.states.get(post_id).copied().unwrap_or_default()
    }

    /// Last-known playing flag from the coordinator's own map.
    pub fn is_playing(&self, post_id: &str) -> bool {
        self.state(post_id) == PlayState::VisiblePlaying
    }

    /// The attached handle's view, if one is attached.
    pub fn handle_reports_playing(&self, post_id: &str) -> Option<bool> {
        self.handles.get(post_id).map(|h| h.is_playing())
    }

    pub fn handle_play_generation(&self, post_id: &str) -> Option<u64> {
        self.handles.get(post_id).map(|h| h.play_generation())
    }

    /// Ids of every post currently playing.
    pub fn playing_ids(&self) -> Vec<&str> {
        self.states
            .iter()
            .filter(|(_, s)| **s == PlayState::VisiblePlaying)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.states.values().filter(|s| s.is_visible()).count()
    }
}

// ============================================================================
// Tests
// ============================================================================
