//! One feed screen's worth of state.
//!
//! A [`FeedSession`] owns the immutable post set plus everything derived from
//! user intents: the filter, follow flags, the current ordered result and the
//! playback coordinator. Every intent is a plain `&mut self` method; the host
//! reports visibility after each intent and each frame.

use crate::feed::{
    compute, CategoryFilter, FilterState, FollowState, MediaTypeFilter, Post, PostSet, SortKey,
};
use crate::playback::{MediaHandle, PlayState, PlaybackCoordinator, StopReason, ToggleOutcome, VisibilityChange};
use std::collections::HashMap;
use std::sync::Arc;

/// Posts pre-seeded visible before the first viewport report.
pub const DEFAULT_INITIAL_BATCH: usize = 3;

pub struct FeedSession {
    posts: Arc<[Arc<Post>]>,
    index: HashMap<String, usize>,
    filter: FilterState,
    follow: FollowState,
    results: Vec<Arc<Post>>,
    playback: PlaybackCoordinator,
}

impl FeedSession {
    /// Start a session with default filters.
    ///
    /// The first `initial_batch` posts of the initial result start visible.
    pub fn new(set: &PostSet, initial_batch: usize) -> Self {
        let posts = Arc::clone(&set.posts);
        let index = posts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        let follow = FollowState::new(posts.iter().map(|p| p.id.as_str()), &set.following);
        let filter = FilterState::default();
        let results = compute(&posts, &filter);

        let mut playback = PlaybackCoordinator::new(&posts);
        playback.seed_visible(results.iter().take(initial_batch).map(|p| p.id.as_str()));

        tracing::debug!(
            posts = posts.len(),
            seeded = initial_batch.min(results.len()),
            "Feed session started"
        );

        Self {
            posts,
            index,
            filter,
            follow,
            results,
            playback,
        }
    }

    fn recompute(&mut self) {
        self.results = compute(&self.posts, &self.filter);
        tracing::debug!(
            results = self.results.len(),
            search = %self.filter.search_text,
            category = %self.filter.category,
            media = %self.filter.media_type,
            sort = %self.filter.sort_key,
            "Feed recomputed"
        );
    }

    // ========================================================================
    // Filter intents
    // ========================================================================

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.filter.search_text {
            self.filter.search_text = text;
            self.recompute();
        }
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        if category != self.filter.category {
            self.filter.category = category;
            self.recompute();
        }
    }

    pub fn set_media_type_filter(&mut self, media_type: MediaTypeFilter) {
        if media_type != self.filter.media_type {
            self.filter.media_type = media_type;
            self.recompute();
        }
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        if sort_key != self.filter.sort_key {
            self.filter.sort_key = sort_key;
            self.recompute();
        }
    }

    /// Reset search text, category, media type and sort.
    pub fn clear_all_filters(&mut self) {
        if !self.filter.is_unfiltered() {
            self.filter = FilterState::default();
            self.recompute();
        }
    }

    // ========================================================================
    // Playback intents
    // ========================================================================

    pub fn report_visibility<I, S>(&mut self, ids: I) -> VisibilityChange
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.playback.report_visibility(ids)
    }

    pub fn request_toggle(&mut self, post_id: &str) -> ToggleOutcome {
        self.playback.request_toggle(post_id)
    }

    pub fn attach_media_handle(&mut self, post_id: &str, handle: Box<dyn MediaHandle>) {
        self.playback.attach_media_handle(post_id, handle);
    }

    pub fn detach_media_handle(&mut self, post_id: &str) -> bool {
        self.playback.detach_media_handle(post_id)
    }

    pub fn report_playback_error(&mut self, post_id: &str) -> bool {
        self.playback.report_playback_stopped(post_id, StopReason::Failed)
    }

    pub fn report_playback_ended(&mut self, post_id: &str) -> bool {
        self.playback.report_playback_stopped(post_id, StopReason::Ended)
    }

    // ========================================================================
    // Follow
    // ========================================================================

    pub fn toggle_follow(&mut self, post_id: &str) -> Option<bool> {
        self.follow.toggle(post_id)
    }

    pub fn is_following(&self, post_id: &str) -> bool {
        self.follow.is_following(post_id)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The filtered, sorted feed.
    pub fn current_ordered_posts(&self) -> &[Arc<Post>] {
        &self.results
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn post(&self, post_id: &str) -> Option<&Arc<Post>> {
        self.index.get(post_id).and_then(|&i| self.posts.get(i))
    }

    /// Every loaded post, in file order.
    pub fn all_posts(&self) -> &[Arc<Post>] {
        &self.posts
    }

    pub fn is_playing(&self, post_id: &str) -> bool {
        self.playback.is_playing(post_id)
    }

    pub fn play_state(&self, post_id: &str) -> PlayState {
        self.playback.state(post_id)
    }

    pub fn handle_reports_playing(&self, post_id: &str) -> Option<bool> {
        self.playback.handle_reports_playing(post_id)
    }

    /// Play count of the attached handle, used to spot stale player reports.
    pub fn handle_play_generation(&self, post_id: &str) -> Option<u64> {
        self.playback.handle_play_generation(post_id)
    }

    pub fn has_media_handle(&self, post_id: &str) -> bool {
        self.playback.has_handle(post_id)
    }

    pub fn playing_count(&self) -> usize {
        self.playback.playing_ids().len()
    }
}

// ============================================================================
// Tests
// ============================================================================
