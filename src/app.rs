use crate::config::Config;
use crate::feed::{CategoryFilter, MediaTypeFilter, Post, PostSet, SortKey};
use crate::keybindings::KeybindingRegistry;
use crate::playback::{spawn_player, IgnoreReason, PlayerReport, ToggleOutcome};
use crate::profile::{ProfileField, ProfileForm};
use crate::session::FeedSession;
use crate::theme::{StyleMap, ThemeVariant};
use crate::util::MAX_SEARCH_LENGTH;
use ratatui::style::Style;
use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Lines one post card occupies in the feed list, separator included.
pub const CARD_HEIGHT: usize = 5;

/// Share of a card (percent) that must be on screen for it to count as visible.
pub const VISIBLE_PERCENT_THRESHOLD: usize = 50;

/// Tabs that mount a feed screen.
pub const FEED_TABS: usize = 4;

// ============================================================================
// Tabs
// ============================================================================

/// Bottom-tab navigation. The first four tabs each own a feed screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Feed,
    Discover,
    Create,
    Notifications,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Self::Feed,
        Self::Discover,
        Self::Create,
        Self::Notifications,
        Self::Profile,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Feed => "Feed",
            Self::Discover => "Discover",
            Self::Create => "Create",
            Self::Notifications => "Notifications",
            Self::Profile => "Profile",
        }
    }

    /// Index of this tab's feed session, `None` for the profile tab.
    pub fn feed_slot(self) -> Option<usize> {
        match self {
            Self::Feed => Some(0),
            Self::Discover => Some(1),
            Self::Create => Some(2),
            Self::Notifications => Some(3),
            Self::Profile => None,
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ============================================================================
// Filter Modal
// ============================================================================

/// Chip row focused in the filter modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRow {
    Category,
    MediaType,
    Sort,
}

impl FilterRow {
    pub const ALL: [FilterRow; 3] = [Self::Category, Self::MediaType, Self::Sort];

    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::MediaType => "Media Type",
            Self::Sort => "Sort By",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Category => Self::MediaType,
            Self::MediaType | Self::Sort => Self::Sort,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Category | Self::MediaType => Self::Category,
            Self::Sort => Self::MediaType,
        }
    }
}

/// Step through `chips` from `current`, wrapping. Values not among the chips
/// start at the first chip.
fn step_chip<T: Copy + PartialEq>(chips: &[T], current: T, delta: isize) -> T {
    let len = chips.len() as isize;
    let next = match chips.iter().position(|c| *c == current) {
        Some(idx) => (idx as isize + delta).rem_euclid(len),
        None => 0,
    };
    chips[next as usize]
}

// ============================================================================
// Viewport
// ============================================================================

/// Per-tab list position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedView {
    pub selected: usize,
    /// Top line of the viewport, in list lines.
    pub scroll: usize,
}

/// Cards at least [`VISIBLE_PERCENT_THRESHOLD`] percent inside a viewport of
/// `viewport` lines scrolled to `scroll`.
pub fn visible_cards(count: usize, scroll: usize, viewport: usize) -> Range<usize> {
    if count == 0 || viewport == 0 {
        return 0..0;
    }
    let end_line = scroll + viewport;
    let first = scroll / CARD_HEIGHT;
    let last = end_line.div_ceil(CARD_HEIGHT).min(count);

    let is_visible = |i: usize| {
        let top = i * CARD_HEIGHT;
        let shown = (top + CARD_HEIGHT).min(end_line).saturating_sub(top.max(scroll));
        shown * 100 >= CARD_HEIGHT * VISIBLE_PERCENT_THRESHOLD
    };

    let start = (first..last).find(|&i| is_visible(i));
    match start {
        Some(start) => {
            let end = (start..last).take_while(|&i| is_visible(i)).last().unwrap_or(start);
            start..end + 1
        }
        None => 0..0,
    }
}

// ============================================================================
// Events
// ============================================================================

/// Events from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    /// A simulated player started, advanced, finished or failed.
    Playback(PlayerReport),
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    // Data
    posts: PostSet,
    initial_batch: usize,
    /// Feed screens, created on first visit to their tab.
    sessions: [Option<FeedSession>; FEED_TABS],
    views: [FeedView; FEED_TABS],

    // UI State
    pub tab: Tab,
    /// List lines available to post cards, measured by the last render.
    /// Zero until the first frame.
    pub feed_viewport_lines: usize,
    pub search_mode: bool,
    pub filter_modal: Option<FilterRow>,
    pub profile: ProfileForm,

    /// Last reported player position per (session, post): (position, duration).
    pub positions: HashMap<(usize, String), (u32, u32)>,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub show_help: bool,
    pub help_scroll_offset: usize,
    pub needs_redraw: bool,

    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    /// Build the app and open the Feed tab.
    pub fn new(posts: PostSet, config: &Config, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!("{}", warning);
        }

        let mut app = Self {
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            posts,
            initial_batch: config.initial_render_batch,
            sessions: std::array::from_fn(|_| None),
            views: [FeedView::default(); FEED_TABS],
            tab: Tab::Feed,
            feed_viewport_lines: 0,
            search_mode: false,
            filter_modal: None,
            profile: ProfileForm::new(config.profile.clone()),
            positions: HashMap::new(),
            status_message: None,
            show_help: false,
            help_scroll_offset: 0,
            needs_redraw: true,
            event_tx,
        };
        app.ensure_session(0);
        app
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns its name for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    fn ensure_session(&mut self, slot: usize) -> &mut FeedSession {
        self.sessions[slot].get_or_insert_with(|| {
            tracing::info!(slot, "Opening feed screen");
            FeedSession::new(&self.posts, self.initial_batch)
        })
    }

    /// The active tab's feed session.
    pub fn session(&self) -> Option<&FeedSession> {
        self.tab.feed_slot().and_then(|slot| self.sessions[slot].as_ref())
    }

    pub fn session_mut(&mut self) -> Option<&mut FeedSession> {
        let slot = self.tab.feed_slot()?;
        self.sessions[slot].as_mut()
    }

    pub fn session_at(&self, slot: usize) -> Option<&FeedSession> {
        self.sessions.get(slot).and_then(Option::as_ref)
    }

    pub fn session_at_mut(&mut self, slot: usize) -> Option<&mut FeedSession> {
        self.sessions.get_mut(slot).and_then(Option::as_mut)
    }

    pub fn feed_view(&self) -> FeedView {
        self.tab
            .feed_slot()
            .map(|slot| self.views[slot])
            .unwrap_or_default()
    }

    pub fn selected_post(&self) -> Option<Arc<Post>> {
        let session = self.session()?;
        session
            .current_ordered_posts()
            .get(self.feed_view().selected)
            .cloned()
    }

    pub fn position(&self, slot: usize, post_id: &str) -> Option<(u32, u32)> {
        self.positions.get(&(slot, post_id.to_string())).copied()
    }

    // ========================================================================
    // Tabs
    // ========================================================================

    /// Switch tabs. The tab being left reports an empty viewport so its
    /// videos pause; the new feed tab is opened on first visit.
    pub fn switch_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }

        if let Some(session) = self.session_mut() {
            let change = session.report_visibility(std::iter::empty::<&str>());
            tracing::debug!(paused = change.paused.len(), "Feed screen hidden");
        }
        self.search_mode = false;
        self.filter_modal = None;
        self.profile.cancel_edit();

        self.tab = tab;
        if let Some(slot) = tab.feed_slot() {
            self.ensure_session(slot);
            self.clamp_view();
            self.report_viewport();
        }
        self.needs_redraw = true;
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    fn cards_per_page(&self) -> usize {
        (self.feed_viewport_lines / CARD_HEIGHT).max(1)
    }

    fn result_count(&self) -> usize {
        self.session()
            .map(|s| s.current_ordered_posts().len())
            .unwrap_or(0)
    }

    /// Move the feed selection by `delta` cards, or the profile field
    /// selection on the profile tab.
    pub fn move_selection(&mut self, delta: isize) {
        let Some(slot) = self.tab.feed_slot() else {
            let steps = delta.unsigned_abs().min(ProfileField::ALL.len());
            for _ in 0..steps {
                if delta > 0 {
                    self.profile.select_next();
                } else {
                    self.profile.select_prev();
                }
            }
            return;
        };
        let count = self.result_count();
        let view = &mut self.views[slot];
        view.selected = if delta >= 0 {
            view.selected.saturating_add(delta as usize)
        } else {
            view.selected.saturating_sub(delta.unsigned_abs())
        }
        .min(count.saturating_sub(1));
        self.clamp_view();
        self.report_viewport();
    }

    pub fn nav_down(&mut self) {
        self.move_selection(1);
    }

    pub fn nav_up(&mut self) {
        self.move_selection(-1);
    }

    pub fn page_down(&mut self) {
        self.move_selection(self.cards_per_page() as isize);
    }

    pub fn page_up(&mut self) {
        self.move_selection(-(self.cards_per_page() as isize));
    }

    pub fn jump_top(&mut self) {
        self.move_selection(isize::MIN);
    }

    pub fn jump_bottom(&mut self) {
        self.move_selection(isize::MAX);
    }

    /// Clamp the selection to the result and scroll so the selected card is
    /// fully on screen.
    fn clamp_view(&mut self) {
        let Some(slot) = self.tab.feed_slot() else {
            return;
        };
        let count = self.result_count();
        let viewport = self.feed_viewport_lines;
        let view = &mut self.views[slot];

        view.selected = view.selected.min(count.saturating_sub(1));
        let max_scroll = (count * CARD_HEIGHT).saturating_sub(viewport);
        if viewport > 0 {
            let top = view.selected * CARD_HEIGHT;
            // The trailing separator line may fall off the bottom.
            let bottom = top + CARD_HEIGHT - 1;
            if top < view.scroll {
                view.scroll = top;
            } else if bottom > view.scroll + viewport {
                view.scroll = bottom - viewport;
            }
        }
        view.scroll = view.scroll.min(max_scroll);
    }

    /// Record a new viewport height from the renderer.
    pub fn set_feed_viewport(&mut self, lines: usize) {
        if lines != self.feed_viewport_lines {
            self.feed_viewport_lines = lines;
            self.clamp_view();
        }
    }

    /// Report the on-screen posts of the active feed tab to its session.
    ///
    /// Video posts that come on screen get a player attached the first time.
    /// Does nothing before the first frame has measured the viewport. Players
    /// are tokio tasks, so this must run inside a runtime.
    pub fn report_viewport(&mut self) {
        let Some(slot) = self.tab.feed_slot() else {
            return;
        };
        if self.feed_viewport_lines == 0 {
            return;
        }
        let view = self.views[slot];
        let lines = self.feed_viewport_lines;
        let Some(session) = self.sessions[slot].as_mut() else {
            return;
        };

        let results = session.current_ordered_posts();
        let range = visible_cards(results.len(), view.scroll, lines);
        let visible: Vec<Arc<Post>> = results[range].to_vec();
        let change = session.report_visibility(visible.iter().map(|p| p.id.as_str()));

        for post in visible.iter().filter(|p| p.is_video()) {
            if !session.has_media_handle(&post.id) {
                let handle = spawn_player(slot, post, self.event_tx.clone());
                session.attach_media_handle(&post.id, Box::new(handle));
            }
        }

        if !change.is_empty() {
            tracing::debug!(
                slot,
                shown = change.shown,
                hidden = change.hidden,
                paused = change.paused.len(),
                "Viewport changed"
            );
            self.needs_redraw = true;
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub fn enter_search(&mut self) {
        if self.tab.feed_slot().is_some() {
            self.search_mode = true;
        }
    }

    pub fn search_text(&self) -> &str {
        self.session()
            .map(|s| s.filter().search_text.as_str())
            .unwrap_or("")
    }

    /// Append to the search text. Returns false at the length cap.
    pub fn push_search_char(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        let mut text = self.search_text().to_string();
        if text.chars().count() >= MAX_SEARCH_LENGTH {
            self.set_status(format!(
                "Search text too long (max {} chars)",
                MAX_SEARCH_LENGTH
            ));
            return false;
        }
        text.push(c);
        self.set_search_text(text);
        true
    }

    pub fn pop_search_char(&mut self) {
        let mut text = self.search_text().to_string();
        if text.pop().is_some() {
            self.set_search_text(text);
        }
    }

    pub fn set_search_text(&mut self, text: String) {
        if let Some(session) = self.session_mut() {
            session.set_search_text(text);
            self.after_filter_change();
        }
    }

    // ========================================================================
    // Filter modal
    // ========================================================================

    pub fn open_filters(&mut self) {
        if self.tab.feed_slot().is_some() {
            self.filter_modal = Some(FilterRow::Category);
        }
    }

    /// Close the modal. Chip changes are already applied.
    pub fn apply_filters(&mut self) {
        self.filter_modal = None;
    }

    pub fn filter_row_down(&mut self) {
        if let Some(row) = self.filter_modal.as_mut() {
            *row = row.next();
        }
    }

    pub fn filter_row_up(&mut self) {
        if let Some(row) = self.filter_modal.as_mut() {
            *row = row.prev();
        }
    }

    /// Move the focused row's selection by one chip and apply it.
    pub fn shift_chip(&mut self, delta: isize) {
        let Some(row) = self.filter_modal else {
            return;
        };
        let Some(session) = self.session_mut() else {
            return;
        };
        let filter = session.filter().clone();
        match row {
            FilterRow::Category => session.set_category_filter(step_chip(
                &CategoryFilter::CHIPS,
                filter.category,
                delta,
            )),
            FilterRow::MediaType => session.set_media_type_filter(step_chip(
                &MediaTypeFilter::CHIPS,
                filter.media_type,
                delta,
            )),
            FilterRow::Sort => {
                session.set_sort_key(step_chip(&SortKey::CHIPS, filter.sort_key, delta))
            }
        }
        self.after_filter_change();
    }

    /// Reset search text, category, media type and sort.
    pub fn clear_all_filters(&mut self) {
        if let Some(session) = self.session_mut() {
            session.clear_all_filters();
            self.after_filter_change();
            self.set_status("Filters cleared");
        }
    }

    /// A new result starts at the top of the list.
    fn after_filter_change(&mut self) {
        if let Some(slot) = self.tab.feed_slot() {
            self.views[slot] = FeedView::default();
        }
        self.clamp_view();
        self.report_viewport();
        self.needs_redraw = true;
    }

    // ========================================================================
    // Post actions
    // ========================================================================

    /// Toggle playback of the selected post.
    pub fn toggle_play_selected(&mut self) -> Option<ToggleOutcome> {
        let post = self.selected_post()?;
        let outcome = self.session_mut()?.request_toggle(&post.id);
        match outcome {
            ToggleOutcome::Ignored(IgnoreReason::NotVideo) => {
                self.set_status("Not a video");
            }
            ToggleOutcome::Ignored(IgnoreReason::NoHandle) => {
                self.set_status("Player not ready");
            }
            ToggleOutcome::Ignored(reason) => {
                tracing::debug!(post_id = %post.id, ?reason, "Toggle ignored");
            }
            ToggleOutcome::Started | ToggleOutcome::Paused => {}
        }
        Some(outcome)
    }

    /// Toggle following the selected post's author.
    pub fn toggle_follow_selected(&mut self) -> Option<bool> {
        let post = self.selected_post()?;
        let following = self.session_mut()?.toggle_follow(&post.id)?;
        if following {
            self.set_status(format!("Following {}", post.user_name));
        } else {
            self.set_status(format!("Unfollowed {}", post.user_name));
        }
        Some(following)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{PlayState, PlayerReportKind};
    use pretty_assertions::assert_eq;
    use tokio::time::{self, Duration};

    fn test_app() -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(64);
        let posts = PostSet::sample().unwrap();
        (App::new(posts, &Config::default(), tx), rx)
    }

    fn ids(app: &App) -> Vec<String> {
        app.session()
            .unwrap()
            .current_ordered_posts()
            .iter()
            .map(|p| p.id.clone())
            .collect()
    }

    #[test]
    fn test_visible_cards_threshold() {
        // Viewport of 12 lines over 5-line cards: cards 0 and 1 whole,
        // card 2 has 2/5 lines on screen.
        assert_eq!(visible_cards(10, 0, 12), 0..2);
        // 13 lines: card 2 has 3/5 on screen.
        assert_eq!(visible_cards(10, 0, 13), 0..3);
        // Scrolled 3 lines: card 0 has 2/5 left.
        assert_eq!(visible_cards(10, 3, 10), 1..3);
        // Scrolled 2 lines: card 2 has only 2/5 on screen.
        assert_eq!(visible_cards(10, 2, 10), 0..2);
        // Viewport 11: card 2 reaches 3/5.
        assert_eq!(visible_cards(10, 2, 11), 0..3);
    }

    #[test]
    fn test_visible_cards_edges() {
        assert_eq!(visible_cards(0, 0, 20), 0..0);
        assert_eq!(visible_cards(5, 0, 0), 0..0);
        assert_eq!(visible_cards(2, 0, 100), 0..2);
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Feed.next(), Tab::Discover);
        assert_eq!(Tab::Profile.next(), Tab::Feed);
        assert_eq!(Tab::Feed.prev(), Tab::Profile);
        assert_eq!(Tab::Profile.feed_slot(), None);
    }

    #[test]
    fn test_step_chip_wraps() {
        let chips = MediaTypeFilter::CHIPS;
        assert_eq!(step_chip(&chips, MediaTypeFilter::All, -1), chips[2]);
        assert_eq!(step_chip(&chips, chips[2], 1), MediaTypeFilter::All);
        assert_eq!(step_chip(&SortKey::CHIPS, SortKey::Original, 1), SortKey::Date);
    }

    #[tokio::test]
    async fn test_feed_tab_opens_on_start() {
        let (app, _rx) = test_app();
        assert_eq!(app.tab, Tab::Feed);
        assert!(app.session_at(0).is_some());
        assert!(app.session_at(1).is_none());
        assert_eq!(ids(&app).len(), 10);
    }

    #[tokio::test]
    async fn test_viewport_report_attaches_players() {
        let (mut app, _rx) = test_app();
        app.set_feed_viewport(15);
        app.report_viewport();

        let session = app.session().unwrap();
        let visible: Vec<_> = session.current_ordered_posts()[..3].to_vec();
        for post in &visible {
            assert_eq!(session.play_state(&post.id), PlayState::VisibleIdle);
            assert_eq!(session.has_media_handle(&post.id), post.is_video());
        }
        let below = &session.current_ordered_posts()[3];
        assert_eq!(session.play_state(&below.id), PlayState::Hidden);
    }

    #[tokio::test]
    async fn test_scrolling_pauses_video() {
        let (mut app, _rx) = test_app();
        app.set_feed_viewport(10);
        app.report_viewport();

        let first_video = ids(&app)
            .into_iter()
            .position(|id| app.session().unwrap().post(&id).unwrap().is_video())
            .unwrap();
        for _ in 0..first_video {
            app.nav_down();
        }
        assert_eq!(app.toggle_play_selected(), Some(ToggleOutcome::Started));
        let id = app.selected_post().unwrap().id.clone();

        app.jump_bottom();
        assert!(!app.session().unwrap().is_playing(&id));
    }

    #[tokio::test]
    async fn test_leaving_tab_pauses_and_keeps_session() {
        let (mut app, _rx) = test_app();
        app.set_feed_viewport(30);
        app.report_viewport();

        let video = ids(&app)
            .into_iter()
            .take(visible_cards(10, 0, 30).end)
            .find(|id| app.session().unwrap().post(id).unwrap().is_video())
            .unwrap();
        app.session_mut().unwrap().request_toggle(&video);
        assert!(app.session().unwrap().is_playing(&video));

        app.switch_tab(Tab::Discover);
        assert!(app.session_at(1).is_some());
        assert!(!app.session_at(0).unwrap().is_playing(&video));

        app.switch_tab(Tab::Feed);
        assert_eq!(
            app.session().unwrap().play_state(&video),
            PlayState::VisibleIdle
        );
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let (mut app, _rx) = test_app();
        app.set_search_text("nidhi".to_string());
        let feed_ids = ids(&app);

        app.switch_tab(Tab::Notifications);
        assert_eq!(app.search_text(), "");
        assert_eq!(ids(&app).len(), 10);

        app.switch_tab(Tab::Feed);
        assert_eq!(ids(&app), feed_ids);
    }

    #[tokio::test]
    async fn test_search_input_capped() {
        let (mut app, _rx) = test_app();
        app.enter_search();
        for _ in 0..MAX_SEARCH_LENGTH {
            assert!(app.push_search_char('a'));
        }
        assert!(!app.push_search_char('a'));
        assert_eq!(app.search_text().len(), MAX_SEARCH_LENGTH);
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_filter_change_resets_selection() {
        let (mut app, _rx) = test_app();
        app.set_feed_viewport(20);
        app.jump_bottom();
        assert_eq!(app.feed_view().selected, 9);

        app.open_filters();
        app.filter_row_down();
        app.shift_chip(1); // media: all -> image
        assert_eq!(app.feed_view(), FeedView::default());
        let session = app.session().unwrap();
        assert!(session
            .current_ordered_posts()
            .iter()
            .all(|p| !p.is_video()));
    }

    #[tokio::test]
    async fn test_clear_all_filters_resets_search() {
        let (mut app, _rx) = test_app();
        app.set_search_text("zzz".to_string());
        assert!(ids(&app).is_empty());
        app.clear_all_filters();
        assert_eq!(app.search_text(), "");
        assert_eq!(ids(&app).len(), 10);
    }

    #[tokio::test]
    async fn test_toggle_on_image_sets_status() {
        let (mut app, _rx) = test_app();
        app.set_feed_viewport(20);
        app.report_viewport();
        let image = ids(&app)
            .into_iter()
            .position(|id| !app.session().unwrap().post(&id).unwrap().is_video())
            .unwrap();
        for _ in 0..image {
            app.nav_down();
        }
        assert_eq!(
            app.toggle_play_selected(),
            Some(ToggleOutcome::Ignored(IgnoreReason::NotVideo))
        );
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| m.as_ref()),
            Some("Not a video")
        );
    }

    #[tokio::test]
    async fn test_follow_toggle_status() {
        let (mut app, _rx) = test_app();
        let post = app.selected_post().unwrap();
        let before = app.session().unwrap().is_following(&post.id);
        assert_eq!(app.toggle_follow_selected(), Some(!before));
        assert!(app.status_message.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_player_reports_reach_channel() {
        let (mut app, mut rx) = test_app();
        app.set_feed_viewport(30);
        app.report_viewport();
        let video = ids(&app)
            .into_iter()
            .take(6)
            .find(|id| app.session().unwrap().post(id).unwrap().is_video())
            .unwrap();
        app.session_mut().unwrap().request_toggle(&video);

        let AppEvent::Playback(report) = rx.recv().await.unwrap();
        assert_eq!(report.session, 0);
        assert_eq!(report.post_id, video);
        assert_eq!(report.kind, PlayerReportKind::Started);
    }

    #[tokio::test]
    async fn test_status_expires_after_3_seconds() {
        let (mut app, _rx) = test_app();
        time::pause();
        app.set_status("Test message");

        time::advance(Duration::from_secs(2)).await;
        assert!(!app.clear_expired_status());
        assert!(app.status_message.is_some());

        time::advance(Duration::from_secs(2)).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_cycle_theme_round_trip() {
        let (mut app, _rx) = test_app();
        assert_eq!(app.theme_variant, ThemeVariant::Dark);
        let dark = app.style("chip_active");

        app.needs_redraw = false;
        assert_eq!(app.cycle_theme(), "Light");
        assert!(app.needs_redraw);
        assert_ne!(app.style("chip_active"), dark);

        assert_eq!(app.cycle_theme(), "Dark");
        assert_eq!(app.style("chip_active"), dark);
    }

    #[tokio::test]
    async fn test_config_applied() {
        let (tx, _rx) = mpsc::channel(8);
        let config = Config::parse(
            "theme = \"light\"\n[keybindings]\ntoggle_play = \"p\"\n",
        )
        .unwrap();
        let app = App::new(PostSet::sample().unwrap(), &config, tx);
        assert_eq!(app.theme_variant, ThemeVariant::Light);
        assert_eq!(
            app.keybindings.action_for_key(
                crossterm::event::KeyCode::Char('p'),
                crossterm::event::KeyModifiers::NONE,
                crate::keybindings::Context::Feed,
            ),
            Some(crate::keybindings::Action::TogglePlay)
        );
    }

    #[tokio::test]
    async fn test_profile_tab_moves_field_selection() {
        let (mut app, _rx) = test_app();
        app.switch_tab(Tab::Profile);
        let first = app.profile.selected_field();
        app.nav_down();
        assert_ne!(app.profile.selected_field(), first);
        assert!(app.selected_post().is_none());
    }
}
