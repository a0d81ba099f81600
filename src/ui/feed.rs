//! Feed screen: search bar, post cards and the empty state.

use crate::app::{App, CARD_HEIGHT};
use crate::feed::{CategoryFilter, MediaTypeFilter, Post, SortKey};
use crate::playback::PlayState;
use crate::session::FeedSession;
use crate::util::{display_width, format_clock, format_count, strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SEARCH_PLACEHOLDER: &str = "Search posts, people, places...";

/// Render the feed screen for the active tab.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_search_bar(f, app, chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(format!(" {} ", app.tab.title()));
    let inner = block.inner(chunks[1]);
    app.set_feed_viewport(inner.height as usize);
    let app: &App = app;

    let (Some(slot), Some(session)) = (app.tab.feed_slot(), app.session()) else {
        f.render_widget(block, chunks[1]);
        return;
    };

    let posts = session.current_ordered_posts();
    if posts.is_empty() {
        render_empty_state(f, app, block, chunks[1]);
        return;
    }

    // Build only the cards that reach the viewport.
    let view = app.feed_view();
    let first = view.scroll / CARD_HEIGHT;
    let last = (view.scroll + inner.height as usize)
        .div_ceil(CARD_HEIGHT)
        .min(posts.len());
    let width = inner.width as usize;

    let mut lines = Vec::with_capacity((last - first) * CARD_HEIGHT);
    for (i, post) in posts.iter().enumerate().take(last).skip(first) {
        let card = CardContext {
            app,
            session,
            slot,
            selected: i == view.selected,
            width,
        };
        lines.extend(card.lines(post));
    }

    let offset = (view.scroll - first * CARD_HEIGHT).min(u16::MAX as usize) as u16;
    f.render_widget(Paragraph::new(lines).block(block).scroll((offset, 0)), chunks[1]);
}

fn render_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = app.search_text();
    let content = if app.search_mode {
        Line::from(vec![
            Span::raw(strip_control_chars(text).into_owned()),
            Span::styled("_", app.style("search_active")),
        ])
    } else if text.is_empty() {
        Line::from(Span::styled(SEARCH_PLACEHOLDER, app.style("search_placeholder")))
    } else {
        Line::from(strip_control_chars(text).into_owned())
    };

    let filter_hint = match app.session().map(|s| active_filter_count(s)) {
        Some(0) | None => " [F] Filters ".to_string(),
        Some(n) => format!(" [F] Filters ({}) ", n),
    };

    let border = if app.search_mode {
        app.style("search_active")
    } else {
        app.style("search_bar")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Search ")
        .title_top(Line::from(filter_hint).alignment(Alignment::Right));

    f.render_widget(Paragraph::new(content).block(block), area);
}

/// Chip selections that differ from the defaults.
fn active_filter_count(session: &FeedSession) -> usize {
    let filter = session.filter();
    usize::from(filter.category != CategoryFilter::All)
        + usize::from(filter.media_type != MediaTypeFilter::All)
        + usize::from(filter.sort_key != SortKey::Date)
}

fn render_empty_state(f: &mut Frame, app: &App, block: Block<'_>, area: Rect) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    let top_pad = inner.height.saturating_sub(2) / 2;
    let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled("No posts found", app.style("empty_title"))));
    lines.push(Line::from(Span::styled(
        "Try adjusting your search or filters",
        app.style("empty_hint"),
    )));

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

// ============================================================================
// Post Card
// ============================================================================

struct CardContext<'a> {
    app: &'a App,
    session: &'a FeedSession,
    slot: usize,
    selected: bool,
    width: usize,
}

impl CardContext<'_> {
    /// Exactly `CARD_HEIGHT` lines: author, media, meta, caption, separator.
    fn lines(&self, post: &Post) -> [Line<'static>; CARD_HEIGHT] {
        [
            self.author_line(post),
            self.media_line(post),
            self.text_line(
                &format!(
                    "{} · {} · {} Views",
                    post.date,
                    post.location,
                    format_count(post.views)
                ),
                self.app.style("card_meta"),
            ),
            self.text_line(&post.caption, self.app.style("card_caption")),
            Line::from(""),
        ]
    }

    fn marker(&self) -> Span<'static> {
        if self.selected {
            Span::styled("▌ ", self.app.style("card_selected"))
        } else {
            Span::raw("  ")
        }
    }

    fn author_line(&self, post: &Post) -> Line<'static> {
        let (label, style) = if self.session.is_following(&post.id) {
            (" Following ", self.app.style("following_button"))
        } else {
            (" Follow ", self.app.style("follow_button"))
        };

        let room = self.width.saturating_sub(2 + display_width(label) + 1);
        let name = strip_control_chars(&post.user_name);
        let name = truncate_to_width(&name, room).into_owned();
        let pad = room.saturating_sub(display_width(&name)) + 1;

        Line::from(vec![
            self.marker(),
            Span::styled(name, self.app.style("card_author")),
            Span::raw(" ".repeat(pad)),
            Span::styled(label, style),
        ])
    }

    fn media_line(&self, post: &Post) -> Line<'static> {
        if !post.is_video() {
            return Line::from(vec![
                self.marker(),
                Span::styled("▣ Photo", self.app.style("card_media")),
            ]);
        }

        let duration = post.duration_secs;
        let position = self.app.position(self.slot, &post.id);
        let clock = match (position, duration) {
            (Some((pos, total)), _) => format!(" {} / {}", format_clock(pos), format_clock(total)),
            (None, Some(total)) => format!(" {}", format_clock(total)),
            (None, None) => String::new(),
        };

        let (text, style) = match self.session.play_state(&post.id) {
            PlayState::VisiblePlaying => {
                // The player buffers briefly before its first frame.
                if self.session.handle_reports_playing(&post.id) == Some(true) {
                    (format!("▶ Playing{}", clock), self.app.style("card_playing"))
                } else {
                    ("… Starting".to_string(), self.app.style("card_playing"))
                }
            }
            PlayState::VisibleIdle | PlayState::Hidden if position.is_some() => {
                (format!("❚❚ Paused{}", clock), self.app.style("card_media"))
            }
            PlayState::VisibleIdle | PlayState::Hidden => {
                (format!("▷ Video{}", clock), self.app.style("card_media"))
            }
        };

        Line::from(vec![self.marker(), Span::styled(text, style)])
    }

    fn text_line(&self, text: &str, style: Style) -> Line<'static> {
        let clean = strip_control_chars(text);
        let shown = truncate_to_width(&clean, self.width.saturating_sub(2)).into_owned();
        Line::from(vec![self.marker(), Span::styled(shown, style)])
    }
}
