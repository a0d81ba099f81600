//! Filter & Sort modal.
//!
//! One row of chips each for category, media type and sort order. The
//! focused row is marked; `h`/`l` move its selection and apply it at once.

use crate::app::{App, FilterRow};
use crate::feed::{CategoryFilter, FilterState, MediaTypeFilter, SortKey};
use crate::util::capitalize;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MODAL_WIDTH: u16 = 72;
const MODAL_HEIGHT: u16 = 14;

/// Render the modal centered over the current screen.
pub fn render(f: &mut Frame, app: &App) {
    let (Some(focused), Some(session)) = (app.filter_modal, app.session()) else {
        return;
    };
    let filter = session.filter();

    let area = f.area();
    let width = MODAL_WIDTH.min(area.width.saturating_sub(4));
    let height = MODAL_HEIGHT.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 30 || overlay.height < 8 {
        return;
    }

    f.render_widget(Clear, overlay);

    let mut lines = Vec::with_capacity(MODAL_HEIGHT as usize);
    for row in FilterRow::ALL {
        let label_style = if row == focused {
            app.style("chip_cursor")
        } else {
            app.style("modal_title")
        };
        let marker = if row == focused { "> " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, row.label()),
            label_style,
        )));
        lines.push(chip_line(app, row, filter));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "(h/l) change  (j/k) row  (c) Clear All  (Enter) Apply",
        app.style("empty_hint"),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("modal_border"))
            .title(" Filter & Sort "),
    );

    f.render_widget(paragraph, overlay);
}

/// Chip labels for a row, paired with whether each is the active choice.
fn chips(row: FilterRow, filter: &FilterState) -> Vec<(String, bool)> {
    match row {
        FilterRow::Category => CategoryFilter::CHIPS
            .iter()
            .map(|c| (capitalize(c.name()).into_owned(), *c == filter.category))
            .collect(),
        FilterRow::MediaType => MediaTypeFilter::CHIPS
            .iter()
            .map(|m| (capitalize(m.name()).into_owned(), *m == filter.media_type))
            .collect(),
        FilterRow::Sort => SortKey::CHIPS
            .iter()
            .map(|s| (s.label().to_string(), *s == filter.sort_key))
            .collect(),
    }
}

fn chip_line(app: &App, row: FilterRow, filter: &FilterState) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (label, active) in chips(row, filter) {
        let style = if active {
            app.style("chip_active")
        } else {
            app.style("chip")
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Category, MediaType};

    #[test]
    fn test_default_chips_active() {
        let filter = FilterState::default();
        let category = chips(FilterRow::Category, &filter);
        assert_eq!(category.len(), 8);
        assert_eq!(category[0], ("All".to_string(), true));
        assert!(category[1..].iter().all(|(_, active)| !active));

        let sort = chips(FilterRow::Sort, &filter);
        assert_eq!(sort[0], ("Date".to_string(), true));
    }

    #[test]
    fn test_selected_chip_marked() {
        let filter = FilterState {
            category: CategoryFilter::Only(Category::Food),
            media_type: MediaTypeFilter::Only(MediaType::Video),
            ..FilterState::default()
        };
        let category = chips(FilterRow::Category, &filter);
        let active: Vec<_> = category.iter().filter(|(_, a)| *a).collect();
        assert_eq!(active, vec![&("Food".to_string(), true)]);

        let media = chips(FilterRow::MediaType, &filter);
        assert_eq!(media[2], ("Video".to_string(), true));
    }

    #[test]
    fn test_original_sort_marks_no_chip() {
        let filter = FilterState {
            sort_key: SortKey::Original,
            ..FilterState::default()
        };
        assert!(chips(FilterRow::Sort, &filter).iter().all(|(_, a)| !a));
    }
}
