//! Render functions for the TUI.
//!
//! Lays out the tab bar, the active screen and the status bar, then draws
//! overlays on top.

use crate::app::{App, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use super::{feed, filter_modal, help, profile, status, tabs};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    tabs::render(f, app, chunks[0]);
    match app.tab {
        Tab::Profile => profile::render(f, app, chunks[1]),
        _ => feed::render(f, app, chunks[1]),
    }
    status::render(f, app, chunks[2]);

    if app.filter_modal.is_some() {
        filter_modal::render(f, app);
    }

    if app.show_help {
        help::render(f, app);
    }
}
