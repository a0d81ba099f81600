use crate::app::{App, Tab};
use ratatui::{layout::Rect, text::Line, widgets::Tabs, Frame};

/// Render the tab bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let titles = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!(" {} {} ", i + 1, tab.title())));
    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.style("tab_inactive"))
        .highlight_style(app.style("tab_active"))
        .divider("|");

    f.render_widget(tabs, area);
}
