//! "Update Account" screen.

use crate::app::App;
use crate::profile::{ProfileField, MAX_BIO_CHARS};
use crate::util::strip_control_chars;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const LABEL_WIDTH: usize = 12;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.profile;
    let mut lines = Vec::with_capacity(ProfileField::ALL.len() * 2 + 3);

    for field in ProfileField::ALL {
        let selected = form.selected_field() == field;
        let marker = if selected {
            Span::styled("▌ ", app.style("card_selected"))
        } else {
            Span::raw("  ")
        };
        let label = Span::styled(
            format!("{:<width$}", field.label(), width = LABEL_WIDTH),
            app.style("profile_label"),
        );

        let value = match form.edit_buffer(field) {
            Some(buffer) => Span::styled(format!("{}_", buffer), app.style("profile_editing")),
            None => Span::styled(
                strip_control_chars(form.profile().value(field)).into_owned(),
                app.style("profile_value"),
            ),
        };
        lines.push(Line::from(vec![marker, label, value]));

        if field == ProfileField::Bio {
            let used = form.bio_chars();
            let style = if used > MAX_BIO_CHARS {
                app.style("error")
            } else {
                app.style("empty_hint")
            };
            lines.push(Line::from(Span::styled(
                format!("{:>width$}{}/{}", "", used, MAX_BIO_CHARS, width = LABEL_WIDTH + 2),
                style,
            )));
        }
        lines.push(Line::from(""));
    }

    let hint = if form.is_editing() {
        "(Enter) save  (Esc) cancel  (Ctrl+u) clear"
    } else {
        "(Enter) edit field  (o) open photo  (j/k) select"
    };
    lines.push(Line::from(Span::styled(hint, app.style("empty_hint"))));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border"))
                .title(" Update Account "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
