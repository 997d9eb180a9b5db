use crate::app::App;
use crate::ui::widgets::popup::{centered_strip, ClearWidget};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_search_popup(app: &App, f: &mut Frame<'_>) {
    let area = centered_strip(60, 3, f.area());
    f.render_widget(ClearWidget, area);

    let block = Block::default()
        .title(" Search country ")
        .title_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(TextLine::from(Span::styled(
            " Tab: complete  Enter: search  Esc: cancel ",
            Style::default().fg(Color::Gray),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let input = TextLine::from(vec![
        Span::styled("> ", Style::default().fg(Color::Green)),
        Span::styled(app.search_input.as_str(), Style::default().fg(Color::White)),
        Span::styled("█", Style::default().fg(Color::Green)),
    ]);

    f.render_widget(Paragraph::new(input).block(block), area);
}
