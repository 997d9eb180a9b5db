use crate::cli::CliArgs;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help_popup(f: &mut Frame<'_>) {
    let popup_area = centered_rect(80, 80, f.area());
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn shortcut(key: &'static str, description: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" - {description}")),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Country Explorer",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from("Find the country you are in, or any other, and browse its neighbours."),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        shortcut("F1", "Toggle this help popup"),
        shortcut("w", "Where am I? Locate yourself and show your country"),
        shortcut("/", "Search a country by name"),
        shortcut("Tab", "Complete the search from the cards on screen"),
        shortcut("Enter", "Open the selected card's country"),
        shortcut("←↑↓→ / hjkl", "Move between cards"),
        shortcut("Home / End", "First / last card"),
        shortcut("Esc", "Close popup"),
        shortcut("q", "Quit application"),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Cards:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        TextLine::from(vec![
            Span::styled("  Cyan", Style::default().fg(Color::Cyan)),
            Span::raw(" - the country you asked for"),
        ]),
        TextLine::from(vec![
            Span::styled("  Magenta", Style::default().fg(Color::Magenta)),
            Span::raw(" - a country opened from another card"),
        ]),
        TextLine::from(vec![
            Span::styled("  Green", Style::default().fg(Color::Green)),
            Span::raw(" - a neighbour"),
        ]),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "CLI Options:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let help_text = CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
