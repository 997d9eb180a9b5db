use country_explorer::render::Card;
use country_explorer::Role;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

/// Two borders plus five detail lines.
pub const CARD_HEIGHT: u16 = 7;

pub const fn role_color(role: Role) -> Color {
    match role {
        Role::Primary => Color::Cyan,
        Role::Clicked => Color::Magenta,
        Role::Neighbour => Color::Green,
    }
}

pub fn render_card(f: &mut Frame<'_>, area: Rect, card: &Card, selected: bool) {
    let color = role_color(card.role);
    let (border_style, border_type) = if selected {
        (Style::default().fg(Color::Yellow), BorderType::Thick)
    } else {
        (Style::default().fg(color), BorderType::Rounded)
    };

    let mut title_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if card.role.is_lead() {
        title_style = title_style.add_modifier(Modifier::UNDERLINED);
    }

    let block = Block::default()
        .title(Span::styled(format!(" {} ", card.title()), title_style))
        .title_bottom(TextLine::from(Span::styled(
            format!(" {} · {} ", card.role.label(), card.code),
            Style::default().fg(Color::Gray),
        )))
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    let lines = vec![
        detail_line("🌍", &card.region),
        detail_line("👫", &card.population),
        detail_line("🗣️", &card.languages),
        detail_line("💰", &card.currencies),
        detail_line("🏳️", card.flag_image.as_deref().unwrap_or("no flag image")),
    ];

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn detail_line<'a>(icon: &'a str, value: &'a str) -> TextLine<'a> {
    TextLine::from(vec![
        Span::raw(icon),
        Span::raw(" "),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}
