use crate::app::App;
use crate::ui::widgets::card::{render_card, CARD_HEIGHT};
use crate::ui::widgets::grid::{first_visible_row, row_count};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;
use throbber_widgets_tui::Throbber;

pub fn render_cards(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title and location
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_section(app, f, layout[0]);
    render_panel(app, f, layout[1]);
    render_status_section(app, f, layout[2]);
    f.render_widget(shortcuts_line(), layout[3]);
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("== Country Explorer ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let location = app.deck.location().map_or_else(
        || {
            Span::styled(
                "Press 'w' to locate yourself or '/' to search",
                Style::default().fg(Color::Gray),
            )
        },
        |place| Span::styled(format!("📍 {place}"), Style::default().fg(Color::White)),
    );

    let lines = vec![
        TextLine::from(location),
        TextLine::from(Span::styled(
            format!("{} cards", app.deck.len()),
            Style::default().fg(Color::Gray),
        )),
    ];

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

/// The panel stays hidden while a cycle runs and fades in once it is revealed.
fn render_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    if !app.deck.is_revealed() {
        let throbber = Throbber::default()
            .label("Resolving countries...")
            .style(Style::default().fg(Color::Yellow))
            .throbber_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        let waiting = Paragraph::new(throbber.to_line(&app.throbber_state))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
        f.render_widget(waiting, area);
        return;
    }

    if let Some(error) = app.deck.error() {
        let message = Paragraph::new(Text::from(vec![
            TextLine::from(""),
            TextLine::from(Span::styled(
                error,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
        ]))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red)));
        f.render_widget(message, area);
    } else if app.deck.is_empty() {
        let hint = Paragraph::new("No countries yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
        f.render_widget(hint, area);
    } else {
        render_grid(app, f, area);
    }

    if let Ok(mut effect) = app.reveal_fx.lock() {
        if let Some(effect) = effect.as_mut() {
            let buffer = f.buffer_mut();
            buffer.render_effect(effect, area, app.last_tick);
        }
    }
}

fn render_grid(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = app.grid_columns.max(1);
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let first_row = first_visible_row(app.selected_card_index, columns, visible_rows);
    let last_row = row_count(app.deck.len(), columns).min(first_row + visible_rows);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);

    let ratio = u32::try_from(columns).unwrap_or(1);
    for (slot, row) in (first_row..last_row).enumerate() {
        let cell_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, ratio); columns])
            .split(row_areas[slot]);

        for (column, cell) in cell_areas.iter().enumerate() {
            let index = row * columns + column;
            if let Some(card) = app.deck.card(index) {
                render_card(f, *cell, card, index == app.selected_card_index);
            }
        }
    }
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = Vec::new();
    if app.deck.is_busy() {
        let throbber = Throbber::default().throbber_style(Style::default().fg(Color::Yellow));
        spans.push(throbber.to_symbol_span(&app.throbber_state));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(app.status_message.as_str(), style));

    f.render_widget(Paragraph::new(TextLine::from(spans)).block(block), area);
}

fn shortcuts_line() -> Paragraph<'static> {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::Gray);

    Paragraph::new(TextLine::from(vec![
        Span::styled("w", key),
        Span::styled(": Where am I  ", text),
        Span::styled("/", key),
        Span::styled(": Search  ", text),
        Span::styled("Enter", key),
        Span::styled(": Open card  ", text),
        Span::styled("←↑↓→", key),
        Span::styled(": Move  ", text),
        Span::styled("F1", key),
        Span::styled(": Help  ", text),
        Span::styled("q", key),
        Span::styled(": Quit", text),
    ]))
    .alignment(Alignment::Center)
}
