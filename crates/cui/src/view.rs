use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(10),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(root[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Min(5)])
        .split(middle[1]);

    draw_hand(frame, middle[0], app);
    draw_table(frame, right[0], app);
    draw_standings(frame, right[1], app);
    draw_events(frame, root[2], app);

    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!("Rouilleux | playing as {} | seed {}", app.human_name, app.seed);
    let lines = vec![
        Line::from(title.bold()),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Table");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_hand(frame: &mut Frame, area: Rect, app: &App) {
    let hand = app.your_hand();
    let items: Vec<ListItem<'_>> = if hand.is_empty() {
        vec![ListItem::new("empty")]
    } else {
        hand.iter()
            .enumerate()
            .map(|(idx, card)| ListItem::new(format!("{idx:>2}. {card}")))
            .collect()
    };
    let title = format!("Your hand ({})", hand.len());
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_table(frame: &mut Frame, area: Rect, app: &App) {
    // Opponents' hands stay face down; only the counts show.
    let lines: Vec<Line<'_>> = app
        .players
        .iter()
        .map(|p| {
            let line = if p.name == app.human_name {
                format!("{} (you): {} cards", p.name, p.hand.len())
            } else if p.hand.is_empty() {
                format!("{}: out", p.name)
            } else {
                format!("{}: {} cards", p.name, p.hand.len())
            };
            if app.loser.as_deref() == Some(p.name.as_str()) {
                Line::from(line).style(Style::default().fg(Color::Red))
            } else {
                Line::from(line)
            }
        })
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Players");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_standings(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line<'_>> = if app.standings.is_empty() {
        vec![Line::from("no recorded games yet")]
    } else {
        app.standings
            .iter()
            .map(|entry| Line::from(format!("{}: {} losses", entry.name, entry.losses)))
            .collect()
    };
    let block = Block::default().borders(Borders::ALL).title("All-time losses");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Events");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("q quit | ? toggle this help"),
        Line::from("p purge pairs from your hand"),
        Line::from("r sort by rank | s sort by suit | c sort by color"),
        Line::from("e / Enter end your turn (draws from the next player)"),
        Line::from(""),
        Line::from("Actions queue up and run when your turn comes."),
        Line::from("Whoever is left holding the Jack of Spades loses."),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
