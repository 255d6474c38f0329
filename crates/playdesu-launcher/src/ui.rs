//! Screen rendering

use crate::app::{App, CatalogState, View};
use crate::status::{battery_icon, clock_text};
use playdesu_catalog::Game;
use playdesu_emulator::GameMenuAction;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

const TITLE_COLOR: Color = Color::Rgb(0xE3, 0xE3, 0xE3);
const BODY_COLOR: Color = Color::Rgb(0xA1, 0xA3, 0xA2);
const FOCUS_BG: Color = Color::Rgb(0xB8, 0xB8, 0xB8);
const FOCUS_FG: Color = Color::Rgb(0x2B, 0x2B, 0x2B);

fn accent(game: &Game) -> Color {
    let (r, g, b) = game.accent_color();
    Color::Rgb(r, g, b)
}

/// Draw the whole UI
pub fn draw_ui(frame: &mut Frame, app: &mut App) {
    if app.view == View::Playing {
        draw_playing(frame, app);
        return;
    }

    let chunks = if app.system_ui.status_bar_visible() {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(0),    // Main content
                Constraint::Length(3), // Footer
            ])
            .split(frame.size())
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(frame.size())
    };

    let (main_area, footer_area) = if app.system_ui.status_bar_visible() {
        draw_status_bar(frame, chunks[0], app);
        (chunks[1], chunks[2])
    } else {
        (chunks[0], chunks[1])
    };

    match &app.catalog {
        CatalogState::Loading => draw_centered_notice(frame, main_area, "Loading..."),
        CatalogState::NoData => draw_centered_notice(frame, main_area, "No games"),
        CatalogState::Error(e) => {
            draw_centered_notice(frame, main_area, &format!("No games\n{}", e))
        }
        CatalogState::Ready(_) => match app.view {
            View::Home => draw_home(frame, main_area, app),
            View::GameDetails(index) => draw_details(frame, main_area, app, index),
            View::Playing => {}
        },
    }

    draw_footer(frame, footer_area, app);
}

/// Top status bar: app title, clock, battery
fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let battery = match app.battery_percent {
        Some(p) => format!("{} {}%", battery_icon(p), p),
        None => String::new(),
    };

    let line = Line::from(vec![
        Span::styled(
            "PLAYDESU",
            Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(clock_text(), Style::default().fg(BODY_COLOR)),
        Span::raw("  "),
        Span::styled(battery, Style::default().fg(BODY_COLOR)),
    ]);

    let bar = Paragraph::new(line)
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(bar, area);
}

/// Home: spotlight header plus two card rows
fn draw_home(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Spotlight
            Constraint::Length(4), // Featured row
            Constraint::Length(4), // All games row
        ])
        .split(area);

    if let Some(game) = app.spotlight_game() {
        draw_spotlight(frame, chunks[0], game);
    }

    draw_game_row(frame, chunks[1], app, 0, "Featured");
    draw_game_row(frame, chunks[2], app, 1, "All Games");
}

/// Immersive header for the focused game
fn draw_spotlight(frame: &mut Frame, area: Rect, game: &Game) {
    let lines = vec![
        Line::from(Span::styled(
            game.display_name.clone(),
            Style::default().fg(accent(game)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            game.meta_line(),
            Style::default().fg(BODY_COLOR),
        )),
        Line::from(""),
        Line::from(Span::styled(
            game.description.clone(),
            Style::default().fg(BODY_COLOR),
        )),
    ];

    let spotlight = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(spotlight, area);
}

/// One horizontal row of game cards
fn draw_game_row(frame: &mut Frame, area: Rect, app: &App, row: usize, title: &str) {
    let focused = app.home_row == row;

    let titles: Vec<Line> = app
        .games()
        .iter()
        .map(|game| Line::from(game.display_name.clone()))
        .collect();

    let border_style = if focused {
        Style::default().fg(TITLE_COLOR)
    } else {
        Style::default().fg(BODY_COLOR)
    };

    let highlight = if focused {
        Style::default().bg(FOCUS_BG).fg(FOCUS_FG).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TITLE_COLOR)
    };

    let tabs = Tabs::new(titles)
        .select(app.home_selected[row])
        .highlight_style(highlight)
        .style(Style::default().fg(BODY_COLOR))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );

    frame.render_widget(tabs, area);
}

/// Game details with Play action and screenshots
fn draw_details(frame: &mut Frame, area: Rect, app: &App, index: usize) {
    let Some(game) = app.games().get(index) else {
        draw_centered_notice(frame, area, "No game selected");
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(6)])
        .split(area);

    let play_style = if app.launching {
        Style::default().fg(BODY_COLOR)
    } else {
        Style::default().bg(accent(game)).fg(TITLE_COLOR).add_modifier(Modifier::BOLD)
    };

    let play_label = if app.launching {
        format!(" {} ", app.status)
    } else {
        " 🎮 Play now ".to_string()
    };

    let lines = vec![
        Line::from(Span::styled(
            game.display_name.clone(),
            Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            game.meta_line(),
            Style::default().fg(BODY_COLOR),
        )),
        Line::from(""),
        Line::from(Span::styled(
            game.description.clone(),
            Style::default().fg(BODY_COLOR),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} MB  •  {} downloads  •  rating {}/5",
                game.size, game.downloads, game.rating
            ),
            Style::default().fg(BODY_COLOR),
        )),
        Line::from(""),
        Line::from(Span::styled(play_label, play_style)),
    ];

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(details, chunks[0]);

    draw_screenshots(frame, chunks[1], app, game);
}

fn draw_screenshots(frame: &mut Frame, area: Rect, app: &App, game: &Game) {
    if game.screenshots.is_empty() {
        return;
    }

    let items: Vec<ListItem> = game
        .screenshots
        .iter()
        .enumerate()
        .map(|(i, url)| ListItem::new(format!("{}. {}", i + 1, url)))
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.shot_selected.min(game.screenshots.len() - 1)));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Screenshots"))
        .highlight_style(Style::default().fg(FOCUS_FG).bg(FOCUS_BG))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state);
}

/// Game session screen: the video lives in the external frontend, so this
/// stays nearly black, like the scrim behind the original emulator view.
fn draw_playing(frame: &mut Frame, app: &mut App) {
    let area = frame.size();

    let text = if app.session.is_some() {
        Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(
                app.playing_title.clone(),
                Style::default().fg(BODY_COLOR),
            )),
            Line::from(Span::styled(
                "Start+Select opens the game menu",
                Style::default().fg(BODY_COLOR),
            )),
        ])
    } else {
        Text::from("Loading...")
    };

    let screen = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(screen, area);

    if let Some(selected) = app.menu_selected {
        draw_game_menu(frame, area, selected);
    }
}

/// Centered in-game menu popup
fn draw_game_menu(frame: &mut Frame, area: Rect, selected: usize) {
    let popup = centered_rect(30, 9, area);

    let items: Vec<ListItem> = GameMenuAction::ALL
        .iter()
        .map(|action| ListItem::new(action.label()))
        .collect();

    let mut state = ListState::default();
    state.select(Some(selected));

    let menu = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Game menu"))
        .highlight_style(
            Style::default().fg(FOCUS_FG).bg(FOCUS_BG).add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(menu, popup, &mut state);
}

/// Centered loading / empty / error notice
fn draw_centered_notice(frame: &mut Frame, area: Rect, text: &str) {
    let notice = Paragraph::new(text)
        .style(Style::default().fg(BODY_COLOR))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));

    let popup = centered_rect(40, 5, area);
    frame.render_widget(notice, popup);
}

/// Bottom help + status line
fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.view {
        View::Home => "[←→] Browse  [↑↓] Row  [Enter] Details  [Q] Quit",
        View::GameDetails(_) => "[Enter] Play  [←→] Screenshots  [Esc] Back",
        View::Playing => "",
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    let status = Paragraph::new(app.status.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, chunks[0]);
    frame.render_widget(status, chunks[1]);
}

/// Fixed-size rectangle centered in an area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = centered_rect(30, 9, area);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 9);
        assert!(popup.x + popup.width <= area.width);
        assert!(popup.y + popup.height <= area.height);
    }

    #[test]
    fn test_centered_rect_clamps_to_small_areas() {
        let area = Rect::new(0, 0, 20, 4);
        let popup = centered_rect(40, 9, area);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
    }
}
