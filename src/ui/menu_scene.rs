//! Main menu.

use crate::ui::game_common::render_menu_list;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    Start,
    OpenSettings,
    Quit,
}

const ITEMS: [(&str, MenuAction); 3] = [
    ("Start", MenuAction::Start),
    ("Settings", MenuAction::OpenSettings),
    ("Quit", MenuAction::Quit),
];

#[derive(Debug, Default)]
pub struct MenuScreen {
    pub selected: usize,
}

impl MenuScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MenuAction {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + ITEMS.len() - 1) % ITEMS.len();
                MenuAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % ITEMS.len();
                MenuAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => ITEMS[self.selected].1,
            KeyCode::Char('s') => MenuAction::OpenSettings,
            KeyCode::Esc | KeyCode::Char('q') => MenuAction::Quit,
            _ => MenuAction::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<String> = ITEMS.iter().map(|(label, _)| label.to_string()).collect();
        let footer = [Line::from(Span::styled(
            "Start the game or open Settings for presets.",
            Style::default().fg(Color::DarkGray),
        ))];
        render_menu_list(
            frame,
            area,
            " FLAPPY REHAB - Menu ",
            &items,
            self.selected,
            &footer,
        );
    }
}
