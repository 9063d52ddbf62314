//! Settings and advanced-tuning screens.
//!
//! Both edit a draft copy. "Apply & Back" hands the draft to the caller,
//! which saves it and hot-reloads the session; "Back" discards it.

use crate::config::{Difficulty, Preset, Settings, Tunable};
use crate::ui::game_common::render_menu_list;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    None,
    OpenAdvanced,
    CloseAdvanced,
    Apply(Settings),
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    ControlMode,
    InputMode,
    InvertInput,
    Preset,
    Advanced,
    ApplyBack,
    Back,
}

const ITEMS: [Item; 7] = [
    Item::ControlMode,
    Item::InputMode,
    Item::InvertInput,
    Item::Preset,
    Item::Advanced,
    Item::ApplyBack,
    Item::Back,
];

fn preset_for(difficulty: Difficulty) -> Preset {
    match difficulty {
        Difficulty::Easy => Preset::OldLady,
        Difficulty::Normal => Preset::StrokeMan,
        Difficulty::Hard => Preset::YoungGirlHard,
    }
}

#[derive(Debug)]
pub struct SettingsScreen {
    selected: usize,
    advanced_selected: usize,
    draft: Settings,
    preset: Preset,
    /// One-line feedback, e.g. a failed save.
    pub status: Option<String>,
}

impl SettingsScreen {
    pub fn new(current: &Settings) -> Self {
        Self {
            selected: 0,
            advanced_selected: 0,
            draft: current.clone(),
            preset: preset_for(current.difficulty),
            status: None,
        }
    }

    /// Start editing from `current`, dropping any previous draft.
    pub fn open(&mut self, current: &Settings) {
        *self = Self::new(current);
    }

    pub fn draft(&self) -> &Settings {
        &self.draft
    }

    fn activate(&mut self, item: Item, forward: bool) -> SettingsAction {
        match item {
            Item::ControlMode => {
                self.draft.control_mode = self.draft.control_mode.toggled();
            }
            Item::InputMode => {
                self.draft.input_mode = if forward {
                    self.draft.input_mode.next()
                } else {
                    self.draft.input_mode.next().next()
                };
            }
            Item::InvertInput => self.draft.invert_input = !self.draft.invert_input,
            Item::Preset => {
                self.preset = if forward {
                    self.preset.next()
                } else {
                    self.preset.next().next()
                };
                self.preset.apply(&mut self.draft);
            }
            Item::Advanced => return SettingsAction::OpenAdvanced,
            Item::ApplyBack => return SettingsAction::Apply(self.draft.sanitized()),
            Item::Back => return SettingsAction::Back,
        }
        SettingsAction::None
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SettingsAction {
        let item = ITEMS[self.selected];
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + ITEMS.len() - 1) % ITEMS.len();
                SettingsAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % ITEMS.len();
                SettingsAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => self.activate(item, true),
            KeyCode::Left => match item {
                Item::ControlMode | Item::InputMode | Item::InvertInput | Item::Preset => {
                    self.activate(item, false)
                }
                _ => SettingsAction::None,
            },
            KeyCode::Esc => SettingsAction::Back,
            _ => SettingsAction::None,
        }
    }

    pub fn handle_advanced_key(&mut self, key: KeyEvent) -> SettingsAction {
        let count = Tunable::ALL.len();
        let tunable = Tunable::ALL[self.advanced_selected];
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.advanced_selected = (self.advanced_selected + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.advanced_selected = (self.advanced_selected + 1) % count;
            }
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => tunable.nudge(&mut self.draft, 1),
            KeyCode::Left | KeyCode::Char('-') => tunable.nudge(&mut self.draft, -1),
            KeyCode::PageUp => tunable.nudge(&mut self.draft, 10),
            KeyCode::PageDown => tunable.nudge(&mut self.draft, -10),
            KeyCode::Esc | KeyCode::Enter => return SettingsAction::CloseAdvanced,
            _ => {}
        }
        SettingsAction::None
    }

    fn item_label(&self, item: Item) -> String {
        match item {
            Item::ControlMode => format!("control_mode: {}", self.draft.control_mode.name()),
            Item::InputMode => format!("input_mode: {}", self.draft.input_mode.name()),
            Item::InvertInput => format!("invert_input: {}", self.draft.invert_input),
            Item::Preset => format!("Preset: {}", self.preset.label()),
            Item::Advanced => "Advanced tuning...".to_string(),
            Item::ApplyBack => "Apply & Back".to_string(),
            Item::Back => "Back".to_string(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<String> = ITEMS.iter().map(|i| self.item_label(*i)).collect();
        let dim = Style::default().fg(Color::DarkGray);
        let mut footer = vec![
            Line::from(Span::styled(
                format!("Pipe Gap: {:.0} px", self.draft.pipe_gap),
                Style::default().fg(Color::Green),
            )),
            Line::from(Span::styled(
                format!("Pipe Speed: {:.0} px/s", self.draft.pipe_speed),
                Style::default().fg(Color::Green),
            )),
            Line::from(Span::styled(
                format!("Spawn Every: {:.2} s", self.draft.pipe_spawn_every),
                Style::default().fg(Color::Green),
            )),
            Line::from(""),
            Line::from(Span::styled("[↑↓] select  [←→/Enter] change  [Esc] back", dim)),
        ];
        if let Some(status) = &self.status {
            footer.push(Line::from(Span::styled(
                status.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        render_menu_list(frame, area, " Settings ", &items, self.selected, &footer);
    }

    pub fn render_advanced(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<String> = Tunable::ALL
            .iter()
            .map(|t| {
                let r = t.range();
                format!(
                    "{}: {} [{}..{}]",
                    t.name(),
                    format_value(t.get(&self.draft), r.step),
                    format_value(r.min, r.step),
                    format_value(r.max, r.step),
                )
            })
            .collect();
        let footer = [Line::from(Span::styled(
            "[←→] adjust  [PgUp/PgDn] x10  [Enter/Esc] done",
            Style::default().fg(Color::DarkGray),
        ))];
        render_menu_list(
            frame,
            area,
            " Advanced Tuning ",
            &items,
            self.advanced_selected,
            &footer,
        );
    }
}

/// Format with as many decimals as the step needs.
fn format_value(value: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{:.0}", value)
    } else if step >= 0.1 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}
