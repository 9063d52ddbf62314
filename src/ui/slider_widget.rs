//! Vertical slider drawn beside the field, driven by mouse drag or arrow keys.

use crate::core::constants::SLIDER_KEY_STEP;
use crate::input::SliderHandle;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Value in [0,1]: 0 at the bottom of the track, 1 at the top.
pub struct VerticalSlider {
    handle: SliderHandle,
    /// Track area from the last draw; mouse events are mapped against it.
    track: Option<Rect>,
    dragging: bool,
}

impl VerticalSlider {
    pub fn new(handle: SliderHandle) -> Self {
        Self {
            handle,
            track: None,
            dragging: false,
        }
    }

    pub fn handle(&self) -> &SliderHandle {
        &self.handle
    }

    pub fn value(&self) -> f64 {
        self.handle.get()
    }

    /// Move by `steps` keyboard increments (positive = up).
    pub fn nudge(&mut self, steps: i32) {
        self.handle
            .set(self.handle.get() + SLIDER_KEY_STEP * steps as f64);
    }

    /// Returns true if the event was consumed by the slider.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        let Some(track) = self.track else {
            return false;
        };
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let near = event.column + 1 >= track.x && event.column <= track.right();
                let within = event.row >= track.y && event.row < track.bottom();
                if near && within {
                    self.dragging = true;
                    self.handle.set(row_to_value(track, event.row));
                    return true;
                }
                false
            }
            MouseEventKind::Drag(MouseButton::Left) if self.dragging => {
                self.handle.set(row_to_value(track, event.row));
                true
            }
            MouseEventKind::Up(MouseButton::Left) => std::mem::take(&mut self.dragging),
            _ => false,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.track = Some(area);
        if area.height == 0 || area.width == 0 {
            return;
        }
        let knob = value_to_row(area, self.value());
        let lines: Vec<Line> = (area.y..area.bottom())
            .map(|row| {
                if row == knob {
                    Line::from(Span::styled("▐█▌", Style::default().fg(Color::Yellow)))
                } else {
                    Line::from(Span::styled(" │ ", Style::default().fg(Color::Gray)))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Map a screen row to a slider value, clamping rows outside the track.
pub fn row_to_value(track: Rect, row: u16) -> f64 {
    if track.height <= 1 {
        return 0.0;
    }
    let top = track.y;
    let bottom = track.bottom() - 1;
    let row = row.clamp(top, bottom);
    (bottom - row) as f64 / (bottom - top) as f64
}

/// Row where the knob for `value` is drawn.
pub fn value_to_row(track: Rect, value: f64) -> u16 {
    if track.height == 0 {
        return track.y;
    }
    let span = (track.height - 1) as f64;
    let bottom = track.bottom() - 1;
    bottom - (value.clamp(0.0, 1.0) * span).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_row_value_mapping() {
        let track = Rect::new(0, 10, 3, 11);
        assert!((row_to_value(track, 20) - 0.0).abs() < f64::EPSILON);
        assert!((row_to_value(track, 10) - 1.0).abs() < f64::EPSILON);
        assert!((row_to_value(track, 15) - 0.5).abs() < f64::EPSILON);
        assert!((row_to_value(track, 0) - 1.0).abs() < f64::EPSILON);
        assert_eq!(value_to_row(track, 0.5), 15);
        assert_eq!(value_to_row(track, 1.0), 10);
        assert_eq!(value_to_row(track, 0.0), 20);
    }

    #[test]
    fn test_drag_updates_value() {
        let mut slider = VerticalSlider::new(SliderHandle::new(0.5));
        slider.track = Some(Rect::new(0, 0, 3, 11));

        assert!(slider.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 1, 0)));
        assert!((slider.value() - 1.0).abs() < f64::EPSILON);
        assert!(slider.handle_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 30, 10)));
        assert!(slider.value().abs() < f64::EPSILON);
        assert!(slider.handle_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 30, 10)));
        assert!(!slider.handle_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 1, 5)));
    }

    #[test]
    fn test_click_outside_track_ignored() {
        let mut slider = VerticalSlider::new(SliderHandle::new(0.5));
        slider.track = Some(Rect::new(0, 0, 3, 11));
        assert!(!slider.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 20, 5)));
        assert!((slider.value() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nudge_clamps() {
        let mut slider = VerticalSlider::new(SliderHandle::new(0.95));
        slider.nudge(3);
        assert!((slider.value() - 1.0).abs() < f64::EPSILON);
        slider.nudge(-100);
        assert!(slider.value().abs() < f64::EPSILON);
    }
}
