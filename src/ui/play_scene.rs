//! Rendering of the play field, status bar and info panel.

use crate::config::{ControlMode, Settings};
use crate::core::constants::{FIELD_HEIGHT, FIELD_WIDTH, GROUND_TILE_WIDTH};
use crate::game::{Rect as FieldRect, RenderFrame, Scene};
use crate::input::InputSource;
use crate::ui::game_common::{
    create_game_layout, info_line, render_crash_banner, render_info_panel_frame,
    render_status_bar,
};
use crate::ui::slider_widget::VerticalSlider;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What occupies one terminal cell of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Bird,
    Pipe,
    Ground,
    GroundStripe,
}

/// Field rectangle covered by terminal cell (`col`, `row`) of a
/// `cols` x `rows` viewport.
fn cell_rect(col: u16, row: u16, cols: u16, rows: u16) -> FieldRect {
    let w = FIELD_WIDTH / cols.max(1) as f64;
    let h = FIELD_HEIGHT / rows.max(1) as f64;
    FieldRect::new(col as f64 * w, row as f64 * h, w, h)
}

/// Classify a cell. The bird draws over pipes, pipes over ground.
pub fn classify_cell(view: &RenderFrame, col: u16, row: u16, cols: u16, rows: u16) -> Cell {
    let cell = cell_rect(col, row, cols, rows);
    if cell.intersects(&view.bird) {
        return Cell::Bird;
    }
    if view
        .pipes
        .iter()
        .any(|(top, bottom)| cell.intersects(top) || cell.intersects(bottom))
    {
        return Cell::Pipe;
    }
    let center_x = cell.x + cell.width / 2.0;
    let center_y = cell.y + cell.height / 2.0;
    if view.ground.contains_point(center_x, center_y) {
        // Stripes scroll with the ground offset; purely cosmetic.
        let stripe_band = center_y < view.ground.top() + 18.0;
        let phase = (center_x + view.ground_scroll).rem_euclid(GROUND_TILE_WIDTH);
        if stripe_band && phase < GROUND_TILE_WIDTH / 2.0 {
            return Cell::GroundStripe;
        }
        return Cell::Ground;
    }
    Cell::Empty
}

fn cell_span(cell: Cell, bird_vy: f64) -> Span<'static> {
    match cell {
        Cell::Empty => Span::raw(" "),
        Cell::Bird => {
            let glyph = if bird_vy < -50.0 {
                "▲"
            } else if bird_vy > 300.0 {
                "▼"
            } else {
                "►"
            };
            Span::styled(
                glyph,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        }
        Cell::Pipe => Span::styled("█", Style::default().fg(Color::Green)),
        Cell::Ground => Span::styled("▓", Style::default().fg(Color::Rgb(140, 110, 80))),
        Cell::GroundStripe => Span::styled("▒", Style::default().fg(Color::Rgb(120, 95, 70))),
    }
}

/// Render the playing/dead scene.
pub fn render_play(
    frame: &mut Frame,
    area: Rect,
    view: &RenderFrame,
    settings: &Settings,
    input: Option<&InputSource>,
    slider: &mut VerticalSlider,
) {
    let layout = create_game_layout(frame, area, " Flappy Rehab ", Color::Cyan, 26);

    slider.render(frame, layout.slider);
    render_field(frame, layout.content, view);
    if view.scene == Scene::Dead {
        render_crash_banner(frame, layout.content, view.score);
    }
    render_status(frame, layout.status_bar, view);
    render_info_panel(frame, layout.info_panel, view, settings, input);
}

fn render_field(frame: &mut Frame, area: Rect, view: &RenderFrame) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let lines: Vec<Line> = (0..area.height)
        .map(|row| {
            let spans: Vec<Span> = (0..area.width)
                .map(|col| {
                    cell_span(
                        classify_cell(view, col, row, area.width, area.height),
                        view.bird_vy,
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status(frame: &mut Frame, area: Rect, view: &RenderFrame) {
    if view.scene == Scene::Dead {
        render_status_bar(
            frame,
            area,
            &format!("Crashed! Score: {}", view.score),
            Color::Red,
            &[("[R]", "Restart"), ("[Esc]", "Menu")],
        );
    } else {
        render_status_bar(
            frame,
            area,
            &format!("Score: {}", view.score),
            Color::Green,
            &[
                ("[Drag/↑↓]", "Slider"),
                ("[Space]", "Flap"),
                ("[Esc]", "Menu"),
                ("[S]", "Reload"),
            ],
        );
    }
}

fn render_info_panel(
    frame: &mut Frame,
    area: Rect,
    view: &RenderFrame,
    settings: &Settings,
    input: Option<&InputSource>,
) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let input_label = match input {
        Some(InputSource::Rehab(sensor)) if !sensor.is_connected() => "rehab (offline)".to_string(),
        Some(source) => source.mode().name().to_string(),
        None => settings.input_mode.name().to_string(),
    };
    let effective_control = match (settings.control_mode, input) {
        (ControlMode::Position, Some(source)) if !source.capabilities().supports_value => "flap*",
        (mode, _) => mode.name(),
    };

    let lines = vec![
        Line::from(Span::styled(
            " FLAPPY REHAB ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        info_line("Score", view.score.to_string(), Color::White),
        Line::from(""),
        info_line("Control", effective_control.to_string(), Color::Yellow),
        info_line("Input", input_label, Color::Yellow),
        info_line("Invert", settings.invert_input.to_string(), Color::Yellow),
        Line::from(""),
        info_line("Tier", settings.difficulty.name().to_string(), Color::Green),
        info_line("Gap", format!("{:.0} px", settings.pipe_gap), Color::Green),
        info_line("Speed", format!("{:.0} px/s", settings.pipe_speed), Color::Green),
        info_line("Spawn", format!("{:.2} s", settings.pipe_spawn_every), Color::Green),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> RenderFrame {
        RenderFrame {
            scene: Scene::Playing,
            bird: FieldRect::new(100.0, 260.0, 28.0, 22.0),
            bird_vy: 0.0,
            pipes: vec![(
                FieldRect::new(300.0, 0.0, 60.0, 200.0),
                FieldRect::new(300.0, 360.0, 60.0, 170.0),
            )],
            ground: FieldRect::new(0.0, 530.0, 400.0, 70.0),
            ground_scroll: 0.0,
            score: 0,
        }
    }

    #[test]
    fn test_classify_on_unit_grid() {
        // 40 x 60 cells: one cell = 10 x 10 field pixels.
        let v = view();
        assert_eq!(classify_cell(&v, 11, 27, 40, 60), Cell::Bird);
        assert_eq!(classify_cell(&v, 32, 5, 40, 60), Cell::Pipe);
        assert_eq!(classify_cell(&v, 32, 40, 40, 60), Cell::Pipe);
        assert_eq!(classify_cell(&v, 32, 30, 40, 60), Cell::Empty);
        assert_eq!(classify_cell(&v, 5, 58, 40, 60), Cell::Ground);
        assert_eq!(classify_cell(&v, 0, 53, 40, 60), Cell::GroundStripe);
    }

    #[test]
    fn test_bird_visible_on_coarse_grid() {
        let v = view();
        let hits = (0..10u16)
            .flat_map(|r| (0..5u16).map(move |c| (c, r)))
            .filter(|&(c, r)| classify_cell(&v, c, r, 5, 10) == Cell::Bird)
            .count();
        assert!(hits >= 1);
    }
}
