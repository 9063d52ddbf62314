//! Shared layout and widgets for the game screens.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Slider track column on the far left.
    pub slider: Rect,
    /// Play field.
    pub content: Rect,
    /// Status bar area (2 lines) under the field.
    pub status_bar: Rect,
    /// Info panel area on the right, with its own border.
    pub info_panel: Rect,
}

/// Bordered play layout: slider column, field and status on the left, info
/// panel on the right.
/// ```text
/// +-- title ---------------------+-- info ----+
/// |[#] field                     |            |
/// |[#]                           |  readings  |
/// | status line / key hints      |            |
/// +------------------------------+------------+
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(2)])
        .split(h_chunks[0]);

    let field_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(3), Constraint::Min(10)])
        .split(v_chunks[0]);

    GameLayout {
        slider: field_chunks[0],
        content: field_chunks[1],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Two-line status bar: message, then `[key] action` hints.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let controls_line = Paragraph::new(controls_line(controls)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

fn controls_line<'a>(controls: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Info panel frame with a DarkGray border. Returns the inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A `label: value` info line.
pub fn info_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Crash banner drawn over the bottom of the field, leaving the wreck visible.
pub fn render_crash_banner(frame: &mut Frame, area: Rect, score: u32) {
    let banner_height: u16 = 4;
    let banner_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(banner_height),
        width: area.width,
        height: banner_height.min(area.height),
    };
    frame.render_widget(Clear, banner_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(banner_area);
    frame.render_widget(block, banner_area);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "CRASHED!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled(
                format!("{} pipes passed", score),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(Span::styled(
            "[R] restart  [Esc] menu",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Centered bordered list with one highlighted row, used by the menu and
/// settings screens.
pub fn render_menu_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[String],
    selected: usize,
    footer: &[Line<'_>],
) {
    frame.render_widget(Clear, area);

    let width = items
        .iter()
        .map(|i| i.chars().count() as u16 + 6)
        .max()
        .unwrap_or(20)
        .max(title.chars().count() as u16 + 4)
        .max(30)
        .min(area.width);
    let height = (items.len() + footer.len() + 4) as u16;
    let modal = centered_rect(area, width, height.min(area.height));

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let mut lines = vec![Line::from("")];
    for (i, item) in items.iter().enumerate() {
        let line = if i == selected {
            Line::from(Span::styled(
                format!("> {item} <"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(item.clone(), Style::default().fg(Color::White)))
        };
        lines.push(line);
    }
    lines.push(Line::from(""));
    lines.extend(footer.iter().cloned());

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered_rect(area, 20, 10);
        assert_eq!(r, Rect::new(30, 7, 20, 10));
        let clipped = centered_rect(Rect::new(5, 5, 10, 4), 40, 40);
        assert_eq!(clipped, Rect::new(5, 5, 10, 4));
    }

    #[test]
    fn test_controls_line_spacing() {
        let line = controls_line(&[("[R]", "Restart"), ("[Esc]", "Menu")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[R] Restart  [Esc] Menu");
    }
}
