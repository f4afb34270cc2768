//! Drawing the timer window with ratatui.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};
use ratatui::Frame;

use super::app::TimerView;
use crate::types::{TimerMode, TimerStatus};

const ACCENT: Color = Color::Cyan;

fn mode_color(mode: TimerMode) -> Color {
    match mode {
        TimerMode::Work => Color::Red,
        TimerMode::Break => Color::Green,
    }
}

fn status_color(status: TimerStatus) -> Color {
    match status {
        TimerStatus::Running => Color::White,
        TimerStatus::Paused => Color::Yellow,
        TimerStatus::Stopped | TimerStatus::Idle => Color::Gray,
        TimerStatus::Completed => Color::Green,
    }
}

/// Draws the whole window.
pub fn draw(frame: &mut Frame, view: &TimerView) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Pomodoro ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    let area = frame.area();
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // Mode
            Constraint::Length(1),
            Constraint::Length(1), // Time
            Constraint::Length(1),
            Constraint::Length(1), // Status
            Constraint::Length(1),
            Constraint::Length(3), // Progress
            Constraint::Length(1),
            Constraint::Length(1), // Banner
            Constraint::Min(0),
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    let color = mode_color(view.mode());

    let mode = Paragraph::new(view.mode().label().to_uppercase())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(mode, sections[1]);

    let time = Paragraph::new(view.display.formatted_time.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(time, sections[3]);

    let status = Paragraph::new(view.display.status_text.as_str())
        .style(Style::default().fg(status_color(view.display.status)))
        .alignment(Alignment::Center);
    frame.render_widget(status, sections[5]);

    let progress = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(view.display.progress().clamp(0.0, 1.0));
    frame.render_widget(progress, centered_row(sections[7], 60));

    if let Some(banner) = &view.banner {
        let banner = Paragraph::new(banner.as_str())
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(banner, sections[9]);
    }

    frame.render_widget(controls(view), sections[11]);
}

fn controls(view: &TimerView) -> Paragraph<'static> {
    let key = |k: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(k, style)
    };

    let line = Line::from(vec![
        key("P", view.can_pause()),
        Span::raw(format!(" {}  ", view.pause_label())),
        key("S", view.can_pause()),
        Span::raw(" Stop  "),
        key("R", true),
        Span::raw(" Reset  "),
        key("Enter", view.can_start()),
        Span::raw(" Start  "),
        key("Q", true),
        Span::raw(" Quit"),
    ]);

    Paragraph::new(line)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
}

/// Horizontally centred slice of `area`, `percent` wide.
fn centered_row(area: Rect, percent: u16) -> Rect {
    let side = (100 - percent) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(side),
            Constraint::Percentage(percent),
            Constraint::Percentage(side),
        ])
        .split(area)[1]
}

// ============================================================================
// Tests
// ============================================================================
