use ratatui::{prelude::*, widgets::*};

use crate::backdrop::{BackdropFill, Composite};
use crate::messages::render::ServiceHealth;
use crate::models::{ApplicationPhase, BackdropOption, Rgb};

/// Terminal color for a backdrop color
pub fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Fill `width` x `height` cells with the backdrop, two columns per tile,
/// with `label` centered on top of it.
pub fn backdrop_swatch(composite: &Composite, width: u16, height: u16, label: &str) -> Vec<Line<'static>> {
    let fill = composite.fill;
    let fg = rgb_color(fill.contrast());
    let label_row = height / 2;
    let label: Vec<char> = label.chars().take(width as usize).collect();
    let label_start = (width as usize).saturating_sub(label.len()) / 2;

    (0..height)
        .map(|row| {
            let spans: Vec<Span> = (0..width)
                .map(|col| {
                    let bg = rgb_color(fill.color_at(col / 2, row));
                    let idx = (col as usize).wrapping_sub(label_start);
                    let ch = if row == label_row && idx < label.len() {
                        label[idx]
                    } else {
                        ' '
                    };
                    Span::styled(ch.to_string(), Style::default().fg(fg).bg(bg))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Backdrop picker bar: presets 1-5, Custom on 6
pub fn render_backdrop_picker(active: BackdropOption, custom: Rgb) -> Line<'static> {
    let mut spans = Vec::new();
    let options = BackdropOption::PRESETS
        .into_iter()
        .chain(std::iter::once(BackdropOption::Custom(custom)));

    for (i, option) in options.enumerate() {
        let selected = match (option, active) {
            (BackdropOption::Custom(_), BackdropOption::Custom(_)) => true,
            (a, b) => a == b,
        };
        let swatch = match fill_for_swatch(option) {
            Some(color) => Span::styled("  ", Style::default().bg(color)),
            None => Span::styled("░░", Style::default().fg(Color::Gray)),
        };
        let label_style = if selected {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {}:", i + 1), label_style));
        spans.push(swatch);
        spans.push(Span::styled(format!(" {} ", option.label()), label_style));
    }
    Line::from(spans)
}

fn fill_for_swatch(option: BackdropOption) -> Option<Color> {
    match crate::backdrop::fill_for(option) {
        BackdropFill::Solid(rgb) => Some(rgb_color(rgb)),
        BackdropFill::Checkerboard { .. } => None,
    }
}

/// Header indicator for the backend
pub fn health_span(health: &ServiceHealth) -> Span<'static> {
    match health {
        ServiceHealth::Unknown => Span::styled(" [..] checking ", Style::default().fg(Color::DarkGray)),
        ServiceHealth::Online(status) => {
            let mut text = String::from(" [+] online");
            if let Some(device) = &status.device {
                text.push_str(&format!(" ({})", device));
            }
            if status.model_loaded == Some(false) {
                text.push_str(", model not loaded");
            }
            text.push(' ');
            Span::styled(text, Style::default().fg(Color::Green))
        }
        ServiceHealth::Offline => Span::styled(" [-] offline ", Style::default().fg(Color::Red)),
    }
}

/// Key hints for the status bar
pub fn status_hint(phase: ApplicationPhase, editing_color: bool) -> &'static str {
    match phase {
        ApplicationPhase::Idle => " type a path or drop a file | Enter:remove background | F1:help | Esc:quit ",
        ApplicationPhase::Processing => " Removing background... | q:quit ",
        ApplicationPhase::ResultReady if editing_color => " #rrggbb | Enter/Esc:done ",
        ApplicationPhase::ResultReady => " 1-6:backdrop | c:custom color | d:download | n:new image | ?:help | q:quit ",
        ApplicationPhase::Error => " r:try again | ?:help | q:quit ",
    }
}

/// Human readable byte count
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Bordered block, highlighted when focused
pub fn panel<'a>(title: &'a str, focused: bool) -> Block<'a> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default().borders(Borders::ALL).border_style(style).title(title)
}
