//! Cutout - Actor-based background removal client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async uploads and file I/O

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use cutout_tui::config::{Cli, Config};
use cutout_tui::constants::APP_NAME;
use cutout_tui::messages::ui_events::key_to_ui_event;
use cutout_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use cutout_tui::models::ApplicationPhase;
use cutout_tui::ui::{
    backdrop_swatch, format_bytes, health_span, panel, render_backdrop_picker, rgb_color, status_hint,
};
use cutout_tui::{AppActor, NetworkActor, RemovalClient};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_cli(Cli::parse()).context("invalid configuration")?;

    // Initialize logging to file
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_name = config
        .log_file
        .file_name()
        .context("log file path has no file name")?;
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(api_url = %config.api_url, output_dir = %config.output_dir.display(), "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(RemovalClient::new(config.api_url.clone()), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(&config, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            let ui_event = match event::read()? {
                Event::Key(key) => key_to_ui_event(
                    key,
                    current_state.phase,
                    current_state.editing_color,
                    current_state.show_help,
                ),
                // Dragging a file onto the terminal pastes its path
                Event::Paste(text) => Some(UiEvent::DropFile(text)),
                _ => None,
            };
            if let Some(event) = ui_event {
                if matches!(event, UiEvent::Quit) {
                    let _ = ui_tx.send(event);
                    break;
                }
                let _ = ui_tx.send(event);
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);

    match state.phase {
        ApplicationPhase::Idle => draw_upload(f, state, main_chunks[1]),
        ApplicationPhase::Processing => draw_processing(f, state, main_chunks[1]),
        ApplicationPhase::ResultReady => draw_result(f, state, main_chunks[1]),
        ApplicationPhase::Error => draw_error(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let header = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::styled(format!(" {} ", state.api_url), Style::default().fg(Color::Gray)),
        health_span(&state.health),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn draw_upload(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Drop zone
            Constraint::Length(3), // Path input
        ])
        .split(area);

    let prompt = vec![
        Line::from(""),
        Line::from(Span::styled("Drop an image here", Style::default().bold())),
        Line::from(Span::styled(
            "or type its path below and press Enter",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "PNG, JPG, WEBP and other image types up to 10MB",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let drop_zone = Paragraph::new(prompt)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Upload "),
        );
    f.render_widget(drop_zone, chunks[0]);

    let input_area = chunks[1];
    let input = Paragraph::new(state.path_input.as_str())
        .block(panel(" Image path ", true).border_style(Style::default().fg(Color::Yellow)));
    f.render_widget(input, input_area);

    let max_x = input_area.x + input_area.width.saturating_sub(2);
    let cursor_x = (input_area.x + state.path_input.chars().count() as u16 + 1).min(max_x);
    f.set_cursor_position(Position::new(cursor_x, input_area.y + 1));
}

fn split_before_after(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

fn draw_before(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = Vec::new();
    match &state.source {
        Some(source) => {
            lines.push(Line::from(Span::styled(source.name.clone(), Style::default().bold())));
            lines.push(Line::from(format!("{} | {}", source.mime, format_bytes(source.size))));
        }
        None => lines.push(Line::from("")),
    }
    match &state.preview {
        Some(preview) => {
            let dims = preview
                .dimensions
                .map(|(w, h)| format!("{} x {} px", w, h))
                .unwrap_or_else(|| String::from("dimensions unknown"));
            lines.push(Line::from(Span::styled(dims, Style::default().fg(Color::Cyan))));
        }
        None => lines.push(Line::from(Span::styled("loading preview...", Style::default().fg(Color::DarkGray)))),
    }

    let before = Paragraph::new(lines)
        .block(panel(" Original ", false))
        .wrap(Wrap { trim: false });
    f.render_widget(before, area);
}

fn draw_processing(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = split_before_after(area);
    draw_before(f, state, chunks[0]);

    let waiting = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Removing background...", Style::default().fg(Color::Yellow).bold())),
        Line::from(Span::styled("this can take a few seconds", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(panel(" Background removed ", false));
    f.render_widget(waiting, chunks[1]);
}

fn draw_result(f: &mut Frame, state: &RenderState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Before / after
            Constraint::Length(3), // Backdrop picker
            Constraint::Length(3), // Custom color + download
        ])
        .split(area);

    let chunks = split_before_after(rows[0]);
    draw_before(f, state, chunks[0]);

    let after_block = panel(" Background removed ", true).title_bottom(
        Line::from(if state.time_ms > 0 {
            format!(" {}ms ", state.time_ms)
        } else {
            String::new()
        })
        .right_aligned(),
    );
    let inner = after_block.inner(chunks[1]);
    f.render_widget(after_block, chunks[1]);

    if let Some(composite) = &state.composite {
        let label = match composite.cutout_dimensions {
            Some((w, h)) => format!("cutout {} x {} | {}", w, h, format_bytes(composite.cutout_bytes as u64)),
            None => format!("cutout | {}", format_bytes(composite.cutout_bytes as u64)),
        };
        let swatch = backdrop_swatch(composite, inner.width, inner.height, &label);
        f.render_widget(Paragraph::new(swatch), inner);
    }

    let picker = Paragraph::new(render_backdrop_picker(state.active_backdrop, state.custom_color))
        .block(panel(" Background ", false));
    f.render_widget(picker, rows[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(rows[2]);

    let color_style = if state.editing_color {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let color_line = Line::from(vec![
        Span::styled("  ", Style::default().bg(rgb_color(state.custom_color))),
        Span::raw(" "),
        Span::styled(state.color_input.clone(), color_style),
    ]);
    let color = Paragraph::new(color_line).block(panel(" Custom (c) ", state.editing_color));
    f.render_widget(color, bottom[0]);
    if state.editing_color {
        let x = bottom[0].x + 4 + state.color_input.chars().count() as u16;
        f.set_cursor_position(Position::new(x.min(bottom[0].right().saturating_sub(2)), bottom[0].y + 1));
    }

    let download_text = match &state.download_name {
        Some(name) => format!("d: download {}", name),
        None => String::new(),
    };
    let download = Paragraph::new(Span::styled(download_text, Style::default().fg(Color::Green)))
        .block(panel(" Download ", false));
    f.render_widget(download, bottom[1]);
}

fn draw_error(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup = centered_rect(70, 40, area);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(state.error_message.clone(), Style::default().fg(Color::Red).bold())),
        Line::from(""),
        Line::from(Span::styled("Press r to try again", Style::default().fg(Color::Gray))),
    ];
    let error = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
    f.render_widget(error, popup);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = match &state.notice {
        Some(notice) => Line::from(vec![
            Span::styled(format!(" {} ", notice), Style::default().fg(Color::Green)),
            Span::styled("|", Style::default().fg(Color::DarkGray)),
            Span::styled(status_hint(state.phase, state.editing_color), Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(
            status_hint(state.phase, state.editing_color),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 CUTOUT - Keyboard Shortcuts

 UPLOAD
   type / paste       Image path
   drag & drop        Drop a file onto the terminal
   Enter              Remove background

 RESULT
   1 - 5              Transparent, White, Black, Blue, Green
   6                  Custom color
   c                  Edit custom color (#rrggbb)
   d / Enter          Download as removed_bg_<name>.png
   n                  New image

 ERROR
   r / Enter          Try again

 GENERAL
   F1 / ?             Toggle this help
   q / Esc / Ctrl+C   Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
