// TUI module for rendering the terminal interface
pub mod colors;
pub mod flow;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use flow::{after_command, on_key, Transition};
pub use helpers::{format_file_size, format_modified};
pub use input::{handle_key_event, KeyAction};

use crate::controller::{DisplayController, DisplayState};
use crate::domain::SessionStatistics;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// UI view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Image viewing
    Browsing,
    /// Help overlay visible
    Help,
    /// Session summary; any key exits
    Finished,
    /// Welcome screen shown on first launch
    Welcome,
}

/// Renders the viewer: header, image, status line and footer
pub fn render(frame: &mut Frame, controller: &mut DisplayController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Image
            Constraint::Length(1), // Status line
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], controller);
    render_image(frame, chunks[1], controller);
    render_status(frame, chunks[2], controller);
    render_footer(frame, chunks[3]);
}

/// Renders the summary shown when the session ends
pub fn render_summary(frame: &mut Frame, stats: &SessionStatistics, exhausted: bool, dry_run: bool) {
    let area = frame.area();
    let summary_area = centered_rect(60, 60, area);

    frame.render_widget(Clear, summary_area);

    let title = if exhausted {
        " No More Images "
    } else {
        " Session Complete "
    };

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(summary_area);
    frame.render_widget(block, summary_area);

    let moved_label = if dry_run { "Would move: " } else { "Moved:      " };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Summary",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("   Shown:      "),
            Span::styled(
                format!("{}", stats.shown),
                Style::default()
                    .fg(ACCENT_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("   ✓ ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Kept:       "),
            Span::styled(
                format!("{}", stats.kept()),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ✗ ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw(moved_label),
            Span::styled(
                format!("{}", stats.moved),
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    if stats.skipped_unreadable > 0 {
        lines.push(Line::from(vec![
            Span::styled("   ○ ", Style::default().fg(ACCENT_WARNING)),
            Span::raw("Unreadable: "),
            Span::styled(
                format!("{}", stats.skipped_unreadable),
                Style::default().fg(ACCENT_WARNING),
            ),
        ]));
    }

    if stats.failed_moves > 0 {
        lines.push(Line::from(vec![
            Span::styled("   ! ", Style::default().fg(ACCENT_WARNING)),
            Span::raw("Failed:     "),
            Span::styled(
                format!("{}", stats.failed_moves),
                Style::default().fg(ACCENT_WARNING),
            ),
        ]));
    }

    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to exit",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ]);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let key = |k: &'static str, color: Color| {
        Span::styled(
            format!("  {:<10}", k),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            key("Space", ACCENT_SECONDARY),
            Span::raw("Keep this image and show the next one"),
        ]),
        Line::from(vec![
            key("x", ACCENT_PRIMARY),
            Span::raw("Move this image into deleted/ and show the next one"),
        ]),
        Line::from(vec![
            key("?", ACCENT_HIGHLIGHT),
            Span::raw("Toggle this help"),
        ]),
        Line::from(vec![
            key("q / Esc", TEXT_SECONDARY),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Moved images stay on disk in a deleted/ folder next to them.",
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(Span::styled(
            "  Press ? to close this help.",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
                .style(Style::default().bg(BG_DARK)),
        )
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
}

/// Renders the welcome overlay shown on first launch
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to jpgcull",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Every JPEG under the chosen folder is shown once, one at a time."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Space ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("keeps the image,  "),
            Span::styled("x ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("moves it into a deleted/ folder beside it."),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Nothing is ever removed; deleted/ folders are skipped on later runs.",
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let welcome = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Welcome ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
                .style(Style::default().bg(BG_DARK)),
        )
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: false });

    frame.render_widget(welcome, area);
}

/// Helper to create a centered rect
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

/// Places a `width` x `height` box in the middle of `area`
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_header(frame: &mut Frame, area: Rect, controller: &DisplayController) {
    let mut title = vec![Span::styled(
        match controller.state() {
            DisplayState::Showing(current) => format!(" Image {} ", current.info.position),
            _ => " jpgcull ".to_string(),
        },
        Style::default()
            .fg(ACCENT_HIGHLIGHT)
            .add_modifier(Modifier::BOLD),
    )];

    if controller.is_dry_run() {
        title.push(Span::styled(
            "[DRY RUN] ",
            Style::default()
                .fg(ACCENT_WARNING)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let info = match controller.state() {
        DisplayState::Showing(current) => {
            let info = &current.info;
            let relative = info
                .path
                .strip_prefix(controller.root())
                .unwrap_or(&info.path);
            Line::from(vec![
                Span::styled(
                    relative.display().to_string(),
                    Style::default()
                        .fg(TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!(
                        "({}×{} • {} • {})",
                        info.dimensions.0,
                        info.dimensions.1,
                        format_file_size(info.size),
                        format_modified(&info.modified_date)
                    ),
                    Style::default().fg(TEXT_SECONDARY),
                ),
            ])
        }
        DisplayState::Idle => Line::from(Span::styled(
            format!("Ready to cull {}", controller.root().display()),
            Style::default().fg(TEXT_SECONDARY),
        )),
        DisplayState::Exhausted => Line::from(Span::styled(
            "No more images",
            Style::default().fg(TEXT_SECONDARY),
        )),
    };

    let header = Paragraph::new(vec![Line::from(title), info])
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(header, area);
}

fn render_image(frame: &mut Frame, area: Rect, controller: &mut DisplayController) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match controller.current_mut() {
        Some(current) => {
            let lines = current.view.lines_for(inner.width, inner.height).to_vec();
            let width = lines.first().map(|l| l.spans.len()).unwrap_or(0) as u16;
            let height = lines.len() as u16;
            frame.render_widget(Paragraph::new(lines), centered_box(width, height, inner));
        }
        None => {
            let message = if controller.is_exhausted() {
                "No more images"
            } else {
                "Press Space to show the first image"
            };
            let prompt = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    message,
                    Style::default()
                        .fg(ACCENT_HIGHLIGHT)
                        .add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(prompt, centered_box(inner.width, 2, inner));
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, controller: &DisplayController) {
    let line = match controller.notices().last() {
        Some(notice) => {
            let color = if notice.is_problem() {
                ACCENT_PRIMARY
            } else {
                TEXT_SECONDARY
            };
            let mut text = format!(" {}", notice);
            let extra = controller.notices().len() - 1;
            if extra > 0 {
                text.push_str(&format!(" (+{} more)", extra));
            }
            Line::from(Span::styled(text, Style::default().fg(color)))
        }
        None => Line::from(""),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let controls = Line::from(vec![
        Span::styled(
            " Space ",
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Next", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled(
            "x ",
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Delete", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("? ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Help", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Quit", Style::default().fg(TEXT_SECONDARY)),
    ]);

    let footer = Paragraph::new(controls)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}
