// TUI module for rendering the terminal interface
pub mod colors;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::{calculate_progress, format_file_size};
pub use input::{handle_confirm_input, handle_key_event, handle_mouse_event, KeyAction};

use crate::app::Session;
use crate::domain::{Entry, DispositionTally, FileKind, SortCriterion};
use crate::preview::PreviewContent;
use crate::preview_manager::{PreviewManager, PreviewState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

/// UI view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Main file browsing view
    Browsing,
    /// Help overlay visible
    Help,
    /// Summary screen at end
    Summary,
    /// Confirmation dialog for trash action
    ConfirmTrash,
    /// Welcome screen shown on first launch
    Welcome,
}

fn criterion_label(criterion: SortCriterion) -> &'static str {
    match criterion {
        SortCriterion::Name => "name",
        SortCriterion::OldestFirst => "oldest first",
        SortCriterion::LargestFirst => "largest first",
    }
}

fn kind_label(entry: &Entry) -> &'static str {
    if entry.is_dir {
        return "directory";
    }
    match entry.kind {
        FileKind::Image => "image",
        FileKind::Video => "video",
        FileKind::Pdf => "pdf",
        FileKind::Text => "text",
        FileKind::None => "other",
    }
}

/// Renders the main screen: header, current entry with preview, footer.
pub fn render(frame: &mut Frame, session: &Session, preview_manager: &mut PreviewManager) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with progress
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], session);
    render_content(frame, chunks[1], session, preview_manager);
    render_footer(frame, chunks[2], session);
}

fn render_header(frame: &mut Frame, area: Rect, session: &Session) {
    let block = Block::default()
        .title(format!(" cull · {} ", session.directory().display()))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let decided = session.tally().decided();
    let total = session.total();
    let label = format!(
        "{}/{} reviewed · sort: {}",
        decided,
        total,
        criterion_label(session.criterion())
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT_HIGHLIGHT).bg(BG_DARK))
        .ratio(calculate_progress(decided, total))
        .label(label);
    frame.render_widget(gauge, inner);
}

fn render_content(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    preview_manager: &mut PreviewManager,
) {
    let Some(entry) = session.current() else {
        let done = Paragraph::new("Nothing left to review.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_SECONDARY));
        frame.render_widget(done, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let info_lines = vec![
        Line::from(vec![
            Span::styled(
                entry.name.clone(),
                Style::default()
                    .fg(TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  [{}]", kind_label(entry)),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "{}  ·  modified {}",
                format_file_size(entry.size),
                entry.modified.format("%Y-%m-%d %H:%M")
            ),
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let info = Paragraph::new(info_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(TEXT_SECONDARY)),
    );
    frame.render_widget(info, chunks[0]);

    let preview_block = Block::default()
        .title(" preview ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(TEXT_SECONDARY));
    let preview_area = preview_block.inner(chunks[1]);
    frame.render_widget(preview_block, chunks[1]);

    match preview_manager.preview_for(entry) {
        PreviewState::Ready(PreviewContent::Text(lines)) => {
            let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(TEXT_PRIMARY))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, preview_area);
        }
        PreviewState::Ready(PreviewContent::Styled(lines)) => {
            let paragraph = Paragraph::new(lines);
            frame.render_widget(paragraph, preview_area);
        }
        PreviewState::Error(message) => {
            let paragraph = Paragraph::new(message)
                .style(Style::default().fg(ACCENT_PRIMARY))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, preview_area);
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, session: &Session) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(TEXT_SECONDARY));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if let Some(error) = session.last_error() {
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(ACCENT_PRIMARY),
        ))
    } else {
        Line::from(vec![
            Span::styled("←/t ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("trash   "),
            Span::styled("→/k ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("keep   "),
            Span::styled("s ", Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::raw("sort   "),
            Span::styled("o ", Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::raw("open   "),
            Span::styled("? ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("help   "),
            Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("quit   (or swipe with the mouse)"),
        ])
    };

    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Renders the summary screen at the end
pub fn render_summary(frame: &mut Frame, tally: &DispositionTally, total: usize) {
    let area = frame.area();
    let summary_area = centered_rect(60, 50, area);

    frame.render_widget(Clear, summary_area);

    let block = Block::default()
        .title(" Session Complete ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(summary_area);
    frame.render_widget(block, summary_area);

    let remaining = total.saturating_sub(tally.decided());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Summary",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("   Total entries:  "),
            Span::styled(
                format!("{}", total),
                Style::default()
                    .fg(ACCENT_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("   ✓ ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Kept:      "),
            Span::styled(
                format!("{}", tally.kept),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ✗ ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("Trashed:   "),
            Span::styled(
                format!("{}", tally.discarded),
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ○ ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Undecided: "),
            Span::styled(
                format!("{}", remaining),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to exit",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let help_area = centered_rect(50, 70, area);

    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard & Mouse",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  → ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("or "),
            Span::styled("k", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("      Keep file"),
        ]),
        Line::from(vec![
            Span::styled("  ← ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("or "),
            Span::styled("t", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("      Move file to trash"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  drag → ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("   Swipe right to keep"),
        ]),
        Line::from(vec![
            Span::styled("  drag ← ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("   Swipe left to trash"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  s ", Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::raw("         Cycle sort order"),
        ]),
        Line::from(vec![
            Span::styled("  o ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("         Open with default app"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("or "),
            Span::styled("Esc", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("     Quit"),
        ]),
        Line::from(vec![
            Span::styled("  ?", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("           Toggle help"),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the confirmation dialog before a trash action
pub fn render_confirm_trash_overlay(frame: &mut Frame, entry: &Entry) {
    let area = frame.area();
    let confirm_area = centered_rect(60, 30, area);

    frame.render_widget(Clear, confirm_area);

    let block = Block::default()
        .title(" Move to Trash? ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_PRIMARY))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(confirm_area);
    frame.render_widget(block, confirm_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            entry.name.clone(),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_file_size(entry.size),
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from("The file goes to the system trash and can be restored."),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("/"),
            Span::styled("Enter", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw(" confirm    "),
            Span::styled("n", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("/"),
            Span::styled("Esc", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw(" cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the welcome dialog overlay
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(70, 60, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Welcome to cull ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Review your files one at a time.",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Swipe right (or press k) to keep a file."),
        Line::from("Swipe left (or press t) to move it to the trash."),
        Line::from(""),
        Line::from("Nothing is ever permanently deleted: trashed files"),
        Line::from("can be restored from the system trash."),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Centers a `percent_x` by `percent_y` rect inside `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
