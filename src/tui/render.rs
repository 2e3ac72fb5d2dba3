use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::controller::CLEAR_PROMPT;
use crate::model::task::Filter;
use crate::util::unicode;

use super::app::{App, Mode};

/// Main render function — tab bar, task list, counter, status row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // filter tab bar + separator
            Constraint::Min(1),    // task list
            Constraint::Length(1), // counter
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_tab_bar(frame, app, chunks[0]);
    render_task_list(frame, app, chunks[1]);
    render_counter(frame, app, chunks[2]);
    render_status_row(frame, app, chunks[3]);

    if app.show_help {
        render_help_overlay(frame, app, area);
    }
}

fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let active = app.controller.filter();

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    for (i, filter) in [Filter::All, Filter::Pending, Filter::Completed]
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(app.theme.dim).bg(bg)));
        }
        let style = if filter == active {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(format!("{} {}", i + 1, filter.label()), style));
    }

    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(
            "─".repeat(area.width as usize),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let visible = app.controller.visible();

    if visible.is_empty() {
        let placeholder = Paragraph::new(" Nenhuma tarefa encontrada")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(placeholder, area);
        return;
    }

    // Keep the cursor row on screen
    let height = area.height as usize;
    if height > 0 {
        if app.cursor < app.scroll_offset {
            app.scroll_offset = app.cursor;
        } else if app.cursor >= app.scroll_offset + height {
            app.scroll_offset = app.cursor + 1 - height;
        }
    }

    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    for (i, task) in visible.iter().enumerate().skip(app.scroll_offset) {
        if lines.len() >= height {
            break;
        }
        let is_cursor = i == app.cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };

        let checkbox = if task.done { " [x] " } else { " [ ] " };
        let checkbox_style = if task.done {
            Style::default().fg(app.theme.green).bg(row_bg)
        } else {
            Style::default().fg(app.theme.dim).bg(row_bg)
        };

        let text_style = if task.done {
            Style::default()
                .fg(app.theme.dim)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if is_cursor {
            Style::default().fg(app.theme.text_bright).bg(row_bg)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };

        let text_budget = width.saturating_sub(checkbox.len());
        let text = unicode::truncate_to_width(&task.text, text_budget);

        let mut spans = vec![
            Span::styled(checkbox, checkbox_style),
            Span::styled(text, text_style),
        ];

        // Pad cursor line to full width
        if is_cursor {
            let content_width: usize =
                spans.iter().map(|s| unicode::display_width(&s.content)).sum();
            if content_width < width {
                spans.push(Span::styled(
                    " ".repeat(width - content_width),
                    Style::default().bg(row_bg),
                ));
            }
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn render_counter(frame: &mut Frame, app: &App, area: Rect) {
    let counter = Paragraph::new(format!(" {}", app.controller.counter_text()))
        .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(counter, area);
}

fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Navigate => {
            if let Some(ref message) = app.status_message {
                Line::from(Span::styled(
                    format!(" {}", message),
                    Style::default().fg(app.theme.red).bg(bg),
                ))
            } else if app.show_key_hints {
                Line::from(Span::styled(
                    " a add  space toggle  d delete  f filter  c clear  ? help  q quit",
                    Style::default().fg(app.theme.dim).bg(bg),
                ))
            } else {
                Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
            }
        }
        Mode::Insert => {
            let mut spans = vec![
                Span::styled(
                    format!(" > {}", app.input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            let hint = "Enter add  Esc cancel";
            let content_width: usize =
                spans.iter().map(|s| unicode::display_width(&s.content)).sum();
            let hint_width = hint.len();
            if content_width + hint_width < width {
                let padding = width - content_width - hint_width;
                spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
                spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
            }
            Line::from(spans)
        }
        Mode::Confirm => Line::from(Span::styled(
            format!(" {} (y/n)", CLEAR_PROMPT),
            Style::default().fg(app.theme.yellow).bg(bg),
        )),
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let entries: [(&str, &str); 10] = [
        ("a / i", "add a task"),
        ("space / enter", "toggle completion"),
        ("d / x", "delete task"),
        ("1 / 2 / 3", "filter: all / pending / completed"),
        ("f / tab", "cycle filter"),
        ("c", "clear completed tasks"),
        ("j / k", "move cursor"),
        ("g / G", "jump to top / bottom"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];

    let box_width: u16 = 46;
    let box_height = entries.len() as u16 + 2;
    let popup = centered_rect(box_width, box_height, area);

    let lines: Vec<Line> = entries
        .iter()
        .map(|(keys, desc)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<14}", keys),
                    Style::default().fg(app.theme.highlight).bg(app.theme.background),
                ),
                Span::styled(
                    desc.to_string(),
                    Style::default().fg(app.theme.text).bg(app.theme.background),
                ),
            ])
        })
        .collect();

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" keys ")
        .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
