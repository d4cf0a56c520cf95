//! Terminal rendering of view trees and application chrome.
//!
//! Renderers produce retained [`ViewNode`] trees; this module flattens
//! them into styled lines and draws the surrounding chrome (header bar,
//! status bar, help overlay).

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::renderers::tree::{NodeKind, ViewNode};

use super::theme::Theme;

/// Render the header bar with the document summary.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" SCHEMAFORM ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::raw(app.source_description()),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", app.handles().len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" controls"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the form body: every renderer's subtree, stacked vertically.
pub fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(body_lines(app)).block(block), area);
}

/// Flatten all rendered subtrees into display lines.
pub fn body_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut buttons_seen = 0usize;
    let focused = app.focused_action_index();

    for handle in app.handles() {
        handle.with_root(|root| {
            collect_node(root, &app.theme, 1, &mut buttons_seen, focused, &mut lines);
        });
        lines.push(Line::from(""));
    }
    lines
}

fn collect_node(
    node: &ViewNode,
    theme: &Theme,
    indent: usize,
    buttons_seen: &mut usize,
    focused: Option<usize>,
    lines: &mut Vec<Line<'static>>,
) {
    let pad = "  ".repeat(indent);
    match node.kind {
        NodeKind::Control | NodeKind::Group | NodeKind::Caption => {
            for child in &node.children {
                collect_node(child, theme, indent, buttons_seen, focused, lines);
            }
        }
        NodeKind::Label => {
            if let Some(text) = &node.text {
                lines.push(Line::from(Span::styled(format!("{pad}{text}"), theme.caption)));
            }
        }
        NodeKind::Button => {
            let style = if focused == Some(*buttons_seen) {
                theme.button_focused
            } else {
                theme.button
            };
            let text = node.text.clone().unwrap_or_default();
            lines.push(Line::from(vec![
                Span::raw(pad),
                Span::styled(format!("[ {text} ]"), style),
            ]));
            *buttons_seen += 1;
        }
        NodeKind::Content => {
            let mut item = 0usize;
            for child in &node.children {
                if child.kind == NodeKind::Form {
                    item += 1;
                    lines.push(Line::from(Span::styled(
                        format!("{pad}• item {item}"),
                        Style::default().add_modifier(Modifier::DIM),
                    )));
                    collect_node(child, theme, indent + 1, buttons_seen, focused, lines);
                } else {
                    collect_node(child, theme, indent, buttons_seen, focused, lines);
                }
            }
        }
        NodeKind::Form => {
            if let Some(text) = &node.text {
                lines.push(Line::from(Span::styled(
                    format!("{pad}{text}"),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for child in &node.children {
                    collect_node(child, theme, indent + 1, buttons_seen, focused, lines);
                }
            } else {
                for child in &node.children {
                    collect_node(child, theme, indent, buttons_seen, focused, lines);
                }
            }
        }
        NodeKind::Field => {
            if let Some(text) = &node.text {
                lines.push(Line::from(Span::styled(format!("{pad}{text}"), theme.field)));
            }
        }
    }
}

/// Render the status bar at the bottom.
///
/// Shows available controls, or a temporary status message when one is
/// active.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = " Tab/↓:next ↑:prev Enter:activate w:write ?:help q:quit".to_string();
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the form.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  Tab/↓ j     Focus next button"),
        Line::from("  S-Tab/↑ k   Focus previous button"),
        Line::from("  Enter/Space Activate focused button"),
        Line::from("  w           Write document to disk"),
        Line::from("  q Esc       Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 36u16.min(area.width.saturating_sub(4));
    let help_height = 11u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
