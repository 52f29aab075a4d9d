use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

const BINDINGS: &[(&str, &str)] = &[
    ("j / k", "Move selection"),
    ("J / K", "Shift product one slot"),
    ("< / >", "Shift product to previous / next page"),
    ("Ctrl-f / Ctrl-b", "Page down / up"),
    ("w", "Save product order"),
    ("Enter / l", "Open product"),
    ("h / l", "Previous / next image"),
    ("[ / ]", "Previous / next featured"),
    ("d", "Delete product"),
    ("r", "Reload catalog"),
    ("Esc", "Back"),
    ("q", "Quit"),
];

/// Modal overlays: help and delete confirmation
pub struct PopupWidget;

impl PopupWidget {
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let width = 52u16.min(area.width.saturating_sub(4));
        let height = (BINDINGS.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(width, height, area);

        frame.render_widget(Clear, popup_area);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(keys, action)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>16}  ", keys),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*action, Style::default().fg(theme.foreground)),
                ])
            })
            .collect();

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.surface));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }

    pub fn render_delete_confirm(frame: &mut Frame, theme: &Theme, product_name: &str) {
        let area = frame.area();
        let width = 50u16.min(area.width.saturating_sub(4));
        let height = 5u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(width, height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Confirm Delete ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .style(Style::default().bg(theme.surface));

        let lines = vec![
            Line::from(Span::styled(
                format!("Delete \"{}\"?", truncate_str(product_name, 30)),
                Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("[", Style::default().fg(theme.muted)),
                Span::styled("y", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
                Span::styled("]es  [", Style::default().fg(theme.muted)),
                Span::styled("n", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
                Span::styled("]o", Style::default().fg(theme.muted)),
            ]),
        ];

        frame.render_widget(
            Paragraph::new(lines).block(block).alignment(Alignment::Center),
            popup_area,
        );
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Kinesio Tape", 30), "Kinesio Tape");
        assert_eq!(truncate_str("Compression Recovery Boots", 10), "Compres...");
    }

    #[test]
    fn test_centered_rect() {
        assert_eq!(centered_rect(10, 4, Rect::new(0, 0, 30, 10)), Rect::new(10, 3, 10, 4));
    }
}
