use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match &app.mode {
            Mode::Normal if app.order_dirty => "REORDER",
            Mode::Normal => "NORMAL",
            Mode::DeleteConfirm(_) => "DELETE?",
            Mode::Help => "HELP",
        };

        let focus_str = match app.focus {
            Focus::Dashboard => "Products",
            Focus::ProductDetail => "Detail",
        };

        let (page, pages) = app.page_position();
        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | {} | Products: {} | Page {}/{}",
                mode_str,
                focus_str,
                app.products.len(),
                page,
                pages
            )
        };

        let help_hint = match app.focus {
            Focus::Dashboard => " q:quit j/k:move J/K:shift </>:page w:save ?:help ",
            Focus::ProductDetail => " esc:back h/l:image [/]:featured ?:help ",
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let text_style = if app.status_message.is_some() {
            Style::default().fg(theme.accent).bg(theme.surface)
        } else {
            Style::default().fg(theme.foreground).bg(theme.surface)
        };

        let line = Line::from(vec![
            Span::styled(status_text, text_style),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.surface)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.surface)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
