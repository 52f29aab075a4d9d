use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::carousel::{fit, put_clipped};
use crate::app::{App, Focus};

/// Open product: text on top, the image gallery underneath
pub struct ProductDetailWidget;

impl ProductDetailWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let Some(detail) = app.detail.as_ref() else {
            return;
        };
        let product = &detail.product;

        let border_style = if app.focus == Focus::ProductDetail {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.muted)
        };
        let block = Block::default()
            .title(format!(" {} ", product.name))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(inner);

        let mut lines = vec![
            Line::from(Span::styled(
                product.price.as_str(),
                Style::default().fg(theme.price).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        for description in product.descriptions() {
            lines.push(Line::from(Span::styled(
                description,
                Style::default().fg(theme.foreground),
            )));
            lines.push(Line::default());
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);

        let gallery_area = chunks[1];
        if gallery_area.height == 0 {
            return;
        }

        let Some(image) = detail.gallery.current() else {
            let empty = Paragraph::new(Span::styled(
                app.config.catalog.fallback_image.as_str(),
                Style::default().fg(theme.muted),
            ));
            frame.render_widget(empty, gallery_area);
            return;
        };

        let indicator = format!(
            "Image {}/{}",
            detail.gallery.index() + 1,
            detail.gallery.len()
        );
        frame.render_widget(
            Paragraph::new(Span::styled(indicator, Style::default().fg(theme.muted))),
            Rect { height: 1, ..gallery_area },
        );

        if gallery_area.height > 1 {
            let row = Rect {
                y: gallery_area.y + 1,
                height: 1,
                ..gallery_area
            };
            let shift = detail.slide.current().round() as i32;
            let text = fit(image, row.width as usize);
            put_clipped(
                frame.buffer_mut(),
                row,
                shift,
                row.y,
                &text,
                Style::default().fg(theme.accent),
            );
        }
    }
}
