use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Rotating banner of featured products
pub struct HeroWidget;

impl HeroWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .title(" AVA Physio Store ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(product) = app.featured.get(app.hero.index()) else {
            let empty = Paragraph::new("Recovery, rehab and performance gear")
                .style(Style::default().fg(theme.muted))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        };

        let dots = dots(app.hero.index(), app.hero.len());
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(dots.chars().count() as u16 + 1),
            ])
            .split(inner);

        let mut spans = vec![
            Span::styled(
                product.name.clone(),
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(product.price.clone(), Style::default().fg(theme.price)),
        ];
        if !product.short_description.is_empty() {
            spans.push(Span::styled(
                format!("  {}", product.short_description),
                Style::default().fg(theme.muted),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

        let held = app.hero.is_held(std::time::Instant::now());
        let dot_style = if held {
            Style::default().fg(theme.foreground)
        } else {
            Style::default().fg(theme.accent)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(dots, dot_style)).alignment(Alignment::Right),
            chunks[1],
        );
    }
}

/// Position indicator, filled at `index`
fn dots(index: usize, len: usize) -> String {
    (0..len)
        .map(|i| if i == index { "●" } else { "○" })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dots() {
        assert_eq!(dots(1, 3), "○●○");
        assert_eq!(dots(0, 0), "");
    }
}
