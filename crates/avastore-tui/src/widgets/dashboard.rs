use avastore_core::catalog::{ordering, Product};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, Focus};
use crate::theme::Theme;

/// Product list, split into dashboard pages
pub struct DashboardWidget;

impl DashboardWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.focus == Focus::Dashboard;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.muted)
        };

        let dirty_marker = if app.order_dirty { " [unsaved order]" } else { "" };
        let block = Block::default()
            .title(format!(" Products{} ", dirty_marker))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.background));

        if app.products.is_empty() {
            let items = vec![ListItem::new(Span::styled(
                "No products yet. Add one with `avastore add`.",
                Style::default().fg(theme.muted),
            ))];
            frame.render_widget(List::new(items).block(block), area);
            return;
        }

        let page_size = app.page_size();
        let mut items = Vec::with_capacity(app.products.len() + app.products.len() / page_size + 1);
        let mut index = 0;
        for (page, products) in ordering::group_by_page(&app.products, page_size) {
            items.push(ListItem::new(Line::from(Span::styled(
                format!("── Page {} ──", page),
                Style::default().fg(theme.muted).add_modifier(Modifier::BOLD),
            ))));
            for product in products {
                let selected = index == app.selected && is_focused;
                items.push(ListItem::new(product_line(product, index, selected, theme)));
                index += 1;
            }
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.selection));

        let mut state = ListState::default();
        state.select(Some(list_row(app.selected, page_size)));

        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Row of the `selected` product once page headers are interleaved
fn list_row(selected: usize, page_size: usize) -> usize {
    selected + ordering::page_of(selected, page_size)
}

fn product_line<'a>(product: &'a Product, index: usize, selected: bool, theme: &Theme) -> Line<'a> {
    let name_style = if selected {
        Style::default()
            .fg(theme.foreground)
            .bg(theme.selection)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.foreground)
    };

    let image_count = match product.images.len() {
        0 => String::new(),
        1 => "  1 image".to_string(),
        n => format!("  {} images", n),
    };

    Line::from(vec![
        Span::styled(format!("{:>3}. ", index + 1), Style::default().fg(theme.muted)),
        Span::styled(product.name.as_str(), name_style),
        Span::raw("  "),
        Span::styled(product.price.as_str(), Style::default().fg(theme.price)),
        Span::styled(image_count, Style::default().fg(theme.muted)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_row_skips_headers() {
        assert_eq!(list_row(0, 12), 1);
        assert_eq!(list_row(11, 12), 12);
        assert_eq!(list_row(12, 12), 14);
        assert_eq!(list_row(25, 12), 28);
    }
}
