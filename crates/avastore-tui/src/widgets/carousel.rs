use avastore_core::carousel::{Axis, CarouselItem};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;
use crate::viewport::CarouselHost;

pub const PLACEHOLDER_TEXT: &str = "No items to display";

/// Renders a carousel track at its current offset
///
/// Horizontal tracks stack each slot's lines from the top of the strip;
/// vertical tracks give every slot `item_extent` rows.
pub struct CarouselWidget;

impl CarouselWidget {
    pub fn render<T, F>(
        frame: &mut Frame,
        host: &CarouselHost<T>,
        theme: &Theme,
        title: &str,
        lines: F,
    ) where
        T: CarouselItem,
        F: Fn(&T, &Theme) -> Vec<(String, Style)>,
    {
        let area = host.area();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .style(Style::default().bg(theme.background));
        frame.render_widget(block, outer(area, frame.area()));

        let carousel = host.carousel();
        if carousel.is_placeholder() {
            let y = area.y + area.height / 2;
            let placeholder = Paragraph::new(Line::from(PLACEHOLDER_TEXT))
                .style(Style::default().fg(theme.muted))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, Rect { y, height: 1, ..area });
            return;
        }

        let axis = carousel.axis();
        let viewport_extent = match axis {
            Axis::X => area.width as f64,
            Axis::Y => area.height as f64,
        };

        let buf = frame.buffer_mut();
        for placed in carousel.visible_window(viewport_extent) {
            let start = placed.start.round() as i32;
            let extent = placed.extent.round().max(1.0) as i32;
            let slot_lines = lines(placed.slot.item, theme);

            match axis {
                Axis::X => {
                    for (row, (text, style)) in slot_lines.iter().enumerate() {
                        let y = area.y + row as u16;
                        if row as u16 >= area.height {
                            break;
                        }
                        let text = fit(text, extent as usize);
                        let pad = (extent - text_width(&text) as i32).max(0) / 2;
                        put_clipped(buf, area, start + pad, y, &text, *style);
                    }
                }
                Axis::Y => {
                    for (row, (text, style)) in slot_lines.iter().take(extent as usize).enumerate() {
                        let y = start + row as i32;
                        if y < 0 || y >= area.height as i32 {
                            continue;
                        }
                        let text = fit(text, area.width as usize);
                        put_clipped(buf, area, 0, area.y + y as u16, &text, *style);
                    }
                }
            }
        }
    }

    /// Label for an image path: the file stem
    pub fn asset_lines(path: &String, theme: &Theme) -> Vec<(String, Style)> {
        let name = path.rsplit('/').next().unwrap_or(path);
        let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
        vec![(
            stem.replace(['-', '_'], " "),
            Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
        )]
    }
}

/// Area including the one-cell border, clamped to the screen
fn outer(area: Rect, screen: Rect) -> Rect {
    let x = area.x.saturating_sub(1).max(screen.x);
    let y = area.y.saturating_sub(1).max(screen.y);
    let right = area.right().saturating_add(1).min(screen.right());
    let bottom = area.bottom().saturating_add(1).min(screen.bottom());
    Rect {
        x,
        y,
        width: right.saturating_sub(x),
        height: bottom.saturating_sub(y),
    }
}

pub(crate) fn text_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate to `max` columns, ending with an ellipsis when cut
pub(crate) fn fit(text: &str, max: usize) -> String {
    if text_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Write `text` starting `x` columns into `area` (may be negative), clipped to it
pub(crate) fn put_clipped(buf: &mut Buffer, area: Rect, x: i32, y: u16, text: &str, style: Style) {
    if y < area.y || y >= area.bottom() {
        return;
    }
    let width = area.width as i32;
    let mut col = x;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0) as i32;
        if w == 0 {
            continue;
        }
        if col >= width {
            break;
        }
        if col >= 0 && col + w <= width {
            if let Some(cell) = buf.cell_mut((area.x + col as u16, y)) {
                cell.set_char(ch).set_style(style);
            }
        }
        col += w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("Cryo Sport", 20), "Cryo Sport");
        assert_eq!(fit("Cryo Sport", 5), "Cryo…");
        assert_eq!(fit("Cryo", 0), "");
    }

    #[test]
    fn test_put_clipped_negative_start() {
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        put_clipped(&mut buf, area, -2, 0, "abcdefgh", Style::default());
        assert_eq!(row(&buf, 0), "cdefgh");
    }

    #[test]
    fn test_put_clipped_past_end() {
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        put_clipped(&mut buf, area, 4, 0, "xyz", Style::default());
        assert_eq!(row(&buf, 0), "    xy");
    }

    #[test]
    fn test_asset_lines() {
        let lines = CarouselWidget::asset_lines(&"/images/teamlogos/fc_prishtina-logo.webp".to_string(), &Theme::default());
        assert_eq!(lines[0].0, "fc prishtina logo");
    }

    #[test]
    fn test_outer_clamps() {
        let screen = Rect::new(0, 0, 10, 10);
        assert_eq!(outer(Rect::new(1, 1, 4, 2), screen), Rect::new(0, 0, 6, 4));
        assert_eq!(outer(Rect::new(0, 0, 10, 10), screen), screen);
    }
}
