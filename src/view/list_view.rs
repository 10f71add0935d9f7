//! Ratatui widget drawing the mounted part of a [`StackSurface`].

use super::TerminalNode;
use crate::surface::StackSurface;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// Draws every visible row of the nodes mounted in a surface.
///
/// One extent unit is one terminal row. Spacers and margins render as blank
/// rows; nodes partially scrolled out are clipped at the area's edges.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    surface: &'a StackSurface<TerminalNode>,
    style: Style,
}

impl<'a> ListView<'a> {
    /// Widget over `surface` with the default style.
    pub fn new(surface: &'a StackSurface<TerminalNode>) -> Self {
        Self {
            surface,
            style: Style::default(),
        }
    }

    /// Style applied to item text.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for ListView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = i64::from(area.height);
        for placed in self.surface.visible_nodes() {
            let top = placed.offset.floor() as i64;
            for (row, line) in placed.node.lines().iter().enumerate() {
                let y = top + row as i64;
                if y < 0 {
                    continue;
                }
                if y >= height {
                    break;
                }
                buf.set_stringn(
                    area.x,
                    area.y + y as u16,
                    line,
                    usize::from(area.width),
                    self.style,
                );
            }
        }
    }
}
