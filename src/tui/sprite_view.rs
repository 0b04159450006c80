//! Half-block sprite rendering
//!
//! Each terminal cell shows two stacked pixels: `▀` with the upper pixel as
//! foreground and the lower as background.

use crate::sprite::Sprite;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Alpha below which a pixel is treated as see-through
const ALPHA_CUTOFF: u8 = 128;

pub struct SpriteWidget<'a> {
    sprite: &'a Sprite,
    background: Color,
}

impl<'a> SpriteWidget<'a> {
    pub fn new(sprite: &'a Sprite, background: Color) -> Self {
        Self { sprite, background }
    }

    fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        let [r, g, b, a] = self.sprite.pixel(x, y);
        (a >= ALPHA_CUTOFF).then_some(Color::Rgb(r, g, b))
    }
}

impl Widget for SpriteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = self.sprite.width().min(u32::from(area.width)) as u16;
        let rows = self.sprite.height().div_ceil(2).min(u32::from(area.height)) as u16;

        // Center inside the area; crop around the middle when too large
        let x0 = area.x + (area.width - cols) / 2;
        let y0 = area.y + (area.height - rows) / 2;
        let src_x = (self.sprite.width() - u32::from(cols)) / 2;
        let src_y = (self.sprite.height().div_ceil(2) - u32::from(rows)) / 2 * 2;

        for row in 0..rows {
            for col in 0..cols {
                let x = src_x + u32::from(col);
                let y = src_y + u32::from(row) * 2;
                let top = self.color_at(x, y);
                let bottom = self.color_at(x, y + 1);
                if top.is_none() && bottom.is_none() {
                    continue;
                }

                if let Some(cell) = buf.cell_mut((x0 + col, y0 + row)) {
                    cell.set_char('▀')
                        .set_fg(top.unwrap_or(self.background))
                        .set_bg(bottom.unwrap_or(self.background));
                }
            }
        }
    }
}
