//! Plain-text frame renderer for terminals and logs
//!
//! Each frame is buffered line by line and written out on `present`.

use std::io::Write;

use glam::Vec2;

use super::{CardStyle, HAlign, Renderer, VAlign};
use crate::deck::IconId;

pub struct TextRenderer<W: Write> {
    out: W,
    frame: Vec<String>,
    frames_presented: u64,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frame: Vec::new(),
            frames_presented: 0,
        }
    }

    /// Lines of the frame being built (or the last presented one)
    pub fn frame(&self) -> &[String] {
        &self.frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn clear(&mut self) {
        self.frame.clear();
    }

    fn draw_card(&mut self, center: Vec2, radius: f32, style: CardStyle) {
        let [r, g, b] = style.border;
        self.frame.push(format!(
            "card  at ({:4.0}, {:4.0})  radius {:3.0}  border #{:02x}{:02x}{:02x}",
            center.x, center.y, radius, r, g, b
        ));
    }

    fn draw_icon(&mut self, icon_id: IconId, center: Vec2, rotation: f32, scale: f32) {
        self.frame.push(format!(
            "  icon {:3} at ({:4.0}, {:4.0})  rot {:3.0}  scale {:.1}",
            icon_id, center.x, center.y, rotation, scale
        ));
    }

    fn draw_text(&mut self, text: &str, _pos: Vec2, _h_align: HAlign, _v_align: VAlign) {
        self.frame.push(text.to_string());
    }

    fn present(&mut self) {
        let result = self
            .frame
            .iter()
            .try_for_each(|line| writeln!(self.out, "{}", line))
            .and_then(|_| writeln!(self.out))
            .and_then(|_| self.out.flush());
        match result {
            Ok(()) => self.frames_presented += 1,
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}
