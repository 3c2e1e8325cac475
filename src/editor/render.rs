//! Scene drawing

use macroquad::prelude::*;
use crate::config::{Appearance, Rgb};
use super::Scene;

/// Draws one composed frame. Output only; no state flows back.
pub trait Renderer {
    fn draw(&mut self, scene: &Scene);
}

fn color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb[0], rgb[1], rgb[2], 255)
}

/// Immediate-mode renderer on the macroquad window
pub struct MacroquadRenderer {
    appearance: Appearance,
}

impl MacroquadRenderer {
    pub fn new(appearance: Appearance) -> Self {
        Self { appearance }
    }
}

impl Renderer for MacroquadRenderer {
    fn draw(&mut self, scene: &Scene) {
        let style = &self.appearance;
        clear_background(color(style.background));

        let line_color = color(style.line_color);
        for polyline in &scene.polylines {
            for segment in polyline.windows(2) {
                let (a, b) = (segment[0], segment[1]);
                draw_line(a.x, a.y, b.x, b.y, style.line_width, line_color);
            }
        }

        let star_color = color(style.star_color);
        for star in &scene.markers {
            draw_circle(star.x, star.y, style.star_radius, star_color);
        }

        if let Some(spawn) = scene.spawn {
            draw_circle(spawn.x, spawn.y, style.spawn_radius, color(style.spawn_color));
        }
    }
}
