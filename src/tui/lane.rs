use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Line};

use super::keyboard::HIGHLIGHT;
use crate::shared::{NUM_NATURALS, ShotView, is_sharp};

// logical units per terminal cell, so a 100 column terminal is 800 units wide
pub const CELL_W: f64 = 8.0;
pub const CELL_H: f64 = 16.0;

pub const BACKGROUND: Color = Color::Rgb(64, 64, 64);
const STAFF: Color = Color::Rgb(128, 128, 128);

// the middle row (of 15 naturals) sits on the centre line
const MIDDLE_ROW: f64 = (NUM_NATURALS / 2) as f64;

// Logical size of `area`. Recomputed every frame, so a terminal resize just
// changes the coordinate space.
pub fn lane_size(area: Rect) -> (f64, f64) {
    (area.width as f64 * CELL_W, area.height as f64 * CELL_H)
}

// dots enter at the right edge and slide left; higher notes sit higher up
pub fn shot_position(shot: &ShotView, width: f64, height: f64) -> (f64, f64) {
    let r = dot_radius(height);
    let x = width - shot.distance as f64 + r;
    let y = height / 2.0 + r * (shot.row as f64 - MIDDLE_ROW);
    (x, y)
}

fn dot_radius(height: f64) -> f64 {
    height / 30.0
}

pub fn draw_lane(frame: &mut Frame, area: Rect, shots: &[ShotView]) {
    let (w, h) = lane_size(area);
    let r = dot_radius(h);

    let canvas = Canvas::default()
        .background_color(BACKGROUND)
        .marker(Marker::Braille)
        .x_bounds([0.0, w])
        .y_bounds([0.0, h])
        .paint(|ctx| {
            // five lines above and below the centre, one dot apart
            for k in 1..=5 {
                let dy = 2.0 * r * k as f64;
                for y in [h / 2.0 - dy, h / 2.0 + dy] {
                    ctx.draw(&Line { x1: 0.0, y1: y, x2: w, y2: y, color: STAFF });
                }
            }
            ctx.layer();

            for shot in shots {
                let (x, y) = shot_position(shot, w, h);
                let color = if is_sharp(shot.note) { HIGHLIGHT } else { Color::White };
                ctx.draw(&Circle { x, y, radius: r, color });
            }
        });
    frame.render_widget(canvas, area);
}
