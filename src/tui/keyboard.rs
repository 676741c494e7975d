use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Clear, Paragraph};

use super::mode::TuiState;
use crate::shared::{DisplayState, NUM_NATURALS, NUM_NOTES, is_sharp};

pub const HIGHLIGHT: Color = Color::Rgb(0, 170, 255);
const BAR: Color = Color::Rgb(32, 32, 32);

// status bar on top (a fifth of the area), keys below
pub fn draw_keyboard(frame: &mut Frame, area: Rect, state: &DisplayState, ts: &TuiState, now: Instant) {
    if area.is_empty() {
        return;
    }
    let bar_h = ((area.height as f32 * 0.2).round() as u16).clamp(1, area.height);
    let [bar, keys] = Layout::vertical([Constraint::Length(bar_h), Constraint::Min(0)]).areas(area);

    draw_status_bar(frame, bar, state);
    draw_keys(frame, keys, state, ts, now);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let style = Style::default().fg(Color::White).bg(BAR);
    frame.render_widget(Block::default().style(style), area);

    // text sits on the middle row, 2 cells in from each side
    let row = Rect {
        x: area.x.saturating_add(2),
        y: area.y + area.height / 2,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    let transpose = state.transpose.to_string();
    let [name, value] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(transpose.len() as u16),
    ])
    .areas(row);

    frame.render_widget(Paragraph::new(state.sample_name.as_str()).style(style), name);
    frame.render_widget(
        Paragraph::new(transpose).style(style).alignment(Alignment::Right),
        value,
    );
}

fn draw_keys(frame: &mut Frame, area: Rect, state: &DisplayState, ts: &TuiState, now: Instant) {
    if area.is_empty() {
        return;
    }
    let held = |note: usize| ts.is_held(state.note_keys[note], now);

    let mut blacks = Vec::with_capacity(NUM_NOTES - NUM_NATURALS);
    let mut white = 0;
    for note in 0..NUM_NOTES {
        if is_sharp(note) {
            continue;
        }
        let rect = white_key_rect(area, white);
        // the last column stays dark as the gap between keys
        let body = Rect { width: rect.width.saturating_sub(1).max(1), ..rect }.intersection(area);
        let fill = if held(note) { HIGHLIGHT } else { Color::White };
        draw_key(frame, body, fill, Color::Black, state.note_keys[note].label());

        // black keys sit on the left edge of D, E, G, A and B
        let j = note % 12;
        if j != 0 && j != 5 {
            blacks.push((note - 1, black_key_rect(area, rect.x)));
        }
        white += 1;
    }

    for (note, rect) in blacks {
        let fill = if held(note) { HIGHLIGHT } else { Color::Black };
        frame.render_widget(Clear, rect);
        draw_key(frame, rect, fill, Color::White, state.note_keys[note].label());
    }
}

fn draw_key(frame: &mut Frame, rect: Rect, fill: Color, ink: Color, label: &str) {
    if rect.is_empty() {
        return;
    }
    let style = Style::default().bg(fill).fg(ink);
    frame.render_widget(Block::default().style(style), rect);
    let bottom = Rect { y: rect.bottom() - 1, height: 1, ..rect };
    frame.render_widget(Paragraph::new(label).style(style).alignment(Alignment::Center), bottom);
}

// white key `index` of 15, spread so the keys always fill the full width
pub fn white_key_rect(area: Rect, index: usize) -> Rect {
    let key_w = area.width as f32 / NUM_NATURALS as f32;
    let x0 = (index as f32 * key_w).round() as u16;
    let x1 = ((index + 1) as f32 * key_w).round() as u16;
    Rect {
        x: area.x + x0,
        y: area.y,
        width: x1 - x0,
        height: area.height,
    }
}

// half a white key wide, 60% tall, centred on the boundary at `edge`
pub fn black_key_rect(area: Rect, edge: u16) -> Rect {
    let key_w = area.width as f32 / NUM_NATURALS as f32;
    let width = ((key_w / 2.0).round() as u16).max(1);
    let height = ((area.height as f32 * 0.6).round() as u16).max(1);
    Rect {
        x: edge.saturating_sub(width / 2),
        y: area.y,
        width,
        height,
    }
    .intersection(area)
}
