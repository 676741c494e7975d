use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::keyboard::draw_keyboard;
use super::lane::{BACKGROUND, draw_lane};
use super::mode::TuiState;
use crate::shared::DisplayState;

pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState, ts: &TuiState, now: Instant) {
    frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);

    let [lane, keyboard] = Layout::vertical([
        Constraint::Percentage(50), // shot lane
        Constraint::Percentage(50), // status bar + keys
    ])
    .areas(area);

    draw_lane(frame, lane, &state.shots);
    draw_keyboard(frame, keyboard, state, ts, now);
}
