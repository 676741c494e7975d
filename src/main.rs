mod audio;
mod audio_api;
mod clock;
mod config;
mod loader;
mod middle;
mod piano;
mod shared;
mod shooter;
mod tui;

use std::io::stdout;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use clock::FrameClock;
use config::Config;
use middle::Middle;
use piano::Piano;
use shared::InputEvent;
use shooter::Shooter;
use tui::mode::TuiState;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::parse();
    config::init_logging(&config)?;

    let audio = audio::start_audio()?;
    let piano = Piano::new(&config, audio.sample_rate())
        .with_context(|| format!("can't load sounds from '{}'", config.sounds_dir.display()))?;
    let mut middle = Middle::new(piano, Shooter::new(config.velocity), config.range);
    for cmd in middle.startup_commands() {
        audio.send(cmd);
    }

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope
    crossterm::execute!(stdout(), EnterAlternateScreen)?;
    // Press/release events and bare modifier keys (left shift is a note).
    // Terminals without the protocol just ignore it.
    if let Err(e) = crossterm::execute!(
        stdout(),
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        )
    ) {
        warn!("keyboard enhancement unavailable: {e}");
    }

    let mut term = Terminal::new(CrosstermBackend::new(stdout()))?;
    term.clear()?;

    let mut clock = FrameClock::new(config.frame_interval(), Instant::now());
    let mut ts = TuiState::new();

    loop {
        let events = tui::input::poll_input(clock.until_next(Instant::now()), &mut ts)?;
        for event in events {
            match event {
                InputEvent::Quit => {
                    info!("quit");
                    return Ok(());
                }
                InputEvent::Resize => term.clear()?,
                _ => {}
            }
            for cmd in middle.handle_input(event)? {
                audio.send(cmd);
            }
        }

        audio.collect_retired();

        let now = Instant::now();
        if let Some(dt) = clock.tick(now) {
            middle.tick(dt);
            let ds = middle.display_state();
            term.draw(|frame| tui::view::render(frame, frame.area(), &ds, &ts, now))?;
        }
    }
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(stdout(), PopKeyboardEnhancementFlags, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
