// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the runnable carousel demos.

use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use understory_carousel::{
    CarouselController, Effect, Effects, FullscreenService, ImageId, PlatformError, TimerCommand,
    TimerToken,
};

/// Installs `env_logger` at `level`; `RUST_LOG` still overrides it.
pub fn init_logging(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Runs one thread per armed timer and sends each firing's token to `ticks`.
#[derive(Debug)]
pub struct ThreadTimer {
    ticks: mpsc::Sender<TimerToken>,
    running: HashMap<TimerToken, mpsc::Sender<()>>,
}

impl ThreadTimer {
    /// Creates a timer host with nothing armed.
    pub fn new(ticks: mpsc::Sender<TimerToken>) -> Self {
        Self {
            ticks,
            running: HashMap::new(),
        }
    }

    /// Number of timer threads currently armed.
    pub fn running(&self) -> usize {
        self.running.len()
    }

    /// Starts and stops threads as the timer commands in `effects` say.
    pub fn apply(&mut self, effects: &Effects) {
        for command in effects.timer_commands() {
            match *command {
                TimerCommand::Start { token, interval_ms } => {
                    let (stop, stopped) = mpsc::channel();
                    self.running.insert(token, stop);
                    let ticks = self.ticks.clone();
                    let interval = Duration::from_millis(interval_ms.into());
                    thread::spawn(move || {
                        while let Err(RecvTimeoutError::Timeout) = stopped.recv_timeout(interval) {
                            if ticks.send(token).is_err() {
                                break;
                            }
                        }
                    });
                }
                TimerCommand::Cancel { token } => {
                    if let Some(stop) = self.running.remove(&token) {
                        let _ = stop.send(());
                    }
                }
            }
        }
    }
}

/// Renders the carousel as one line of text per presented frame.
#[derive(Debug, Default)]
pub struct TextRenderer {
    lines: Vec<String>,
    fullscreen: Option<usize>,
}

impl TextRenderer {
    /// Applies `effects`, printing a frame for each `Present`.
    pub fn apply(&mut self, carousel: &CarouselController, effects: &Effects) {
        for effect in effects {
            if understory_carousel::apply_fullscreen(self, effect) {
                continue;
            }
            match effect {
                Effect::Present { active, count } => {
                    let line = frame(carousel, *active, *count);
                    println!("{line}");
                    self.lines.push(line);
                }
                Effect::DragOffset { percent } => println!("  drag offset {percent:+.1}%"),
                Effect::Materialize { index, id } => println!("  load #{index} ({id})"),
                Effect::MarkForRemoval { index, .. } => println!("  fading out #{index}"),
                Effect::SetTransition(mode) => println!("  transition -> {mode}"),
                Effect::Rebuild => println!("  rebuild slides"),
                Effect::Teardown => println!("  teardown"),
                Effect::Timer(_) | Effect::RequestFullscreen { .. } | Effect::ExitFullscreen => {}
            }
        }
    }

    /// Every frame printed so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl FullscreenService for TextRenderer {
    fn request_fullscreen(&mut self, index: usize, id: ImageId) -> Result<(), PlatformError> {
        println!("  fullscreen #{index} ({id})");
        self.fullscreen = Some(index);
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), PlatformError> {
        self.fullscreen.take().map(|_| ()).ok_or(PlatformError::NotFullscreen)
    }
}

fn frame(carousel: &CarouselController, active: Option<usize>, count: usize) -> String {
    let Some(active) = active else {
        return "[ no images yet ]".to_string();
    };
    let dots: String = (0..count)
        .map(|i| if i == active { '●' } else { '○' })
        .collect();
    let source = carousel
        .images()
        .get(active)
        .map(|item| item.source())
        .unwrap_or_default();
    let play = if carousel.is_playing() { "▶" } else { "⏸" };
    format!("{play} {dots}  {source}")
}
