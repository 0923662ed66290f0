// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplay scheduling as an explicit state machine.
//!
//! The scheduler never owns a clock. It decides whether a periodic timer
//! *should* be armed and tells the host via [`TimerCommand`]s. The host runs
//! the timer and reports each tick back with the [`TimerToken`] it was started
//! with; [`AutoplayScheduler::on_tick`] only accepts the currently armed token,
//! so a timer that keeps firing after pause, restart, or shutdown is inert.
//!
//! Whether the timer is armed is derived from four inputs:
//!
//! - autoplay is configured on,
//! - the collection has at least two items,
//! - the scheduler has not been shut down,
//! - and no [`PauseReasons`] are active.
//!
//! Pause reasons are independent: releasing the hover pause while a drag is in
//! progress keeps the scheduler paused until the drag also ends.
//!
//! ```rust
//! use understory_carousel::autoplay::{AutoplayScheduler, AutoplayState, PauseReasons};
//!
//! let mut autoplay = AutoplayScheduler::new(true, 3000);
//! autoplay.set_item_count(3);
//! assert_eq!(autoplay.state(), AutoplayState::Running);
//!
//! autoplay.hold(PauseReasons::HOVER);
//! autoplay.hold(PauseReasons::DRAG);
//! autoplay.release(PauseReasons::HOVER);
//! assert_eq!(autoplay.state(), AutoplayState::Paused(PauseReasons::DRAG));
//!
//! autoplay.release(PauseReasons::DRAG);
//! assert_eq!(autoplay.state(), AutoplayState::Running);
//! ```

bitflags::bitflags! {
    /// Independent reasons the scheduler is held paused.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PauseReasons: u8 {
        /// The pointer is over the carousel and hover-pausing is on.
        const HOVER    = 0b0000_0001;
        /// A drag gesture is in progress.
        const DRAG     = 0b0000_0010;
        /// The user or host paused explicitly.
        const EXPLICIT = 0b0000_0100;
    }
}

/// Identifies one arming of the periodic timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Returns the raw generation value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Instruction for the host's timer facility.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start a periodic timer firing every `interval_ms`, tagged with `token`.
    Start {
        /// Tag to report back with each tick.
        token: TimerToken,
        /// Period in milliseconds.
        interval_ms: u32,
    },
    /// Stop the timer tagged with `token`.
    Cancel {
        /// Tag of the timer to stop.
        token: TimerToken,
    },
}

/// Observable state of the scheduler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AutoplayState {
    /// Autoplay is off, there are fewer than two items, or it was shut down.
    Stopped,
    /// The periodic timer is armed.
    Running,
    /// Autoplay would run but at least one pause reason is active.
    Paused(PauseReasons),
}

/// Commands produced by one scheduler operation (at most a cancel and a start).
pub type TimerCommands = smallvec::SmallVec<[TimerCommand; 2]>;

/// Decides when the autoplay timer runs.
#[derive(Clone, Debug)]
pub struct AutoplayScheduler {
    enabled: bool,
    interval_ms: u32,
    item_count: usize,
    reasons: PauseReasons,
    shut_down: bool,
    armed: Option<TimerToken>,
    generation: u64,
}

impl AutoplayScheduler {
    /// Creates a scheduler for an empty collection.
    ///
    /// An interval of zero is normalized to one millisecond.
    #[must_use]
    pub fn new(enabled: bool, interval_ms: u32) -> Self {
        Self {
            enabled,
            interval_ms: interval_ms.max(1),
            item_count: 0,
            reasons: PauseReasons::empty(),
            shut_down: false,
            armed: None,
            generation: 0,
        }
    }

    /// The derived state.
    #[must_use]
    pub fn state(&self) -> AutoplayState {
        if !self.eligible() {
            AutoplayState::Stopped
        } else if !self.reasons.is_empty() {
            AutoplayState::Paused(self.reasons)
        } else {
            AutoplayState::Running
        }
    }

    /// Returns `true` while the timer is armed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    /// The token of the armed timer, if any.
    #[must_use]
    pub fn armed_token(&self) -> Option<TimerToken> {
        self.armed
    }

    /// Active pause reasons.
    #[must_use]
    pub fn pause_reasons(&self) -> PauseReasons {
        self.reasons
    }

    /// Configured tick period.
    #[must_use]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Whether autoplay is configured on.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Explicit play: clears an explicit pause and (re)starts the timer.
    ///
    /// A no-op when autoplay is off or there are fewer than two items. If the
    /// timer is already armed it is restarted with a fresh token. Hover and drag
    /// pauses still apply.
    pub fn play(&mut self) -> TimerCommands {
        if !self.eligible() {
            return TimerCommands::new();
        }
        self.reasons.remove(PauseReasons::EXPLICIT);
        let mut commands = self.disarm();
        commands.extend(self.sync());
        commands
    }

    /// Explicit pause. Idempotent.
    pub fn pause(&mut self) -> TimerCommands {
        self.hold(PauseReasons::EXPLICIT)
    }

    /// Pauses if the timer is running, otherwise plays.
    pub fn toggle(&mut self) -> TimerCommands {
        if self.is_running() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Adds pause reasons.
    pub fn hold(&mut self, reasons: PauseReasons) -> TimerCommands {
        self.reasons.insert(reasons);
        self.sync()
    }

    /// Clears pause reasons; the timer resumes only once all reasons are clear.
    ///
    /// Resuming always starts a full interval.
    pub fn release(&mut self, reasons: PauseReasons) -> TimerCommands {
        self.reasons.remove(reasons);
        self.sync()
    }

    /// Turns autoplay on or off.
    ///
    /// Turning it on clears an explicit pause, mirroring a fresh play request.
    pub fn set_enabled(&mut self, enabled: bool) -> TimerCommands {
        self.enabled = enabled;
        if enabled {
            self.reasons.remove(PauseReasons::EXPLICIT);
        }
        self.sync()
    }

    /// Changes the tick period; a running timer restarts at the new period.
    pub fn set_interval(&mut self, interval_ms: u32) -> TimerCommands {
        let interval_ms = interval_ms.max(1);
        if interval_ms == self.interval_ms {
            return TimerCommands::new();
        }
        self.interval_ms = interval_ms;
        if self.armed.is_none() {
            return TimerCommands::new();
        }
        let mut commands = self.disarm();
        commands.extend(self.sync());
        commands
    }

    /// Informs the scheduler of the collection size.
    pub fn set_item_count(&mut self, item_count: usize) -> TimerCommands {
        self.item_count = item_count;
        self.sync()
    }

    /// Accepts a tick. Returns `true` if the carousel should advance.
    #[must_use]
    pub fn on_tick(&self, token: TimerToken) -> bool {
        self.armed == Some(token)
    }

    /// Stops the timer for good. Later operations produce no commands.
    pub fn shutdown(&mut self) -> TimerCommands {
        self.shut_down = true;
        self.sync()
    }

    fn eligible(&self) -> bool {
        self.enabled && self.item_count >= 2 && !self.shut_down
    }

    fn disarm(&mut self) -> TimerCommands {
        let mut commands = TimerCommands::new();
        if let Some(token) = self.armed.take() {
            commands.push(TimerCommand::Cancel { token });
        }
        commands
    }

    /// Arms or disarms the timer to match [`Self::state`].
    fn sync(&mut self) -> TimerCommands {
        let want = self.state() == AutoplayState::Running;
        match (want, self.armed) {
            (true, None) => {
                self.generation = self.generation.wrapping_add(1);
                let token = TimerToken(self.generation);
                self.armed = Some(token);
                log::debug!("autoplay armed: {token:?} every {}ms", self.interval_ms);
                let mut commands = TimerCommands::new();
                commands.push(TimerCommand::Start {
                    token,
                    interval_ms: self.interval_ms,
                });
                commands
            }
            (false, Some(_)) => {
                log::debug!("autoplay disarmed: {:?}", self.state());
                self.disarm()
            }
            _ => TimerCommands::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(commands: &TimerCommands) -> Option<TimerToken> {
        commands.iter().find_map(|c| match c {
            TimerCommand::Start { token, .. } => Some(*token),
            TimerCommand::Cancel { .. } => None,
        })
    }

    fn cancelled(commands: &TimerCommands) -> Option<TimerToken> {
        commands.iter().find_map(|c| match c {
            TimerCommand::Cancel { token } => Some(*token),
            TimerCommand::Start { .. } => None,
        })
    }

    #[test]
    fn needs_two_items_to_run() {
        let mut a = AutoplayScheduler::new(true, 3000);
        assert!(a.set_item_count(1).is_empty());
        assert_eq!(a.state(), AutoplayState::Stopped);
        assert!(a.play().is_empty());

        let commands = a.set_item_count(2);
        assert!(started(&commands).is_some());
        assert_eq!(a.state(), AutoplayState::Running);

        let commands = a.set_item_count(1);
        assert!(cancelled(&commands).is_some());
        assert!(!a.is_running());
    }

    #[test]
    fn disabled_scheduler_never_starts() {
        let mut a = AutoplayScheduler::new(false, 3000);
        a.set_item_count(5);
        assert!(a.play().is_empty());
        assert_eq!(a.state(), AutoplayState::Stopped);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut a = AutoplayScheduler::new(true, 3000);
        a.set_item_count(3);
        assert_eq!(a.pause().len(), 1);
        assert!(a.pause().is_empty());
        assert_eq!(a.state(), AutoplayState::Paused(PauseReasons::EXPLICIT));
    }

    #[test]
    fn all_reasons_must_clear_before_resuming() {
        let mut a = AutoplayScheduler::new(true, 3000);
        a.set_item_count(3);
        a.hold(PauseReasons::HOVER);
        a.hold(PauseReasons::DRAG);

        assert!(a.release(PauseReasons::DRAG).is_empty());
        assert!(!a.is_running());

        let commands = a.release(PauseReasons::HOVER);
        assert!(started(&commands).is_some());
        assert!(a.is_running());
    }

    #[test]
    fn play_does_not_override_hover() {
        let mut a = AutoplayScheduler::new(true, 3000);
        a.set_item_count(3);
        a.pause();
        a.hold(PauseReasons::HOVER);
        assert!(a.play().is_empty());
        assert_eq!(a.state(), AutoplayState::Paused(PauseReasons::HOVER));
    }

    #[test]
    fn play_while_running_restarts_with_new_token() {
        let mut a = AutoplayScheduler::new(true, 3000);
        let first = started(&a.set_item_count(3)).unwrap();
        let commands = a.play();
        assert_eq!(cancelled(&commands), Some(first));
        let second = started(&commands).unwrap();
        assert_ne!(first, second);
        assert!(!a.on_tick(first));
        assert!(a.on_tick(second));
    }

    #[test]
    fn toggle_flips_explicit_pause() {
        let mut a = AutoplayScheduler::new(true, 3000);
        a.set_item_count(3);
        a.toggle();
        assert_eq!(a.state(), AutoplayState::Paused(PauseReasons::EXPLICIT));
        a.toggle();
        assert_eq!(a.state(), AutoplayState::Running);
    }

    #[test]
    fn toggle_while_hovered_plays_once_hover_clears() {
        let mut a = AutoplayScheduler::new(true, 3000);
        a.set_item_count(3);
        a.hold(PauseReasons::HOVER);
        assert!(a.toggle().is_empty());
        assert_eq!(a.state(), AutoplayState::Paused(PauseReasons::HOVER));
        a.release(PauseReasons::HOVER);
        assert_eq!(a.state(), AutoplayState::Running);
    }

    #[test]
    fn interval_change_restarts_running_timer() {
        let mut a = AutoplayScheduler::new(true, 3000);
        a.set_item_count(3);
        let commands = a.set_interval(1000);
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[1],
            TimerCommand::Start {
                interval_ms: 1000,
                ..
            }
        ));
    }

    #[test]
    fn interval_change_while_paused_applies_on_resume() {
        let mut a = AutoplayScheduler::new(true, 3000);
        a.set_item_count(3);
        a.pause();
        assert!(a.set_interval(500).is_empty());
        let commands = a.play();
        assert!(matches!(
            commands[0],
            TimerCommand::Start {
                interval_ms: 500,
                ..
            }
        ));
    }

    #[test]
    fn zero_interval_is_normalized() {
        let a = AutoplayScheduler::new(true, 0);
        assert_eq!(a.interval_ms(), 1);
    }

    #[test]
    fn stale_ticks_are_ignored() {
        let mut a = AutoplayScheduler::new(true, 3000);
        let token = started(&a.set_item_count(3)).unwrap();
        assert!(a.on_tick(token));
        a.pause();
        assert!(!a.on_tick(token));
    }

    #[test]
    fn shutdown_cancels_and_stays_down() {
        let mut a = AutoplayScheduler::new(true, 3000);
        let token = started(&a.set_item_count(3)).unwrap();
        assert_eq!(cancelled(&a.shutdown()), Some(token));
        assert!(a.play().is_empty());
        assert!(a.set_enabled(true).is_empty());
        assert!(!a.on_tick(token));
        assert_eq!(a.state(), AutoplayState::Stopped);
    }

    #[test]
    fn enabling_clears_explicit_pause() {
        let mut a = AutoplayScheduler::new(true, 3000);
        a.set_item_count(3);
        a.pause();
        a.set_enabled(false);
        assert_eq!(a.state(), AutoplayState::Stopped);
        a.set_enabled(true);
        assert_eq!(a.state(), AutoplayState::Running);
    }
}
