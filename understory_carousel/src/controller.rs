// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The orchestrating controller.
//!
//! [`CarouselController`] owns exactly one of each state machine and is the
//! only place external events enter. Every public method and every
//! [`InputEvent`] passed to [`CarouselController::dispatch`] runs to completion
//! synchronously and returns the [`Effects`] the host should apply.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use crate::autoplay::{AutoplayScheduler, AutoplayState, PauseReasons, TimerCommands};
use crate::collection::{ImageCollection, ImageId, ImageInput};
use crate::effect::{Effect, Effects, RemovalTicket, RenderState};
use crate::gesture::{GestureInterpreter, SwipeDecision};
use crate::input::{Control, InputEvent, Key};
use crate::lazy_load::LazyLoadPolicy;
use crate::navigation::{NavigationState, Transition};
use crate::options::{
    CarouselOptions, OptionChange, OptionError, OptionKey, OptionValue, TransitionMode,
};

/// An image carousel's navigation, gesture, autoplay, and lazy-load state.
#[derive(Clone, Debug)]
pub struct CarouselController {
    images: ImageCollection,
    nav: NavigationState,
    gestures: GestureInterpreter,
    autoplay: AutoplayScheduler,
    lazy: LazyLoadPolicy,
    options: CarouselOptions,
    surface_width: f64,
    drag_offset: Option<f64>,
    hovered: bool,
    pending_removals: Vec<ImageId>,
    destroyed: bool,
}

impl Default for CarouselController {
    fn default() -> Self {
        Self::new(CarouselOptions::default())
    }
}

impl CarouselController {
    /// Creates a controller with no images.
    ///
    /// The surface width starts at zero, which makes any horizontal drag a
    /// swipe. Hosts should dispatch [`InputEvent::Resize`] before pointer
    /// input, or construct with [`CarouselController::with_surface_width`].
    #[must_use]
    pub fn new(options: CarouselOptions) -> Self {
        Self {
            images: ImageCollection::new(),
            nav: NavigationState::new(options.loop_enabled),
            gestures: GestureInterpreter::new(),
            autoplay: AutoplayScheduler::new(options.autoplay, options.autoplay_delay),
            lazy: LazyLoadPolicy::new(options.lazy_load),
            options,
            surface_width: 0.0,
            drag_offset: None,
            hovered: false,
            pending_removals: Vec::new(),
            destroyed: false,
        }
    }

    /// Creates a controller with no images and a known surface width.
    #[must_use]
    pub fn with_surface_width(options: CarouselOptions, width: f64) -> Self {
        let mut controller = Self::new(options);
        controller.set_surface_width(width);
        controller
    }

    // --- queries -----------------------------------------------------------

    /// The images in navigation order.
    #[must_use]
    pub fn images(&self) -> &ImageCollection {
        &self.images
    }

    /// The image sources in navigation order.
    #[must_use]
    pub fn sources(&self) -> Vec<&str> {
        self.images.sources().collect()
    }

    /// Number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` if there are no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The current slide, or `None` when there are no images.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.nav.current()
    }

    /// The current configuration.
    #[must_use]
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// Autoplay state.
    #[must_use]
    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    /// Returns `true` while the autoplay timer is armed.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Returns `true` while a drag gesture is open.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    /// Returns `true` once [`CarouselController::destroy`] has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Width of the display surface last reported by [`InputEvent::Resize`].
    #[must_use]
    pub fn surface_width(&self) -> f64 {
        self.surface_width
    }

    /// Returns `true` if the image has been materialized.
    #[must_use]
    pub fn is_materialized(&self, id: ImageId) -> bool {
        self.lazy.is_materialized(id)
    }

    /// Snapshot for renderers that repaint from scratch.
    #[must_use]
    pub fn render_state(&self) -> RenderState {
        RenderState {
            active_index: self.nav.current(),
            count: self.images.len(),
            materialized_indices: self.lazy.materialized_indices(&self.images),
            transition: self.options.transition,
            live_drag_offset: self.drag_offset,
            show_thumbnails: self.options.show_thumbnails,
            is_playing: self.autoplay.is_running(),
        }
    }

    // --- navigation --------------------------------------------------------

    /// Shows slide `target`, wrapping or clamping out-of-range targets.
    ///
    /// A no-op on an empty collection. Requesting the current slide still
    /// produces a [`Effect::Present`].
    pub fn go_to(&mut self, target: isize) -> Effects {
        if self.destroyed {
            return Effects::new();
        }
        let len = self.images.len();
        let transition = self.nav.request_index(target, len);
        self.after_navigation(transition)
    }

    /// Shows the next slide.
    pub fn next(&mut self) -> Effects {
        if self.destroyed {
            return Effects::new();
        }
        let transition = self.nav.next(self.images.len());
        self.after_navigation(transition)
    }

    /// Shows the previous slide.
    pub fn prev(&mut self) -> Effects {
        if self.destroyed {
            return Effects::new();
        }
        let transition = self.nav.prev(self.images.len());
        self.after_navigation(transition)
    }

    // --- images ------------------------------------------------------------

    /// Replaces all images.
    ///
    /// The current index is kept (clamped) if there was one; otherwise the
    /// configured start index applies.
    pub fn set_images<I>(&mut self, images: I) -> Effects
    where
        I: IntoIterator,
        I::Item: Into<ImageInput>,
    {
        let mut effects = Effects::new();
        if self.destroyed {
            return effects;
        }
        self.images.set_all(images);
        let len = self.images.len();
        self.lazy.retain_present(&self.images);
        self.prune_pending_removals();
        self.nav.reset(len, self.options.start_index);
        log::debug!("images replaced: {len} items, current {:?}", self.nav.current());
        effects.push(Effect::Rebuild);
        self.present(&mut effects);
        let commands = self.autoplay.set_item_count(len);
        push_timer(&mut effects, commands);
        effects
    }

    /// Appends an image and shows it.
    pub fn add_image(&mut self, source: impl Into<String>) -> Effects {
        let mut effects = Effects::new();
        if self.destroyed {
            return effects;
        }
        let id = self.images.append(source);
        let len = self.images.len();
        log::debug!("image {id} added at {}", len - 1);
        effects.push(Effect::Rebuild);
        let commands = self.autoplay.set_item_count(len);
        push_timer(&mut effects, commands);
        effects.extend(self.go_to(last_index(len)));
        effects
    }

    /// Starts removing the image at `index`.
    ///
    /// Emits [`Effect::MarkForRemoval`] and returns; the image stays in the
    /// collection until [`CarouselController::finish_removal`] (or
    /// [`InputEvent::RemovalFinished`]) is called with the ticket. Out-of-range
    /// indices are a no-op.
    pub fn remove_image_by_index(&mut self, index: usize) -> Effects {
        let mut effects = Effects::new();
        if self.destroyed {
            return effects;
        }
        let Some(id) = self.images.get(index).map(|item| item.id()) else {
            return effects;
        };
        if !self.pending_removals.contains(&id) {
            self.pending_removals.push(id);
        }
        log::debug!("image {id} at {index} marked for removal");
        effects.push(Effect::MarkForRemoval {
            ticket: RemovalTicket(id),
            index,
            id,
        });
        effects
    }

    /// Completes a removal started with [`CarouselController::remove_image_by_index`].
    ///
    /// Unknown or already-completed tickets are a no-op.
    pub fn finish_removal(&mut self, ticket: RemovalTicket) -> Effects {
        if self.destroyed {
            return Effects::new();
        }
        let Some(slot) = self.pending_removals.iter().position(|id| *id == ticket.0) else {
            return Effects::new();
        };
        self.pending_removals.swap_remove(slot);
        match self.images.index_of(ticket.0) {
            Some(index) => self.remove_now(index),
            None => Effects::new(),
        }
    }

    /// Removes the image at `index` without an exit-animation phase.
    ///
    /// Out-of-range indices are a no-op.
    pub fn remove_image_now(&mut self, index: usize) -> Effects {
        if self.destroyed {
            return Effects::new();
        }
        self.remove_now(index)
    }

    // --- autoplay ----------------------------------------------------------

    /// Starts (or restarts) autoplay, clearing an explicit pause.
    pub fn play(&mut self) -> Effects {
        self.timer_effects(|autoplay| autoplay.play())
    }

    /// Pauses autoplay explicitly.
    pub fn pause(&mut self) -> Effects {
        self.timer_effects(AutoplayScheduler::pause)
    }

    /// Pauses if not explicitly paused, otherwise plays.
    pub fn toggle_play(&mut self) -> Effects {
        self.timer_effects(AutoplayScheduler::toggle)
    }

    // --- options -----------------------------------------------------------

    /// Sets an option by wire name and applies its side effects.
    ///
    /// Unknown keys are stored without effect. A recognized key with a value
    /// of the wrong shape is rejected and nothing changes.
    pub fn set_option(&mut self, key: &str, value: OptionValue) -> Result<Effects, OptionError> {
        let mut effects = Effects::new();
        if self.destroyed {
            return Ok(effects);
        }
        let change = self.options.set(key, value).inspect_err(|err| {
            log::warn!("{err}");
        })?;
        let key = match change {
            OptionChange::Known(key) => key,
            OptionChange::Unknown(name) => {
                log::trace!("stored unrecognized option `{name}`");
                return Ok(effects);
            }
        };
        match key {
            OptionKey::Autoplay => {
                let commands = self.autoplay.set_enabled(self.options.autoplay);
                push_timer(&mut effects, commands);
            }
            OptionKey::AutoplayDelay => {
                let commands = self.autoplay.set_interval(self.options.autoplay_delay);
                push_timer(&mut effects, commands);
            }
            OptionKey::PauseOnHover => {
                let commands = if self.options.pause_on_hover && self.hovered {
                    self.autoplay.hold(PauseReasons::HOVER)
                } else {
                    self.autoplay.release(PauseReasons::HOVER)
                };
                push_timer(&mut effects, commands);
            }
            OptionKey::Loop => self.nav.set_loop_enabled(self.options.loop_enabled),
            OptionKey::LazyLoad => {
                let fresh = self.lazy.set_enabled(self.options.lazy_load, &self.images);
                self.push_materialize(&mut effects, fresh);
            }
            OptionKey::ShowThumbnails => {
                effects.push(Effect::Rebuild);
                self.present(&mut effects);
            }
            OptionKey::Transition => {
                if self.options.transition != TransitionMode::Slide {
                    self.drag_offset = None;
                }
                effects.push(Effect::SetTransition(self.options.transition));
                self.present(&mut effects);
            }
            OptionKey::StartIndex => {}
        }
        Ok(effects)
    }

    // --- fullscreen --------------------------------------------------------

    /// Requests fullscreen for slide `index`, or the current slide if `None`.
    ///
    /// Silently does nothing if there is no such slide.
    pub fn enter_fullscreen(&mut self, index: Option<usize>) -> Effects {
        let mut effects = Effects::new();
        if self.destroyed {
            return effects;
        }
        let Some(index) = index.or(self.nav.current()) else {
            return effects;
        };
        if let Some(item) = self.images.get(index) {
            effects.push(Effect::RequestFullscreen {
                index,
                id: item.id(),
            });
        }
        effects
    }

    /// Requests leaving fullscreen.
    pub fn exit_fullscreen(&mut self) -> Effects {
        let mut effects = Effects::new();
        if !self.destroyed {
            effects.push(Effect::ExitFullscreen);
        }
        effects
    }

    // --- lifecycle ---------------------------------------------------------

    /// Stops autoplay and releases everything. Later calls are no-ops.
    pub fn destroy(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.destroyed {
            return effects;
        }
        self.destroyed = true;
        let commands = self.autoplay.shutdown();
        push_timer(&mut effects, commands);
        self.gestures.cancel();
        self.drag_offset = None;
        self.pending_removals.clear();
        log::debug!("carousel destroyed");
        effects.push(Effect::Teardown);
        effects
    }

    // --- dispatch ----------------------------------------------------------

    /// The single entry point for external events.
    pub fn dispatch(&mut self, event: InputEvent) -> Effects {
        if self.destroyed {
            log::trace!("event after destroy ignored: {event:?}");
            return Effects::new();
        }
        log::trace!("dispatch {event:?}");
        match event {
            InputEvent::PointerDown(pos) => self.begin_drag(pos),
            InputEvent::PointerMove(pos) => self.update_drag(pos),
            InputEvent::PointerUp(pos) => match self.gestures.end(pos) {
                Some(decision) => self.finish_drag(decision),
                None => Effects::new(),
            },
            InputEvent::PointerCancel => match self.gestures.cancel() {
                Some(decision) => self.finish_drag(decision),
                None => Effects::new(),
            },
            InputEvent::PointerEnter => {
                self.hovered = true;
                if self.options.pause_on_hover {
                    self.timer_effects(|autoplay| autoplay.hold(PauseReasons::HOVER))
                } else {
                    Effects::new()
                }
            }
            InputEvent::PointerLeave => {
                self.hovered = false;
                self.timer_effects(|autoplay| autoplay.release(PauseReasons::HOVER))
            }
            InputEvent::Key(key) => match key {
                Key::ArrowLeft => self.prev(),
                Key::ArrowRight => self.next(),
                Key::Space => self.toggle_play(),
                Key::Escape => self.exit_fullscreen(),
                Key::Other => Effects::new(),
            },
            InputEvent::Resize { width } => self.resize(width),
            InputEvent::TimerTick(token) => {
                if self.autoplay.on_tick(token) {
                    self.next()
                } else {
                    log::trace!("stale tick {token:?} ignored");
                    Effects::new()
                }
            }
            InputEvent::Activate(control) => match control {
                Control::Previous => self.prev(),
                Control::Next => self.next(),
                Control::Indicator(index) | Control::Thumbnail(index) => {
                    self.go_to(isize::try_from(index).unwrap_or(isize::MAX))
                }
                Control::Slide(index) => self.enter_fullscreen(Some(index)),
                Control::Delete(index) => self.remove_image_by_index(index),
            },
            InputEvent::RemovalFinished(ticket) => self.finish_removal(ticket),
        }
    }

    fn begin_drag(&mut self, pos: Point) -> Effects {
        self.gestures.begin(pos, self.surface_width);
        self.timer_effects(|autoplay| autoplay.hold(PauseReasons::DRAG))
    }

    fn update_drag(&mut self, pos: Point) -> Effects {
        let mut effects = Effects::new();
        let Some(offset) = self.gestures.update(pos) else {
            return effects;
        };
        if self.options.transition == TransitionMode::Slide {
            self.drag_offset = Some(offset.percent);
            effects.push(Effect::DragOffset {
                percent: offset.percent,
            });
        }
        effects
    }

    fn finish_drag(&mut self, decision: SwipeDecision) -> Effects {
        self.drag_offset = None;
        let mut effects = match decision {
            SwipeDecision::Previous => self.prev(),
            SwipeDecision::Next => self.next(),
            SwipeDecision::SnapBack => {
                let transition = self.nav.refresh(self.images.len());
                self.after_navigation(transition)
            }
        };
        if effects.presented().is_none() {
            // Nothing to navigate; still clear the renderer's drag offset.
            self.present(&mut effects);
        }
        let commands = self.autoplay.release(PauseReasons::DRAG);
        push_timer(&mut effects, commands);
        effects
    }

    fn resize(&mut self, width: f64) -> Effects {
        let mut effects = Effects::new();
        self.set_surface_width(width);
        if !self.gestures.is_dragging() {
            self.present(&mut effects);
        }
        effects
    }

    fn set_surface_width(&mut self, width: f64) {
        self.surface_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.gestures.set_surface_width(self.surface_width);
    }

    fn remove_now(&mut self, index: usize) -> Effects {
        let mut effects = Effects::new();
        let Some(removed) = self.images.remove_at(index) else {
            return effects;
        };
        let len = self.images.len();
        self.nav.clamp_to(len);
        self.lazy.retain_present(&self.images);
        self.pending_removals.retain(|id| *id != removed.id());
        log::debug!(
            "image {} removed from {index}, current {:?}",
            removed.id(),
            self.nav.current()
        );
        effects.push(Effect::Rebuild);
        self.present(&mut effects);
        let commands = self.autoplay.set_item_count(len);
        push_timer(&mut effects, commands);
        effects
    }

    fn after_navigation(&mut self, transition: Option<Transition>) -> Effects {
        let mut effects = Effects::new();
        let Some(transition) = transition else {
            return effects;
        };
        if transition.changed() {
            log::debug!("slide {:?} -> {}", transition.from, transition.to);
        }
        self.present(&mut effects);
        effects
    }

    /// Pushes the position refresh plus any images entering the load window.
    fn present(&mut self, effects: &mut Effects) {
        self.drag_offset = None;
        effects.push(Effect::Present {
            active: self.nav.current(),
            count: self.images.len(),
        });
        let fresh = self.lazy.realize(&self.images, self.nav.current());
        self.push_materialize(effects, fresh);
    }

    fn push_materialize(&self, effects: &mut Effects, indices: Vec<usize>) {
        for index in indices {
            if let Some(item) = self.images.get(index) {
                effects.push(Effect::Materialize {
                    index,
                    id: item.id(),
                });
            }
        }
    }

    fn timer_effects(
        &mut self,
        f: impl FnOnce(&mut AutoplayScheduler) -> TimerCommands,
    ) -> Effects {
        let mut effects = Effects::new();
        if !self.destroyed {
            push_timer(&mut effects, f(&mut self.autoplay));
        }
        effects
    }

    fn prune_pending_removals(&mut self) {
        let images = &self.images;
        self.pending_removals.retain(|id| images.index_of(*id).is_some());
    }
}

fn push_timer(effects: &mut Effects, commands: TimerCommands) {
    effects.extend(commands.into_iter().map(Effect::Timer));
}

fn last_index(len: usize) -> isize {
    isize::try_from(len.saturating_sub(1)).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoplay::{TimerCommand, TimerToken};
    use alloc::vec;

    fn controller(images: &[&str]) -> CarouselController {
        let mut c = CarouselController::new(CarouselOptions::default());
        c.set_images(images.iter().copied());
        c
    }

    fn armed(c: &CarouselController) -> TimerToken {
        c.autoplay.armed_token().expect("timer should be armed")
    }

    #[test]
    fn navigation_scenario_with_loop() {
        let mut c = controller(&["a", "b", "c"]);
        assert_eq!(c.current_index(), Some(0));
        c.prev();
        assert_eq!(c.current_index(), Some(2));
        c.next();
        assert_eq!(c.current_index(), Some(0));
        c.next();
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn empty_controller_ignores_navigation() {
        let mut c = CarouselController::default();
        assert!(c.next().is_empty());
        assert!(c.prev().is_empty());
        assert!(c.go_to(3).is_empty());
        assert_eq!(c.current_index(), None);
    }

    #[test]
    fn go_to_current_still_presents() {
        let mut c = controller(&["a", "b"]);
        let effects = c.go_to(0);
        assert_eq!(effects.presented(), Some(Some(0)));
    }

    #[test]
    fn start_index_applies_to_first_images() {
        let mut c = CarouselController::new(CarouselOptions::default().with_start_index(2));
        c.set_images(["a", "b", "c", "d"]);
        assert_eq!(c.current_index(), Some(2));

        let mut c = CarouselController::new(CarouselOptions::default().with_start_index(9));
        c.set_images(["a", "b"]);
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn set_images_keeps_current_index() {
        let mut c = controller(&["a", "b", "c"]);
        c.go_to(2);
        c.set_images(["x", "y", "z", "w"]);
        assert_eq!(c.current_index(), Some(2));
        c.set_images(["x"]);
        assert_eq!(c.current_index(), Some(0));
        c.set_images(Vec::<&str>::new());
        assert_eq!(c.current_index(), None);
    }

    #[test]
    fn add_image_navigates_to_it() {
        let mut c = controller(&["a"]);
        let effects = c.add_image("b");
        assert_eq!(c.current_index(), Some(1));
        assert_eq!(effects.presented(), Some(Some(1)));
        assert!(effects.contains(&Effect::Rebuild));
        assert_eq!(c.sources(), vec!["a", "b"]);
    }

    #[test]
    fn add_image_to_two_items_starts_autoplay() {
        let mut c = controller(&["a"]);
        assert!(!c.is_playing());
        let effects = c.add_image("b");
        assert!(effects
            .timer_commands()
            .any(|command| matches!(command, TimerCommand::Start { .. })));
        assert!(c.is_playing());
    }

    #[test]
    fn removal_is_two_phase() {
        let mut c = controller(&["a", "b", "c"]);
        c.go_to(2);
        let effects = c.remove_image_by_index(2);
        let ticket = match effects.first() {
            Some(Effect::MarkForRemoval { ticket, index, .. }) => {
                assert_eq!(*index, 2);
                *ticket
            }
            other => panic!("expected MarkForRemoval, got {other:?}"),
        };
        assert_eq!(c.len(), 3);

        let effects = c.finish_removal(ticket);
        assert_eq!(c.len(), 2);
        assert_eq!(c.current_index(), Some(1));
        assert_eq!(effects.presented(), Some(Some(1)));

        assert!(c.finish_removal(ticket).is_empty());
    }

    #[test]
    fn removal_ticket_follows_the_image() {
        let mut c = controller(&["a", "b", "c"]);
        let effects = c.remove_image_by_index(2);
        let Some(Effect::MarkForRemoval { ticket, .. }) = effects.first().cloned() else {
            panic!("expected MarkForRemoval");
        };
        c.remove_image_now(0);
        c.finish_removal(ticket);
        assert_eq!(c.sources(), vec!["b"]);
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let mut c = controller(&["a"]);
        assert!(c.remove_image_by_index(1).is_empty());
        assert!(c.remove_image_now(5).is_empty());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn removing_last_image_empties_and_stops_autoplay() {
        let mut c = controller(&["a", "b"]);
        assert!(c.is_playing());
        c.remove_image_now(0);
        assert!(!c.is_playing());
        let effects = c.remove_image_now(0);
        assert_eq!(c.current_index(), None);
        assert_eq!(effects.presented(), Some(None));
    }

    #[test]
    fn drag_pauses_and_resumes_autoplay() {
        let mut c = controller(&["a", "b", "c"]);
        c.dispatch(InputEvent::Resize { width: 400.0 });
        let before = armed(&c);

        c.dispatch(InputEvent::PointerDown(Point::new(100.0, 0.0)));
        assert_eq!(c.autoplay_state(), AutoplayState::Paused(PauseReasons::DRAG));
        assert!(!c.autoplay.on_tick(before));

        let moved = c.dispatch(InputEvent::PointerMove(Point::new(80.0, 0.0)));
        assert_eq!(moved.first(), Some(&Effect::DragOffset { percent: -5.0 }));
        assert_eq!(c.render_state().live_drag_offset, Some(-5.0));

        c.dispatch(InputEvent::PointerUp(Some(Point::new(40.0, 0.0))));
        assert_eq!(c.current_index(), Some(1));
        assert_eq!(c.render_state().live_drag_offset, None);
        assert!(c.is_playing());
        assert_ne!(armed(&c), before);
    }

    #[test]
    fn fade_mode_has_no_live_offset() {
        let mut c = controller(&["a", "b"]);
        c.set_option("transition", "fade".into()).unwrap();
        c.dispatch(InputEvent::Resize { width: 400.0 });
        c.dispatch(InputEvent::PointerDown(Point::new(100.0, 0.0)));
        assert!(c.dispatch(InputEvent::PointerMove(Point::new(0.0, 0.0))).is_empty());
    }

    #[test]
    fn pointer_cancel_snaps_back() {
        let mut c = controller(&["a", "b", "c"]);
        c.dispatch(InputEvent::Resize { width: 400.0 });
        c.dispatch(InputEvent::PointerDown(Point::new(300.0, 0.0)));
        c.dispatch(InputEvent::PointerMove(Point::new(0.0, 0.0)));
        let effects = c.dispatch(InputEvent::PointerCancel);
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(effects.presented(), Some(Some(0)));
        assert!(c.is_playing());
    }

    #[test]
    fn pointer_up_without_down_is_ignored() {
        let mut c = controller(&["a", "b"]);
        assert!(c.dispatch(InputEvent::PointerUp(None)).is_empty());
        assert!(c.dispatch(InputEvent::PointerCancel).is_empty());
    }

    #[test]
    fn hover_and_drag_pauses_combine() {
        let mut c = controller(&["a", "b", "c"]);
        c.dispatch(InputEvent::PointerEnter);
        c.dispatch(InputEvent::PointerDown(Point::ORIGIN));
        c.dispatch(InputEvent::PointerUp(None));
        assert_eq!(c.autoplay_state(), AutoplayState::Paused(PauseReasons::HOVER));
        c.dispatch(InputEvent::PointerLeave);
        assert_eq!(c.autoplay_state(), AutoplayState::Running);
    }

    #[test]
    fn hover_is_ignored_without_pause_on_hover() {
        let mut c = CarouselController::new(CarouselOptions::default().with_pause_on_hover(false));
        c.set_images(["a", "b"]);
        c.dispatch(InputEvent::PointerEnter);
        assert!(c.is_playing());

        c.set_option("pauseOnHover", true.into()).unwrap();
        assert!(!c.is_playing());
        c.set_option("pauseOnHover", false.into()).unwrap();
        assert!(c.is_playing());
    }

    #[test]
    fn timer_ticks_advance_only_with_armed_token() {
        let mut c = controller(&["a", "b", "c"]);
        let token = armed(&c);
        c.dispatch(InputEvent::TimerTick(token));
        assert_eq!(c.current_index(), Some(1));

        c.pause();
        assert!(c.dispatch(InputEvent::TimerTick(token)).is_empty());
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn keys_map_to_actions() {
        let mut c = controller(&["a", "b", "c"]);
        c.dispatch(InputEvent::Key(Key::ArrowRight));
        assert_eq!(c.current_index(), Some(1));
        c.dispatch(InputEvent::Key(Key::ArrowLeft));
        assert_eq!(c.current_index(), Some(0));
        c.dispatch(InputEvent::Key(Key::Space));
        assert!(!c.is_playing());
        c.dispatch(InputEvent::Key(Key::Space));
        assert!(c.is_playing());
        let effects = c.dispatch(InputEvent::Key(Key::Escape));
        assert_eq!(effects.first(), Some(&Effect::ExitFullscreen));
        assert!(c.dispatch(InputEvent::Key(Key::Other)).is_empty());
    }

    #[test]
    fn controls_map_to_actions() {
        let mut c = controller(&["a", "b", "c"]);
        c.dispatch(InputEvent::Activate(Control::Indicator(2)));
        assert_eq!(c.current_index(), Some(2));
        c.dispatch(InputEvent::Activate(Control::Thumbnail(1)));
        assert_eq!(c.current_index(), Some(1));
        c.dispatch(InputEvent::Activate(Control::Next));
        assert_eq!(c.current_index(), Some(2));
        c.dispatch(InputEvent::Activate(Control::Previous));
        assert_eq!(c.current_index(), Some(1));

        let effects = c.dispatch(InputEvent::Activate(Control::Slide(0)));
        assert!(matches!(
            effects.first(),
            Some(Effect::RequestFullscreen { index: 0, .. })
        ));

        let effects = c.dispatch(InputEvent::Activate(Control::Delete(0)));
        let Some(Effect::MarkForRemoval { ticket, .. }) = effects.first().cloned() else {
            panic!("expected MarkForRemoval");
        };
        c.dispatch(InputEvent::RemovalFinished(ticket));
        assert_eq!(c.sources(), vec!["b", "c"]);
    }

    #[test]
    fn fullscreen_on_missing_slide_is_silent() {
        let mut c = CarouselController::default();
        assert!(c.enter_fullscreen(None).is_empty());
        c.set_images(["a"]);
        assert!(c.enter_fullscreen(Some(4)).is_empty());
        assert_eq!(c.enter_fullscreen(None).len(), 1);
    }

    #[test]
    fn initial_surface_width_sets_the_swipe_threshold() {
        let mut c = CarouselController::with_surface_width(CarouselOptions::default(), 400.0);
        c.set_images(["a", "b", "c"]);
        c.dispatch(InputEvent::PointerDown(Point::new(100.0, 0.0)));
        c.dispatch(InputEvent::PointerUp(Some(Point::new(99.0, 0.0))));
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(c.surface_width(), 400.0);
    }

    #[test]
    fn resize_never_moves_the_index() {
        let mut c = controller(&["a", "b", "c"]);
        c.go_to(2);
        let effects = c.dispatch(InputEvent::Resize { width: 1024.0 });
        assert_eq!(effects.presented(), Some(Some(2)));
        assert_eq!(c.current_index(), Some(2));
        assert_eq!(c.surface_width(), 1024.0);
    }

    #[test]
    fn lazy_load_materializes_the_window() {
        let mut c = controller(&["a", "b", "c", "d", "e"]);
        assert_eq!(c.render_state().materialized_indices, vec![0, 1]);
        let effects = c.go_to(3);
        assert_eq!(effects.materialized(), vec![2, 3, 4]);
        c.go_to(0);
        assert_eq!(c.render_state().materialized_indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn disabling_lazy_load_materializes_all() {
        let mut c = controller(&["a", "b", "c", "d"]);
        let effects = c.set_option("lazyLoad", false.into()).unwrap();
        assert_eq!(effects.materialized(), vec![2, 3]);
    }

    #[test]
    fn option_side_effects() {
        let mut c = controller(&["a", "b"]);

        let effects = c.set_option("showThumbnails", false.into()).unwrap();
        assert_eq!(effects.first(), Some(&Effect::Rebuild));
        assert!(!c.render_state().show_thumbnails);

        let effects = c.set_option("transition", "zoom".into()).unwrap();
        assert_eq!(
            effects.first(),
            Some(&Effect::SetTransition(TransitionMode::Zoom))
        );
        assert_eq!(c.current_index(), Some(0));

        c.set_option("autoplay", false.into()).unwrap();
        assert!(!c.is_playing());
        c.set_option("autoplay", true.into()).unwrap();
        assert!(c.is_playing());

        let effects = c.set_option("autoplayDelay", OptionValue::Int(1000)).unwrap();
        assert!(effects.timer_commands().any(|command| matches!(
            command,
            TimerCommand::Start {
                interval_ms: 1000,
                ..
            }
        )));

        c.set_option("loop", false.into()).unwrap();
        c.go_to(1);
        c.next();
        assert_eq!(c.current_index(), Some(1));

        assert!(c.set_option("whatever", OptionValue::Int(1)).unwrap().is_empty());
        assert!(c.set_option("loop", "sideways".into()).is_err());
        assert!(!c.options().loop_enabled);
    }

    #[test]
    fn destroy_stops_everything() {
        let mut c = controller(&["a", "b", "c"]);
        let token = armed(&c);
        let effects = c.destroy();
        assert!(effects.contains(&Effect::Timer(TimerCommand::Cancel { token })));
        assert_eq!(effects.last(), Some(&Effect::Teardown));
        assert!(c.is_destroyed());

        assert!(c.dispatch(InputEvent::TimerTick(token)).is_empty());
        assert!(c.next().is_empty());
        assert!(c.play().is_empty());
        assert!(c.destroy().is_empty());
        assert_eq!(c.current_index(), Some(0));
    }
}
