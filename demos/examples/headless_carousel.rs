// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives a carousel without a window: a text renderer, a thread-backed
//! autoplay timer, and a scripted sequence of user input.
//!
//! Run with `cargo run -p understory_demos --example headless_carousel`.

use std::sync::mpsc;

use kurbo::Point;
use understory_carousel::{
    CarouselController, CarouselOptions, Control, Effect, Effects, InputEvent, Key,
};
use understory_demos::{TextRenderer, ThreadTimer, init_logging};

const OPTIONS: &str = r#"{
    "autoplayDelay": 150,
    "transition": "slide",
    "loop": true
}"#;

fn main() {
    init_logging(log::LevelFilter::Debug);

    let options: CarouselOptions = serde_json::from_str(OPTIONS).unwrap_or_else(|err| {
        log::warn!("bad demo options, using defaults: {err}");
        CarouselOptions::default()
    });

    let (sender, ticks) = mpsc::channel();
    let mut timer = ThreadTimer::new(sender);
    let mut renderer = TextRenderer::default();
    let mut carousel = CarouselController::new(options);

    let mut step = |carousel: &mut CarouselController, effects: Effects| {
        renderer.apply(carousel, &effects);
        timer.apply(&effects);
    };

    let effects = carousel.dispatch(InputEvent::Resize { width: 800.0 });
    step(&mut carousel, effects);
    let effects = carousel.set_images(["sunrise.jpg", "harbor.jpg", "forest.jpg", "dunes.jpg"]);
    step(&mut carousel, effects);

    // Let autoplay advance a few slides.
    for token in ticks.iter().take(3) {
        let effects = carousel.dispatch(InputEvent::TimerTick(token));
        step(&mut carousel, effects);
    }

    let script = [
        InputEvent::PointerEnter,
        InputEvent::Key(Key::ArrowLeft),
        InputEvent::PointerDown(Point::new(600.0, 200.0)),
        InputEvent::PointerMove(Point::new(520.0, 200.0)),
        InputEvent::PointerMove(Point::new(450.0, 200.0)),
        InputEvent::PointerUp(None),
        InputEvent::Activate(Control::Indicator(0)),
        InputEvent::Activate(Control::Slide(0)),
        InputEvent::Key(Key::Escape),
        InputEvent::Activate(Control::Delete(3)),
        InputEvent::PointerLeave,
    ];
    let mut tickets = Vec::new();
    for event in script {
        let effects = carousel.dispatch(event);
        tickets.extend(effects.iter().filter_map(|effect| match effect {
            Effect::MarkForRemoval { ticket, .. } => Some(*ticket),
            _ => None,
        }));
        step(&mut carousel, effects);
    }

    // The renderer would animate the removal; finish it straight away.
    for ticket in tickets {
        let effects = carousel.dispatch(InputEvent::RemovalFinished(ticket));
        step(&mut carousel, effects);
    }

    let effects = carousel.add_image("glacier.jpg");
    step(&mut carousel, effects);

    for token in ticks.iter().take(2) {
        let effects = carousel.dispatch(InputEvent::TimerTick(token));
        step(&mut carousel, effects);
    }

    let effects = carousel.destroy();
    step(&mut carousel, effects);
    drop(step);
    println!("{} frames rendered", renderer.lines().len());
}
