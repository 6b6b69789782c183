use rand::{Rng, SeedableRng, rngs::StdRng};
use shuffle_slideshow::slideshow::{Action, ImageRef, SlideDuration, SlideOrder, SlideshowState};
use std::collections::HashMap;

fn images(n: usize) -> Vec<ImageRef> {
    (0..n).map(|i| ImageRef::new(format!("/lib/{i:03}.jpg"))).collect()
}

fn random_action(rng: &mut StdRng, state: &SlideshowState) -> Action {
    match rng.random_range(0..12) {
        0 => Action::Replace(images(rng.random_range(0..6))),
        1 if !state.is_empty() => Action::SetDuration {
            index: rng.random_range(0..state.len()),
            duration: SlideDuration::PRESETS[rng.random_range(0..SlideDuration::PRESETS.len())],
        },
        2 => Action::Start,
        3 => Action::Next,
        4 => Action::Previous,
        5 => Action::StopTimer,
        6 => Action::RestartTimer,
        _ => Action::Tick,
    }
}

fn assert_invariants(state: &SlideshowState, step: usize) {
    if state.is_started() {
        assert!(!state.is_empty(), "step {step}: started with no slides");
        assert!(
            state.current_index() < state.len(),
            "step {step}: index {} out of {}",
            state.current_index(),
            state.len()
        );
        let duration = state.slides()[state.current_index()].duration.as_secs();
        assert!(
            state.time_left() <= duration,
            "step {step}: countdown above slide duration"
        );
    } else {
        assert!(!state.timer_active(), "step {step}: timer active before start");
        assert!(!state.countdown_active());
    }
}

#[test]
fn invariants_hold_under_random_actions() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut order = SlideOrder::shuffled(Some(99));
    for _ in 0..50 {
        let mut state = SlideshowState::new();
        for step in 0..400 {
            let action = random_action(&mut rng, &state);
            state = state.apply(action, &mut order);
            assert_invariants(&state, step);
        }
    }
}

#[test]
fn start_preserves_every_pairing() {
    let mut order = SlideOrder::shuffled(Some(3));
    for n in 0..8usize {
        let mut state = SlideshowState::new().apply(Action::Replace(images(n)), &mut order);
        for index in 0..n {
            let duration = SlideDuration::from_secs(10 + index as u32).unwrap();
            state = state.apply(Action::SetDuration { index, duration }, &mut order);
        }
        let before: HashMap<String, u32> = state
            .slides()
            .iter()
            .map(|s| (s.image.name().to_string(), s.duration.as_secs()))
            .collect();

        let started = state.apply(Action::Start, &mut order);
        let after: HashMap<String, u32> = started
            .slides()
            .iter()
            .map(|s| (s.image.name().to_string(), s.duration.as_secs()))
            .collect();

        assert_eq!(started.len(), n);
        assert_eq!(before, after, "pairing broken for n = {n}");
        if n > 0 {
            assert_eq!(started.time_left(), started.slides()[0].duration.as_secs());
        }
    }
}

#[test]
fn tick_decrements_by_exactly_one() {
    let mut order = SlideOrder::Insertion;
    let mut state = SlideshowState::new()
        .apply(Action::Replace(images(3)), &mut order)
        .apply(Action::Start, &mut order);
    for expected in (0..60).rev() {
        let index = state.current_index();
        state = state.apply(Action::Tick, &mut order);
        assert_eq!(state.time_left(), expected);
        assert_eq!(state.current_index(), index);
        assert!(state.timer_active());
    }
    state = state.apply(Action::Tick, &mut order);
    assert_eq!(state.current_index(), 1);
    assert_eq!(state.time_left(), 60);
}

#[test]
fn whole_show_runs_to_completion() {
    let mut order = SlideOrder::Insertion;
    let durations = [30u32, 60, 120];
    let mut state = SlideshowState::new().apply(Action::Replace(images(3)), &mut order);
    for (index, secs) in durations.iter().enumerate() {
        let duration = SlideDuration::from_secs(*secs).unwrap();
        state = state.apply(Action::SetDuration { index, duration }, &mut order);
    }
    state = state.apply(Action::Start, &mut order);

    // each slide spends its duration counting down plus one tick at zero
    let ticks: u32 = durations.iter().map(|d| d + 1).sum();
    let mut seen_indices = vec![state.current_index()];
    for _ in 0..ticks {
        state = state.apply(Action::Tick, &mut order);
        if seen_indices.last() != Some(&state.current_index()) {
            seen_indices.push(state.current_index());
        }
    }
    assert_eq!(seen_indices, vec![0, 1, 2]);
    assert!(state.is_finished());
    assert_eq!(state.time_left(), 0);

    let after = state.clone().apply(Action::Tick, &mut order);
    assert_eq!(after, state);
}
