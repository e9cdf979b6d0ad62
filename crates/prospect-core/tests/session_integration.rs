//! Integration tests for full session scenarios on a virtual clock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use prospect_core::{
    CategorySelection, Event, Find, ManualClock, NotifyError, Notifier, SessionEngine,
    SessionRng, SessionState, SessionStats, DEFAULT_CATEGORIES, LOG_CAPACITY, TICK_INTERVAL,
};
use proptest::prelude::*;

fn engine_with<M>(seed: u64, selection: CategorySelection, model: M) -> (SessionEngine, ManualClock)
where
    M: Fn(u64, u64) -> f64 + Send + 'static,
{
    let clock = ManualClock::default();
    let engine = SessionEngine::new(selection, SessionRng::seeded(seed))
        .with_clock(Arc::new(clock.clone()))
        .with_model(model);
    (engine, clock)
}

fn run_ticks(engine: &mut SessionEngine, clock: &ManualClock, n: usize) {
    for _ in 0..n {
        clock.advance(TICK_INTERVAL);
        engine.tick();
    }
}

fn assert_total_consistent(state: &SessionState) {
    assert_eq!(state.total_value, state.recomputed_total());
}

#[test]
fn test_single_pinned_find_at_tick_fifty() {
    let (mut engine, clock) = engine_with(17, CategorySelection::default(), |_, attempt| {
        if attempt == 50 {
            1.0
        } else {
            0.0
        }
    });
    engine.start();

    run_ticks(&mut engine, &clock, 49);
    assert!(engine.state().finds.is_empty());

    clock.advance(TICK_INTERVAL);
    let event = engine.tick();
    let find = match event {
        Some(Event::FindRecorded { find, .. }) => find,
        other => panic!("expected find on tick 50, got {other:?}"),
    };
    let newest = engine.state().log.back().unwrap();
    assert!(newest.success);
    assert_eq!(newest.id, find.id);
    assert_eq!(newest.amount_label.as_deref(), Some(find.amount_label().as_str()));

    // Ticks 51..=99 append at most 49 lines, so the success line must survive.
    let mut appended = 0usize;
    for _ in 51..=99 {
        appended += tick_appended(&mut engine, &clock);
    }
    let state = engine.state();
    let pos = state
        .log
        .iter()
        .position(|e| e.id == find.id)
        .expect("success line evicted before tick 100");
    assert_eq!(pos, state.log.len() - 1 - appended);
    assert!(state.log.iter().skip(pos + 1).all(|e| !e.success));

    appended += tick_appended(&mut engine, &clock);
    let state = engine.state();
    assert_eq!(state.attempts_count, 100);
    assert_eq!(state.finds.len(), 1);
    assert_eq!(state.total_value, state.finds[0].value_amount);
    assert!(state.log.len() <= LOG_CAPACITY);

    // A 50th trailing line pushes it out of the 50-entry window.
    let expected = (appended < LOG_CAPACITY).then(|| state.log.len() - 1 - appended);
    assert_eq!(state.log.iter().position(|e| e.id == find.id), expected);
}

/// Advance one tick and report how many log lines it appended.
fn tick_appended(engine: &mut SessionEngine, clock: &ManualClock) -> usize {
    let before = engine.state().log.back().map(|e| e.id);
    clock.advance(TICK_INTERVAL);
    engine.tick();
    usize::from(engine.state().log.back().map(|e| e.id) != before)
}

#[test]
fn test_zero_probability_never_finds() {
    let (mut engine, clock) = engine_with(3, CategorySelection::default(), |_, _| 0.0);
    engine.start();
    run_ticks(&mut engine, &clock, 200);

    let state = engine.state();
    assert_eq!(state.attempts_count, 200);
    assert!(state.finds.is_empty());
    assert_eq!(state.total_value, 0.0);
    assert_eq!(state.log.len(), LOG_CAPACITY);
    assert!(state.log.iter().all(|e| !e.success && e.amount_label.is_none()));
}

#[test]
fn test_miss_lines_are_sampled_not_guaranteed() {
    let (mut engine, clock) = engine_with(21, CategorySelection::default(), |_, _| 0.0);
    engine.start();
    let logged: usize = (0..2_000)
        .map(|_| tick_appended(&mut engine, &clock))
        .sum();
    // ~95% of ticks log a miss.
    assert!(logged > 1_800 && logged < 1_980, "logged {logged}");
}

#[test]
fn test_empty_selection_uses_default_set() {
    let (mut engine, clock) =
        engine_with(5, CategorySelection::resolve::<&str>(&[]), |_, _| 1.0);
    engine.start();
    run_ticks(&mut engine, &clock, 300);

    let state = engine.state();
    assert_eq!(state.finds.len(), 300);
    assert!(state
        .finds
        .iter()
        .all(|f| DEFAULT_CATEGORIES.contains(&f.category)));
    assert_total_consistent(state);
}

#[test]
fn test_finds_unbounded_while_log_capped() {
    let (mut engine, clock) = engine_with(8, CategorySelection::default(), |_, _| 1.0);
    engine.start();
    run_ticks(&mut engine, &clock, 120);

    let state = engine.state();
    assert_eq!(state.finds.len(), 120);
    assert_eq!(state.log.len(), LOG_CAPACITY);
    // The newest log entry is always the latest find's success line.
    assert_eq!(state.log.back().unwrap().id, state.finds.last().unwrap().id);

    let stats = SessionStats::from_state(state);
    let summed: usize = stats.by_category.iter().map(|c| c.finds).sum();
    assert_eq!(summed, 120);
}

#[test]
fn test_pause_reset_lifecycle() {
    let (mut engine, clock) = engine_with(13, CategorySelection::default(), |_, _| 0.5);
    engine.start();
    run_ticks(&mut engine, &clock, 20);
    engine.pause();

    let paused = engine.state().clone();
    run_ticks(&mut engine, &clock, 20);
    assert_eq!(engine.state(), &paused);

    engine.start();
    run_ticks(&mut engine, &clock, 5);
    assert_eq!(engine.state().attempts_count, 25);
    assert_total_consistent(engine.state());

    engine.reset();
    assert_eq!(engine.state(), &SessionState::new());
    assert!(!engine.is_running());
}

#[test]
fn test_elapsed_restarts_after_resume() {
    let (mut engine, clock) = engine_with(1, CategorySelection::default(), |_, _| 0.0);
    engine.start();
    let first = engine.session_clock().started_at();
    run_ticks(&mut engine, &clock, 10);
    engine.pause();
    clock.advance(std::time::Duration::from_secs(60));
    engine.start();
    assert_ne!(engine.session_clock().started_at(), first);
    assert_eq!(engine.session_clock().started_at(), Some(clock_now(&clock)));
}

fn clock_now(clock: &ManualClock) -> chrono::DateTime<chrono::Utc> {
    use prospect_core::Clock;
    clock.now()
}

struct Unavailable(Arc<AtomicUsize>);

impl Notifier for Unavailable {
    fn notify(&self, _find: &Find) -> Result<(), NotifyError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError::Unavailable("no alert surface".into()))
    }
}

#[test]
fn test_failing_notifier_is_isolated() {
    let calls = Arc::new(AtomicUsize::new(0));
    let delivered = Arc::new(AtomicUsize::new(0));
    let (mut engine, clock) = engine_with(4, CategorySelection::default(), |_, _| 1.0);
    engine.add_notifier(Unavailable(calls.clone()));
    let counter = delivered.clone();
    engine.on_find(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    engine.start();
    run_ticks(&mut engine, &clock, 10);

    assert_eq!(calls.load(Ordering::SeqCst), 10);
    assert_eq!(delivered.load(Ordering::SeqCst), 10);
    assert_eq!(engine.state().finds.len(), 10);
    assert_total_consistent(engine.state());
}

#[test]
fn test_same_seed_replays_identically() {
    let run = || {
        let (mut engine, clock) = engine_with(99, CategorySelection::default(), |_, _| 0.1);
        engine.start();
        run_ticks(&mut engine, &clock, 500);
        engine
            .state()
            .finds
            .iter()
            .map(|f| (f.category, f.unit_amount.to_bits(), f.descriptor.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn total_matches_finds_after_every_tick(seed in any::<u64>(), p in 0.0f64..1.0, ticks in 1usize..150) {
        let (mut engine, clock) = engine_with(seed, CategorySelection::default(), move |_, _| p);
        engine.start();
        for i in 0..ticks {
            clock.advance(TICK_INTERVAL);
            engine.tick();
            let state = engine.state();
            prop_assert_eq!(state.total_value, state.recomputed_total());
            prop_assert_eq!(state.attempts_count, i as u64 + 1);
            prop_assert!(state.log.len() <= LOG_CAPACITY);
        }
    }
}
