use super::*;

#[test]
fn after_previous_runs_sequentially() {
    let pres = deck(vec![vec![
        click(CURSOR, 0.1, 0.1),
        after_prev(CURSOR, 0.2, 0.2),
        after_prev(CURSOR, 0.3, 0.3),
        click(CURSOR, 0.4, 0.4),
    ]]);
    let mut engine = started(pres);
    engine.advance().unwrap();
    assert_eq!(engine.pending(), 1);

    let first = engine.host_mut().take_outstanding();
    engine.finish(first[0]).unwrap();
    assert_eq!(engine.position().action, 2);
    assert_eq!(engine.pending(), 1);

    let second = engine.host_mut().take_outstanding();
    engine.finish(second[0]).unwrap();
    assert_eq!(engine.position().action, 3);

    // The next click does not fire on its own.
    engine.settle().unwrap();
    assert_eq!(engine.position().action, 3);
    assert_eq!(animations(&events(&mut engine)), 3);
    assert!(!engine.is_busy());
}

#[test]
fn with_previous_crossing_a_slide_starts_immediately() {
    let pres = deck(vec![
        vec![click(CURSOR, 0.1, 0.1)],
        vec![with_prev("s1-o0", 0.5, 0.5)],
    ]);
    let mut engine = started(pres);

    assert_eq!(engine.advance().unwrap(), Navigation::Played(at(0, 0)));
    let calls = events(&mut engine);
    assert_eq!(animations(&calls), 2);
    assert_eq!(visibility(&calls), vec![hide("s0-o0"), show("s1-o0")]);
    assert_eq!(engine.position(), position(1, 1, 0));
}

#[test]
fn long_with_previous_runs_do_not_recurse() {
    let mut actions = vec![click(CURSOR, 0.0, 0.0)];
    actions.extend((0..5_000).map(|i| with_prev(CURSOR, (i % 100) as f64 / 100.0, 0.5)));
    let mut engine = started(deck(vec![actions]));

    engine.advance().unwrap();
    assert_eq!(engine.pending(), 5_001);
    assert_eq!(engine.position().action, 5_001);
    // Only the tail of the run governs chaining.
    assert!(engine.is_busy());
    assert_eq!(engine.settle().unwrap(), 5_001);
    assert!(!engine.is_busy());
}

#[test]
fn long_after_previous_runs_complete() {
    let mut actions = vec![click(CURSOR, 0.0, 0.0)];
    actions.extend((0..2_000).map(|_| after_prev(CURSOR, 0.5, 0.5)));
    let mut engine = started(deck(vec![actions]));

    engine.advance().unwrap();
    assert_eq!(engine.settle().unwrap(), 2_001);
    assert_eq!(engine.position().action, 2_001);
}

#[test]
fn navigation_waits_for_governing_completion() {
    let pres = deck(vec![vec![click(CURSOR, 0.1, 0.1), click(CURSOR, 0.2, 0.2)]]);
    let mut engine = started(pres);
    engine.advance().unwrap();

    assert!(engine.is_busy());
    assert_eq!(engine.advance().unwrap(), Navigation::Busy);
    assert_eq!(engine.retreat().unwrap(), Navigation::Busy);
    assert_eq!(engine.position(), position(0, 1, 0));

    engine.settle().unwrap();
    assert_eq!(engine.advance().unwrap(), Navigation::Played(at(0, 1)));
}

#[test]
fn completion_of_a_forward_chained_action_does_not_block() {
    let pres = deck(vec![vec![
        click(CURSOR, 0.1, 0.1),
        with_prev("s0-o0", 0.5, 0.5),
    ]]);
    let mut engine = started(pres);
    engine.advance().unwrap();
    let ids = engine.host_mut().take_outstanding();
    assert_eq!(ids.len(), 2);

    engine.finish(ids[1]).unwrap();
    assert_eq!(engine.pending(), 1);
    assert!(!engine.is_busy());
    assert_eq!(engine.advance().unwrap(), Navigation::Finished);

    engine.finish(ids[0]).unwrap();
    assert_eq!(engine.pending(), 0);
}

#[test]
fn repeated_and_unknown_completions_are_ignored() {
    let pres = deck(vec![vec![click(CURSOR, 0.1, 0.1), after_prev(CURSOR, 0.2, 0.2)]]);
    let mut engine = started(pres);
    engine.advance().unwrap();
    let ids = engine.host_mut().take_outstanding();

    engine.finish(ids[0]).unwrap();
    engine.finish(ids[0]).unwrap();
    engine.finish(AnimationId(42)).unwrap();
    assert_eq!(animations(&events(&mut engine)), 2);
    assert_eq!(engine.position().action, 2);
}
