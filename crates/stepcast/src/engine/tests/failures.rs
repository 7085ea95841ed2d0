use super::*;
use crate::error::PlaybackError;

fn unresolved(slide: usize, action: usize, reason: &str) -> PlaybackError {
    PlaybackError::unresolved(slide, action, reason)
}

#[test]
fn unknown_executor_leaves_position_untouched() {
    let pres = deck(vec![vec![
        click(CURSOR, 0.1, 0.1),
        using(click(CURSOR, 0.2, 0.2), "spin"),
    ]]);
    let mut engine = started(pres);
    engine.advance().unwrap();
    engine.settle().unwrap();
    events(&mut engine);

    let err = engine.advance().unwrap_err();
    assert_eq!(err, unresolved(0, 1, "unknown executor `spin`"));
    assert_eq!(engine.position(), position(0, 1, 0));
    assert!(events(&mut engine).is_empty());
    assert_eq!(engine.pending(), 0);

    // The failure is stable: asking again reports the same error.
    assert_eq!(engine.advance().unwrap_err(), err);
}

#[test]
fn unknown_target_on_next_slide_keeps_current_slide_visible() {
    let pres = deck(vec![
        vec![click(CURSOR, 0.1, 0.1)],
        vec![click("s9-o0", 0.2, 0.2)],
    ]);
    let mut engine = started(pres);
    engine.advance().unwrap();
    engine.settle().unwrap();
    events(&mut engine);

    assert_eq!(
        engine.advance().unwrap_err(),
        unresolved(1, 0, "unknown target `s9-o0`")
    );
    assert_eq!(engine.position(), position(0, 1, 0));
    assert_eq!(engine.visible_slide(), Some(0));
    assert!(events(&mut engine).is_empty());
}

#[test]
fn refused_click_on_next_slide_restores_current_slide() {
    let pres = deck(vec![
        vec![click(CURSOR, 0.1, 0.1)],
        vec![click("s1-o0", 0.2, 0.2)],
    ]);
    let mut engine = started(pres);
    engine.advance().unwrap();
    engine.settle().unwrap();
    events(&mut engine);
    engine.host_mut().refuse_target("s1-o0");

    let before = engine.position();
    assert_eq!(
        engine.advance().unwrap_err(),
        unresolved(1, 0, "host refused dispatch: target `s1-o0` is refused")
    );
    assert_eq!(engine.position(), before);
    assert_eq!(engine.visible_slide(), Some(0));
    assert_eq!(engine.pending(), 0);

    let calls = events(&mut engine);
    assert_eq!(
        visibility(&calls),
        vec![hide("s0-o0"), show("s1-o0"), hide("s1-o0"), show("s0-o0")]
    );
    assert_eq!(calls.last(), Some(&place(0.1, 0.1)));
    assert_eq!(animations(&calls), 0);
}

#[test]
fn refused_chained_action_keeps_earlier_dispatch() {
    let pres = deck(vec![
        vec![click(CURSOR, 0.1, 0.1)],
        vec![with_prev("s1-o0", 0.2, 0.2), click(CURSOR, 0.3, 0.3)],
    ]);
    let mut host = RecordingHost::new();
    host.refuse_target("s1-o0");
    let mut engine = Engine::start(pres, host).unwrap();

    assert!(engine.advance().is_err());
    assert_eq!(engine.position(), position(0, 1, 0));
    assert_eq!(engine.visible_slide(), Some(0));
    assert_eq!(engine.pending(), 1);
    assert!(!engine.is_busy());
}

#[test]
fn host_refusal_is_reported_as_unresolved() {
    let pres = deck(vec![vec![click(CURSOR, 0.1, 0.1)]]);
    let mut host = RecordingHost::new();
    host.refuse_target(CURSOR);
    let mut engine = Engine::start(pres, host).unwrap();

    match engine.advance() {
        Err(PlaybackError::UnresolvedAction { slide, action, reason }) => {
            assert_eq!((slide, action), (0, 0));
            assert!(reason.starts_with("host refused dispatch"));
        }
        other => panic!("expected unresolved action, got {other:?}"),
    }
    assert_eq!(engine.position(), position(0, 0, 0));
    assert_eq!(engine.pending(), 0);
    assert!(!engine.is_busy());
}

#[test]
fn executor_support_is_asked_of_the_host() {
    let pres = deck(vec![vec![using(click(CURSOR, 0.1, 0.1), "appear")]]);
    let mut engine = Engine::start(pres, RecordingHost::with_executors(["move"])).unwrap();
    assert_eq!(
        engine.advance().unwrap_err(),
        unresolved(0, 0, "unknown executor `appear`")
    );
}

#[test]
fn chained_failure_halts_at_last_dispatched_action() {
    let pres = deck(vec![vec![
        click(CURSOR, 0.1, 0.1),
        with_prev("ghost", 0.5, 0.5),
        click(CURSOR, 0.3, 0.3),
    ]]);
    let mut engine = started(pres);

    assert_eq!(
        engine.advance().unwrap_err(),
        unresolved(0, 1, "unknown target `ghost`")
    );
    assert_eq!(engine.position().action, 1);
    assert_eq!(engine.pending(), 1);
    // The click forwarded chaining to the failed action, so nothing blocks.
    assert!(!engine.is_busy());

    assert_eq!(engine.advance().unwrap(), Navigation::Played(at(0, 2)));
}

#[test]
fn failed_after_previous_surfaces_from_finish() {
    let pres = deck(vec![vec![
        click(CURSOR, 0.1, 0.1),
        using(after_prev(CURSOR, 0.2, 0.2), "warp"),
        click(CURSOR, 0.3, 0.3),
    ]]);
    let mut engine = started(pres);
    engine.advance().unwrap();

    assert_eq!(
        engine.settle().unwrap_err(),
        unresolved(0, 1, "unknown executor `warp`")
    );
    assert_eq!(engine.position().action, 1);
    assert!(!engine.is_busy());

    // Advancing skips the unplayed chained action.
    assert_eq!(engine.advance().unwrap(), Navigation::Played(at(0, 2)));
}
