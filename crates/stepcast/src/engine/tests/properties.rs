use proptest::prelude::*;

use super::*;
use crate::cursor::CursorLocator;
use crate::model::{Action, Trigger};
use crate::timeline::Timeline;

type Sketch = (u8, bool, f64, f64);

fn arb_slide() -> impl Strategy<Value = Vec<Sketch>> {
    prop::collection::vec((0u8..3, any::<bool>(), 0.0f64..=1.0, 0.0f64..=1.0), 0..5)
}

/// Random well-formed deck: the first action is always a click, targets are
/// either the cursor or the slide's own object.
fn arb_deck() -> impl Strategy<Value = Presentation> {
    prop::collection::vec(arb_slide(), 1..6).prop_map(|sketch| {
        let mut first = true;
        let mut slides: Vec<Vec<Action>> = sketch
            .into_iter()
            .enumerate()
            .map(|(i, actions)| {
                actions
                    .into_iter()
                    .map(|(kind, on_cursor, abs, ord)| {
                        let own = format!("s{i}-o0");
                        let target = if on_cursor { CURSOR } else { own.as_str() };
                        let action = match kind {
                            _ if first => click(target, abs, ord),
                            0 => click(target, abs, ord),
                            1 => with_prev(target, abs, ord),
                            _ => after_prev(target, abs, ord),
                        };
                        first = false;
                        action
                    })
                    .collect()
            })
            .collect();
        if first {
            slides[0].push(click(CURSOR, 0.5, 0.5));
        }
        deck(slides)
    })
}

/// Last cursor destination strictly before `at`, or the first action's.
fn naive_locate(presentation: &Presentation, timeline: &Timeline, at: Position) -> Point {
    let limit = timeline.flat(at);
    timeline
        .iter()
        .take(limit)
        .filter_map(|p| presentation.action(p))
        .filter(|a| a.target == presentation.cursor_id())
        .last()
        .or_else(|| timeline.action(presentation, 0))
        .map(|a| a.destination)
        .unwrap()
}

fn play_through(engine: &mut Engine<RecordingHost>) -> usize {
    let mut played = 0;
    loop {
        match engine.advance().unwrap() {
            Navigation::Played(_) => {
                played += 1;
                engine.settle().unwrap();
            }
            Navigation::Finished => return played,
            other => panic!("unexpected {other:?} while playing through"),
        }
    }
}

proptest! {
    #[test]
    fn every_click_plays_exactly_once(pres in arb_deck()) {
        let clicks = pres.onclick_count();
        let total = pres.action_count();
        let mut engine = started(pres);

        prop_assert_eq!(play_through(&mut engine), clicks);
        prop_assert_eq!(animations(&events(&mut engine)), total);
        prop_assert_eq!(engine.pending(), 0);
        prop_assert_eq!(engine.advance().unwrap(), Navigation::Finished);
    }

    #[test]
    fn locate_matches_backward_scan(pres in arb_deck()) {
        let timeline = Timeline::new(&pres);
        let locator = CursorLocator::new(&pres, &timeline);
        for (slide, content) in pres.slides().iter().enumerate() {
            for action in 0..=content.actions.len() {
                let at = Position::new(slide, action);
                let located = locator.locate(at).unwrap();
                prop_assert_eq!(located, naive_locate(&pres, &timeline, at));
                prop_assert_eq!(located, locator.locate(at).unwrap());
            }
        }
    }

    #[test]
    fn retreating_from_the_end_visits_every_click(pres in arb_deck()) {
        let clicks = pres.onclick_count();
        let bootstrap = pres.slides()[0].actions[0].destination;
        let mut engine = started(pres);
        play_through(&mut engine);

        let mut rewound = Vec::new();
        loop {
            match engine.retreat().unwrap() {
                Navigation::Rewound(step) => {
                    let action = engine.presentation().action(step).unwrap();
                    prop_assert_eq!(action.trigger, Trigger::OnClick);
                    rewound.push(step);
                }
                Navigation::AtStart => break,
                other => panic!("unexpected {other:?} while rewinding"),
            }
        }
        prop_assert_eq!(rewound.len(), clicks);
        prop_assert!(rewound.windows(2).all(|w| w[0] > w[1]));
        prop_assert_eq!(engine.position().at(), Position::START);
        prop_assert_eq!(engine.visible_slide(), Some(0));
        prop_assert_eq!(engine.host().cursor(), Some(bootstrap));
    }
}
