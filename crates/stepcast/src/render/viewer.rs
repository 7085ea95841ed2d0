//! Animation host backing the desktop viewer.
//!
//! The host keeps per-object visual state (visibility, position, opacity)
//! and a list of running tweens. It is advanced by [`ViewerHost::tick`]
//! once per frame, which returns the animations that finished so the app
//! can report them to the engine.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{trace, warn};

use stepcast::{
    AnimationHost, AnimationId, AnimationRequest, HostError, ObjectKind, Point, Presentation,
};

use super::transition::{Executor, Tween, ease_in_out, lerp_point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectState {
    pub visible: bool,
    /// Top-left corner, as a fraction of the stage.
    pub at: Point,
    pub opacity: f32,
}

pub struct ViewerHost {
    cursor_id: String,
    objects: HashMap<String, ObjectState>,
    tweens: Vec<Tween>,
    next_id: u64,
    default_duration: Duration,
    now: Instant,
}

impl ViewerHost {
    /// Register every object of `presentation`. Slide backgrounds start
    /// hidden, tooltips start transparent, the cursor starts at the origin.
    pub fn new(presentation: &Presentation, default_duration: Duration) -> Self {
        let mut objects = HashMap::new();
        for slide in presentation.slides() {
            for (i, object) in slide.objects.iter().enumerate() {
                let state = ObjectState {
                    visible: i != 0,
                    at: Point::new(0.0, 0.0),
                    opacity: if object.kind == ObjectKind::Tooltip { 0.0 } else { 1.0 },
                };
                objects.insert(object.id.clone(), state);
            }
        }
        objects.insert(
            presentation.cursor_id().to_string(),
            ObjectState {
                visible: true,
                at: Point::new(0.0, 0.0),
                opacity: 1.0,
            },
        );
        Self {
            cursor_id: presentation.cursor_id().to_string(),
            objects,
            tweens: Vec::new(),
            next_id: 0,
            default_duration,
            now: Instant::now(),
        }
    }

    pub fn object(&self, id: &str) -> Option<&ObjectState> {
        self.objects.get(id)
    }

    pub fn cursor(&self) -> ObjectState {
        self.objects
            .get(&self.cursor_id)
            .copied()
            .unwrap_or(ObjectState {
                visible: false,
                at: Point::new(0.0, 0.0),
                opacity: 0.0,
            })
    }

    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// Advance every tween to `now` and return the ids that finished.
    pub fn tick(&mut self, now: Instant) -> Vec<AnimationId> {
        self.now = now;
        let mut finished = Vec::new();
        let mut running = Vec::with_capacity(self.tweens.len());
        for tween in std::mem::take(&mut self.tweens) {
            let progress = tween.progress(now);
            self.apply(&tween, progress);
            if progress >= 1.0 {
                trace!(id = %tween.id, target = %tween.target, "tween finished");
                finished.push(tween.id);
            } else {
                running.push(tween);
            }
        }
        self.tweens = running;
        finished
    }

    /// Jump every running tween to its end.
    pub fn complete_all(&mut self) -> Vec<AnimationId> {
        let tweens = std::mem::take(&mut self.tweens);
        tweens
            .into_iter()
            .map(|tween| {
                self.apply(&tween, 1.0);
                tween.id
            })
            .collect()
    }

    fn apply(&mut self, tween: &Tween, progress: f32) {
        let Some(state) = self.objects.get_mut(&tween.target) else {
            return;
        };
        let eased = ease_in_out(progress);
        match tween.executor {
            Executor::Move if progress >= 1.0 => state.at = tween.to,
            Executor::Move => state.at = lerp_point(tween.from, tween.to, eased),
            Executor::Appear => {
                state.at = tween.to;
                state.opacity = eased;
            }
            Executor::Disappear => state.opacity = tween.from_opacity * (1.0 - eased),
        }
    }
}

impl AnimationHost for ViewerHost {
    fn show_object(&mut self, id: &str) {
        match self.objects.get_mut(id) {
            Some(state) => state.visible = true,
            None => warn!(id, "show for unknown object"),
        }
    }

    fn hide_object(&mut self, id: &str) {
        match self.objects.get_mut(id) {
            Some(state) => state.visible = false,
            None => warn!(id, "hide for unknown object"),
        }
    }

    fn place_cursor(&mut self, cursor: &str, at: Point) {
        if let Some(state) = self.objects.get_mut(cursor) {
            state.at = at;
        }
    }

    fn supports_executor(&self, executor: &str) -> bool {
        Executor::from_name(executor).is_some()
    }

    fn run_animation(&mut self, request: &AnimationRequest<'_>) -> Result<AnimationId, HostError> {
        let executor = Executor::from_name(request.executor)
            .ok_or_else(|| HostError::UnknownExecutor(request.executor.to_string()))?;
        let state = self
            .objects
            .get(request.target)
            .ok_or_else(|| HostError::UnknownTarget(request.target.to_string()))?;

        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.tweens.push(Tween {
            id,
            target: request.target.to_string(),
            executor,
            from: state.at,
            to: request.destination,
            from_opacity: state.opacity,
            start: self.now,
            duration: request.duration.unwrap_or(self.default_duration),
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "data": [
            {
                "object": [{ "id": "bg" }, { "id": "tip", "type": "tooltip" }],
                "action": [
                    { "trigger": "onClick", "target": "mouse-cursor", "execute": "move", "finalAbs": 1.0, "finalOrd": 0.5 }
                ]
            }
        ]
    }"#;

    fn host() -> (ViewerHost, Instant) {
        let pres = Presentation::from_json(DOC).unwrap();
        let mut host = ViewerHost::new(&pres, Duration::from_millis(100));
        let now = Instant::now();
        host.tick(now);
        (host, now)
    }

    fn request<'a>(target: &'a str, executor: &'a str, abs: f64, ord: f64) -> AnimationRequest<'a> {
        AnimationRequest {
            target,
            executor,
            destination: Point::new(abs, ord),
            duration: None,
        }
    }

    #[test]
    fn initial_visibility() {
        let (host, _) = host();
        assert!(!host.object("bg").unwrap().visible);
        assert_eq!(host.object("tip").unwrap().opacity, 0.0);
        assert!(host.cursor().visible);
    }

    #[test]
    fn move_interpolates_then_finishes() {
        let (mut host, start) = host();
        let id = host
            .run_animation(&request("mouse-cursor", "move", 1.0, 0.5))
            .unwrap();
        assert!(host.is_animating());

        assert!(host.tick(start + Duration::from_millis(50)).is_empty());
        let mid = host.cursor().at;
        assert!(mid.abs > 0.0 && mid.abs < 1.0);

        assert_eq!(host.tick(start + Duration::from_millis(100)), vec![id]);
        assert_eq!(host.cursor().at, Point::new(1.0, 0.5));
        assert!(!host.is_animating());
    }

    #[test]
    fn appear_and_disappear_drive_opacity() {
        let (mut host, start) = host();
        host.run_animation(&request("tip", "appear", 0.3, 0.3)).unwrap();
        host.tick(start + Duration::from_secs(1));
        let tip = *host.object("tip").unwrap();
        assert_eq!(tip.opacity, 1.0);
        assert_eq!(tip.at, Point::new(0.3, 0.3));

        host.run_animation(&request("tip", "disappear", 0.0, 0.0)).unwrap();
        host.complete_all();
        let tip = *host.object("tip").unwrap();
        assert_eq!(tip.opacity, 0.0);
        assert_eq!(tip.at, Point::new(0.3, 0.3));
    }

    #[test]
    fn dispatch_rejects_unknown_names() {
        let (mut host, _) = host();
        assert_eq!(
            host.run_animation(&request("ghost", "move", 0.0, 0.0)),
            Err(HostError::UnknownTarget("ghost".to_string()))
        );
        assert_eq!(
            host.run_animation(&request("tip", "spin", 0.0, 0.0)),
            Err(HostError::UnknownExecutor("spin".to_string()))
        );
        assert!(!host.supports_executor("spin"));
        assert!(host.supports_executor("disappear"));
    }

    #[test]
    fn drives_an_engine_to_completion() {
        let pres = Presentation::from_json(DOC).unwrap();
        let host = ViewerHost::new(&pres, Duration::from_millis(100));
        let mut engine = stepcast::Engine::start(pres, host).unwrap();
        assert!(engine.host().object("bg").unwrap().visible);

        engine.advance().unwrap();
        assert!(engine.is_busy());
        for id in engine.host_mut().complete_all() {
            engine.finish(id).unwrap();
        }
        assert!(!engine.is_busy());
        assert_eq!(engine.host().cursor().at, Point::new(1.0, 0.5));
    }
}
