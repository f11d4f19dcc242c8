use foundation::math::Vec2;

/// Signals raised while disambiguating a tap from a drag.
///
/// Every variant carries the normalized pointer-down coordinate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureEvent {
    HoverStart(Vec2),
    HoverCancel(Vec2),
    Click(Vec2),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Press captured; the controls have not started a gesture yet.
    PointerDown,
    /// `tap_pending` stays set until the first camera change.
    Dragging { tap_pending: bool },
    /// The last gesture moved the camera. Behaves like `Idle`.
    Settled,
}

/// Maps a pointer position in element pixels to `[-1, 1]` on both axes, +Y up.
///
/// An element smaller than one pixel maps everything to the origin.
pub fn normalize_pointer(x_px: f64, y_px: f64, width: f64, height: f64) -> Vec2 {
    if width >= 1.0 && height >= 1.0 {
        Vec2::new((x_px / width) * 2.0 - 1.0, -(y_px / height) * 2.0 + 1.0)
    } else {
        Vec2::new(0.0, 0.0)
    }
}

/// Tap-versus-drag state machine fed by the orbit controls' lifecycle.
///
/// `pointer_down` must be called before the controls see the same press so the
/// recorded point is the true press position.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    state: GestureState,
    latest_down: Vec2,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn latest_pointer_down(&self) -> Vec2 {
        self.latest_down
    }

    /// The controls have started a gesture that has not ended yet. A bare
    /// press does not count: the controls may never start on it.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn pointer_down(&mut self, x_px: f64, y_px: f64, width: f64, height: f64) {
        self.latest_down = normalize_pointer(x_px, y_px, width, height);
        self.state = GestureState::PointerDown;
    }

    /// Controls started a gesture.
    pub fn start(&mut self) -> Vec<GestureEvent> {
        self.state = GestureState::Dragging { tap_pending: true };
        vec![GestureEvent::HoverStart(self.latest_down)]
    }

    /// Controls moved the camera.
    pub fn change(&mut self) -> Vec<GestureEvent> {
        match self.state {
            GestureState::Dragging { tap_pending: true } => {
                self.state = GestureState::Dragging { tap_pending: false };
                vec![GestureEvent::HoverCancel(self.latest_down)]
            }
            _ => Vec::new(),
        }
    }

    /// Controls ended the gesture.
    pub fn end(&mut self) -> Vec<GestureEvent> {
        match self.state {
            GestureState::Dragging { tap_pending: true } => {
                self.state = GestureState::Idle;
                vec![
                    GestureEvent::HoverCancel(self.latest_down),
                    GestureEvent::Click(self.latest_down),
                ]
            }
            GestureState::Dragging { tap_pending: false } => {
                self.state = GestureState::Settled;
                Vec::new()
            }
            _ => {
                self.state = GestureState::Idle;
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GestureEvent, GestureState, GestureTracker, normalize_pointer};
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_to_ndc() {
        assert_eq!(normalize_pointer(0.0, 0.0, 200.0, 100.0), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_pointer(200.0, 100.0, 200.0, 100.0), Vec2::new(1.0, -1.0));
        assert_eq!(normalize_pointer(100.0, 50.0, 200.0, 100.0), Vec2::new(0.0, 0.0));
        assert_eq!(normalize_pointer(5.0, 5.0, 0.5, 100.0), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn tap_emits_hover_start_cancel_and_click() {
        let mut g = GestureTracker::new();
        g.pointer_down(150.0, 25.0, 200.0, 100.0);
        assert_eq!(g.state(), GestureState::PointerDown);
        let p = Vec2::new(0.5, 0.5);

        let mut events = g.start();
        events.extend(g.end());
        assert_eq!(
            events,
            vec![
                GestureEvent::HoverStart(p),
                GestureEvent::HoverCancel(p),
                GestureEvent::Click(p),
            ]
        );
        assert_eq!(g.state(), GestureState::Idle);
    }

    #[test]
    fn drag_cancels_hover_once_and_never_clicks() {
        let mut g = GestureTracker::new();
        g.pointer_down(0.0, 0.0, 100.0, 100.0);
        let p = Vec2::new(-1.0, 1.0);

        let mut events = g.start();
        for _ in 0..5 {
            events.extend(g.change());
        }
        events.extend(g.end());
        assert_eq!(
            events,
            vec![GestureEvent::HoverStart(p), GestureEvent::HoverCancel(p)]
        );
        assert_eq!(g.state(), GestureState::Settled);
        assert!(!g.is_dragging());
    }

    #[test]
    fn changes_outside_a_gesture_are_silent() {
        let mut g = GestureTracker::new();
        assert!(g.change().is_empty());
        assert!(g.end().is_empty());
        assert_eq!(g.state(), GestureState::Idle);
    }

    #[test]
    fn settled_accepts_the_next_press() {
        let mut g = GestureTracker::new();
        g.pointer_down(0.0, 0.0, 10.0, 10.0);
        g.start();
        g.change();
        g.end();
        g.pointer_down(10.0, 10.0, 10.0, 10.0);
        assert_eq!(g.state(), GestureState::PointerDown);
        assert!(!g.is_dragging());
        let events = g.start();
        assert_eq!(events, vec![GestureEvent::HoverStart(Vec2::new(1.0, -1.0))]);
    }
}
