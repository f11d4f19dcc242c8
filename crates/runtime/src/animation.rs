use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Interpolation {
    Linear,
    /// Cubic ease-in/ease-out with zero velocity at both keys.
    #[default]
    Smooth,
}

impl Interpolation {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Interpolation::Linear => t,
            Interpolation::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// A single-pass, two-key position track.
///
/// The track clamps at the end key once finished and never loops.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: Vec3,
    to: Vec3,
    duration_s: f64,
    elapsed_s: f64,
    interpolation: Interpolation,
    last_emitted: Option<Vec3>,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration_s: f64) -> Self {
        Self {
            from,
            to,
            duration_s: if duration_s.is_finite() {
                duration_s.max(0.0)
            } else {
                0.0
            },
            elapsed_s: 0.0,
            interpolation: Interpolation::default(),
            last_emitted: None,
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn progress(&self) -> f64 {
        if self.duration_s <= 0.0 {
            1.0
        } else {
            (self.elapsed_s / self.duration_s).clamp(0.0, 1.0)
        }
    }

    pub fn value(&self) -> Vec3 {
        self.from
            .lerp(self.to, self.interpolation.apply(self.progress()))
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Step the track by `dt_s` and invoke `on_update` if the value moved.
    ///
    /// Returns `true` once the single pass has completed.
    pub fn advance<F>(&mut self, dt_s: f64, mut on_update: F) -> bool
    where
        F: FnMut(Vec3),
    {
        if dt_s.is_finite() && dt_s > 0.0 {
            self.elapsed_s = (self.elapsed_s + dt_s).min(self.duration_s);
        }
        let v = self.value();
        if self.last_emitted != Some(v) {
            self.last_emitted = Some(v);
            on_update(v);
        }
        self.is_finished()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveTrack {
    Position,
    LookAt,
}

/// Camera move: eye position and look-at point animated over the same duration.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveAnimation {
    position: Tween,
    look_at: Tween,
}

impl MoveAnimation {
    pub fn new(
        from_position: Vec3,
        to_position: Vec3,
        from_look_at: Vec3,
        to_look_at: Vec3,
        duration_s: f64,
    ) -> Self {
        Self {
            position: Tween::new(from_position, to_position, duration_s),
            look_at: Tween::new(from_look_at, to_look_at, duration_s),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position.value()
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at.value()
    }

    /// Advance both tracks; `observer` is called for every track whose value
    /// changed, position first. Returns `true` when the move has completed.
    pub fn advance<F>(&mut self, dt_s: f64, mut observer: F) -> bool
    where
        F: FnMut(MoveTrack, Vec3),
    {
        let position_done = self
            .position
            .advance(dt_s, |v| observer(MoveTrack::Position, v));
        let look_at_done = self
            .look_at
            .advance(dt_s, |v| observer(MoveTrack::LookAt, v));
        position_done && look_at_done
    }

    pub fn is_finished(&self) -> bool {
        self.position.is_finished() && self.look_at.is_finished()
    }
}
