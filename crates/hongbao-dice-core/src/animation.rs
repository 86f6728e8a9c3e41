//! Roll animator
//!
//! Drives one die from a random spin to its resolved face. The animation is a
//! plain state machine stepped with [`RollAnimation::advance`]; callers decide
//! how often to step it and what to do with the orientation it produces.

use rand::Rng;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::face::{orientation_for, DieValue, Orientation};

/// Default wall-clock length of one roll
pub const ROLL_DURATION: Duration = Duration::from_millis(1200);

/// Default range of extra full turns per axis
pub const EXTRA_TURNS: RangeInclusive<u8> = 3..=4;

/// Ease-out cubic: fast start, decelerating to rest at `p = 1`
pub fn ease_out_cubic(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinDirection {
    Forward,
    Backward,
}

impl SpinDirection {
    pub fn sign(self) -> f32 {
        match self {
            SpinDirection::Forward => 1.0,
            SpinDirection::Backward => -1.0,
        }
    }

    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            SpinDirection::Forward
        } else {
            SpinDirection::Backward
        }
    }
}

/// Extra full turns applied to one axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spin {
    pub turns: u8,
    pub direction: SpinDirection,
}

impl Spin {
    pub fn new(turns: u8, direction: SpinDirection) -> Self {
        Self { turns, direction }
    }

    pub fn degrees(self) -> f32 {
        f32::from(self.turns) * 360.0 * self.direction.sign()
    }

    pub fn sample<R: Rng + ?Sized>(rng: &mut R, turns: RangeInclusive<u8>) -> Self {
        Self {
            turns: rng.gen_range(turns),
            direction: SpinDirection::sample(rng),
        }
    }
}

/// Every random choice a roll makes, decided up front
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollPlan {
    pub value: DieValue,
    pub spin_x: Spin,
    pub spin_y: Spin,
}

impl RollPlan {
    pub fn new(value: DieValue, spin_x: Spin, spin_y: Spin) -> Self {
        Self {
            value,
            spin_x,
            spin_y,
        }
    }

    pub fn sample<R: Rng + ?Sized>(rng: &mut R, turns: RangeInclusive<u8>) -> Self {
        let value = DieValue::sample(rng);
        let spin_x = Spin::sample(rng, turns.clone());
        let spin_y = Spin::sample(rng, turns);
        Self::new(value, spin_x, spin_y)
    }

    pub fn target(&self) -> Orientation {
        orientation_for(self.value)
    }

    /// Target orientation plus the extra turns on each axis
    pub fn final_rotation(&self) -> Orientation {
        let target = self.target();
        Orientation::new(
            target.x + self.spin_x.degrees(),
            target.y + self.spin_y.degrees(),
        )
    }
}

/// Result of stepping an animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationStep {
    /// Still turning; the die should be drawn at this orientation
    Spinning(Orientation),
    /// Finished; the die rests at its target orientation
    Landed(Orientation),
}

impl AnimationStep {
    pub fn orientation(&self) -> Orientation {
        match self {
            AnimationStep::Spinning(o) | AnimationStep::Landed(o) => *o,
        }
    }
}

/// A single in-flight roll. Discarded once it lands.
#[derive(Clone, Debug, PartialEq)]
pub struct RollAnimation {
    die: usize,
    plan: RollPlan,
    elapsed: Duration,
    duration: Duration,
}

impl RollAnimation {
    pub fn new(die: usize, plan: RollPlan, duration: Duration) -> Self {
        Self {
            die,
            plan,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn die(&self) -> usize {
        self.die
    }

    pub fn plan(&self) -> &RollPlan {
        &self.plan
    }

    pub fn value(&self) -> DieValue {
        self.plan.value
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Orientation at the current elapsed time, before the landing snap
    pub fn pose(&self) -> Orientation {
        self.plan.final_rotation().scaled(ease_out_cubic(self.progress()))
    }

    /// Move the clock forward by `dt`.
    ///
    /// Once the elapsed time reaches the duration the step is `Landed` with the
    /// plain target orientation, not the over-rotated final value.
    pub fn advance(&mut self, dt: Duration) -> AnimationStep {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        if self.is_finished() {
            AnimationStep::Landed(self.plan.target())
        } else {
            AnimationStep::Spinning(self.pose())
        }
    }
}
