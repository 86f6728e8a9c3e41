//! Game session
//!
//! Owns the five roll slots, the single in-flight animation and the result
//! panel state. Everything is stepped from one thread through
//! [`GameSession::advance`]; at most one die animates at a time.

use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::animation::{AnimationStep, RollAnimation, RollPlan};
use crate::completion::{Completion, DICE_COUNT};
use crate::config::GameConfig;
use crate::face::{orientation_for, DieValue, Orientation};

/// Why a roll request did nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another die is still animating
    Busy,
    /// The die already has its value for this game
    AlreadyResolved,
    OutOfRange,
}

/// Answer to a roll request. Ignored requests leave the session untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollRequest {
    Started { die: usize },
    Ignored(IgnoreReason),
}

impl RollRequest {
    pub fn is_started(&self) -> bool {
        matches!(self, RollRequest::Started { .. })
    }
}

/// Text hint shown above the dice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hint {
    Start,
    Remaining(usize),
    Done,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Start => write!(f, "Click any die to start!"),
            Hint::Remaining(1) => write!(f, "1 die remaining, keep clicking!"),
            Hint::Remaining(n) => write!(f, "{} dice remaining, keep clicking!", n),
            Hint::Done => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionCheck {
    Remaining(usize),
    Complete(Completion),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResultPanel {
    #[default]
    Hidden,
    /// All dice are in; waiting out the reveal delay
    Pending {
        remaining: Duration,
        completion: Completion,
    },
    Shown(Completion),
}

impl ResultPanel {
    pub fn is_shown(&self) -> bool {
        matches!(self, ResultPanel::Shown(_))
    }
}

/// Something a front-end should draw or announce after a step
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Frame {
        die: usize,
        orientation: Orientation,
    },
    Landed {
        die: usize,
        value: DieValue,
        orientation: Orientation,
    },
    Revealed(Completion),
}

#[derive(Clone, Debug)]
pub struct GameSession {
    results: [Option<DieValue>; DICE_COUNT],
    animation: Option<RollAnimation>,
    panel: ResultPanel,
    roll_duration: Duration,
    reveal_delay: Duration,
    extra_turns: RangeInclusive<u8>,
    idle_pose: Orientation,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            results: [None; DICE_COUNT],
            animation: None,
            panel: ResultPanel::Hidden,
            roll_duration: config.roll_duration(),
            reveal_delay: config.reveal_delay(),
            extra_turns: config.extra_turns(),
            idle_pose: config.idle_pose,
        }
    }

    pub fn results(&self) -> &[Option<DieValue>; DICE_COUNT] {
        &self.results
    }

    pub fn value(&self, die: usize) -> Option<DieValue> {
        self.results.get(die).copied().flatten()
    }

    pub fn is_resolved(&self, die: usize) -> bool {
        self.value(die).is_some()
    }

    /// True while a roll animation is in flight
    pub fn is_busy(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&RollAnimation> {
        self.animation.as_ref()
    }

    pub fn rolling_die(&self) -> Option<usize> {
        self.animation.as_ref().map(RollAnimation::die)
    }

    pub fn remaining(&self) -> usize {
        self.results.iter().filter(|r| r.is_none()).count()
    }

    pub fn panel(&self) -> &ResultPanel {
        &self.panel
    }

    pub fn idle_pose(&self) -> Orientation {
        self.idle_pose
    }

    pub fn hint(&self) -> Hint {
        match self.remaining() {
            0 => Hint::Done,
            DICE_COUNT => Hint::Start,
            n => Hint::Remaining(n),
        }
    }

    /// The finished game, once every slot holds a value
    pub fn completion(&self) -> Option<Completion> {
        Completion::from_results(&self.results)
    }

    pub fn check_completion(&self) -> CompletionCheck {
        match self.completion() {
            Some(completion) => CompletionCheck::Complete(completion),
            None => CompletionCheck::Remaining(self.remaining()),
        }
    }

    /// Where die `die` should currently be drawn
    pub fn orientation_of(&self, die: usize) -> Orientation {
        if let Some(animation) = self.animation.as_ref().filter(|a| a.die() == die) {
            return animation.pose();
        }
        match self.value(die) {
            Some(value) => orientation_for(value),
            None => self.idle_pose,
        }
    }

    fn accepts(&self, die: usize) -> Result<(), IgnoreReason> {
        if die >= DICE_COUNT {
            return Err(IgnoreReason::OutOfRange);
        }
        if self.is_resolved(die) {
            return Err(IgnoreReason::AlreadyResolved);
        }
        if self.is_busy() {
            return Err(IgnoreReason::Busy);
        }
        Ok(())
    }

    /// Start rolling `die` with freshly sampled randomness.
    ///
    /// Requests for a resolved die or while another roll is running are
    /// ignored; nothing is queued and the RNG is not consumed.
    pub fn roll<R: Rng + ?Sized>(&mut self, die: usize, rng: &mut R) -> RollRequest {
        if let Err(reason) = self.accepts(die) {
            return RollRequest::Ignored(reason);
        }
        let plan = RollPlan::sample(rng, self.extra_turns.clone());
        self.roll_with(die, plan)
    }

    /// Start rolling `die` with a predetermined plan.
    pub fn roll_with(&mut self, die: usize, plan: RollPlan) -> RollRequest {
        if let Err(reason) = self.accepts(die) {
            log::debug!("Ignoring roll of die {}: {:?}", die, reason);
            return RollRequest::Ignored(reason);
        }

        log::debug!(
            "Rolling die {} toward {} ({} + {} turns)",
            die,
            plan.value,
            plan.spin_x.turns,
            plan.spin_y.turns
        );
        self.animation = Some(RollAnimation::new(die, plan, self.roll_duration));
        RollRequest::Started { die }
    }

    /// Step the running animation and the reveal timer by `dt`.
    pub fn advance(&mut self, dt: Duration) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let mut just_completed = false;

        if let Some(animation) = self.animation.as_mut() {
            let die = animation.die();
            match animation.advance(dt) {
                AnimationStep::Spinning(orientation) => {
                    events.push(SessionEvent::Frame { die, orientation });
                }
                AnimationStep::Landed(orientation) => {
                    let value = animation.value();
                    self.animation = None;
                    self.results[die] = Some(value);
                    log::info!("Die {} landed on {}", die, value);
                    events.push(SessionEvent::Landed {
                        die,
                        value,
                        orientation,
                    });

                    if let CompletionCheck::Complete(completion) = self.check_completion() {
                        log::info!("All dice rolled, total {}", completion.formatted_total());
                        self.panel = ResultPanel::Pending {
                            remaining: self.reveal_delay,
                            completion,
                        };
                        just_completed = true;
                    }
                }
            }
        }

        let panel_dt = if just_completed { Duration::ZERO } else { dt };
        self.tick_panel(panel_dt, &mut events);
        events
    }

    fn tick_panel(&mut self, dt: Duration, events: &mut Vec<SessionEvent>) {
        let ResultPanel::Pending {
            remaining,
            completion,
        } = &mut self.panel
        else {
            return;
        };

        *remaining = remaining.saturating_sub(dt);
        if remaining.is_zero() {
            let completion = completion.clone();
            events.push(SessionEvent::Revealed(completion.clone()));
            self.panel = ResultPanel::Shown(completion);
        }
    }

    /// Back to a fresh game. A roll in flight is abandoned, not finished.
    pub fn reset(&mut self) {
        if let Some(die) = self.rolling_die() {
            log::debug!("Reset abandons roll of die {}", die);
        }
        self.results = [None; DICE_COUNT];
        self.animation = None;
        self.panel = ResultPanel::Hidden;
    }
}
