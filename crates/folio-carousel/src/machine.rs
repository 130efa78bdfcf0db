#![forbid(unsafe_code)]

//! Interaction state machine.
//!
//! The carousel is always in exactly one [`Phase`]. Every input is a
//! [`Trigger`], and [`transition`] maps `(phase, trigger)` to the next phase
//! plus what happens to each of the two timer roles. The controller applies
//! the timer operations in the order listed; arming a role always replaces
//! the pending deadline of that role.
//!
//! | From | Trigger | To | Autoplay | Resume |
//! |------|---------|----|----------|--------|
//! | AutoAdvancing | PointerDown | UserDragging | cancel | cancel |
//! | AutoAdvancing | Wheel, DotSelected | PausedAfterInteraction | cancel | arm |
//! | UserDragging | PointerDown | UserDragging | keep | cancel |
//! | UserDragging | PointerUp | PausedAfterInteraction | keep | arm |
//! | PausedAfterInteraction | PointerDown | UserDragging | keep | cancel |
//! | PausedAfterInteraction | Wheel, DotSelected | PausedAfterInteraction | keep | arm |
//! | PausedAfterInteraction | ResumeElapsed | AutoAdvancing | arm | keep |
//!
//! Every other pair leaves the phase and both timers alone. Wheel input
//! while dragging is applied to the offset but never ends the drag.

/// Which input source currently owns the scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Autoplay advances one card per interval.
    #[default]
    AutoAdvancing,
    /// A pointer drag is in progress.
    UserDragging,
    /// The user interacted recently; waiting for the quiet interval.
    PausedAfterInteraction,
}

impl Phase {
    /// Short label for logs and status lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Phase::AutoAdvancing => "auto",
            Phase::UserDragging => "dragging",
            Phase::PausedAfterInteraction => "paused",
        }
    }
}

/// Inputs that can move the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Pointer pressed on the strip.
    PointerDown,
    /// Pointer released or left the strip.
    PointerUp,
    /// Wheel input over the strip.
    Wheel,
    /// Explicit index request (progress dot, keyboard).
    DotSelected,
    /// The resume timer fired.
    ResumeElapsed,
}

/// What to do with one timer role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerOp {
    /// Leave the role as it is.
    Keep,
    /// Clear any pending deadline.
    Cancel,
    /// Clear any pending deadline and schedule a fresh one from now.
    Arm,
}

/// Result of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Phase after the trigger.
    pub to: Phase,
    /// Operation on the autoplay timer.
    pub autoplay: TimerOp,
    /// Operation on the resume timer.
    pub resume: TimerOp,
}

impl Transition {
    const fn stay(phase: Phase) -> Self {
        Self {
            to: phase,
            autoplay: TimerOp::Keep,
            resume: TimerOp::Keep,
        }
    }

    const fn new(to: Phase, autoplay: TimerOp, resume: TimerOp) -> Self {
        Self {
            to,
            autoplay,
            resume,
        }
    }

    /// Whether the transition changes anything.
    #[must_use]
    pub fn is_noop(&self, from: Phase) -> bool {
        self.to == from && self.autoplay == TimerOp::Keep && self.resume == TimerOp::Keep
    }
}

/// The transition table.
#[must_use]
pub const fn transition(from: Phase, trigger: Trigger) -> Transition {
    use Phase::*;
    use TimerOp::*;
    use Trigger::*;

    match (from, trigger) {
        (AutoAdvancing, PointerDown) => Transition::new(UserDragging, Cancel, Cancel),
        (AutoAdvancing, Wheel | DotSelected) => {
            Transition::new(PausedAfterInteraction, Cancel, Arm)
        }
        (UserDragging, PointerDown) => Transition::new(UserDragging, Keep, Cancel),
        (UserDragging, PointerUp) => Transition::new(PausedAfterInteraction, Keep, Arm),
        (PausedAfterInteraction, PointerDown) => Transition::new(UserDragging, Keep, Cancel),
        (PausedAfterInteraction, Wheel | DotSelected) => {
            Transition::new(PausedAfterInteraction, Keep, Arm)
        }
        (PausedAfterInteraction, ResumeElapsed) => Transition::new(AutoAdvancing, Arm, Keep),
        (phase, _) => Transition::stay(phase),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASES: [Phase; 3] = [
        Phase::AutoAdvancing,
        Phase::UserDragging,
        Phase::PausedAfterInteraction,
    ];
    const TRIGGERS: [Trigger; 5] = [
        Trigger::PointerDown,
        Trigger::PointerUp,
        Trigger::Wheel,
        Trigger::DotSelected,
        Trigger::ResumeElapsed,
    ];

    #[test]
    fn initial_phase_is_auto() {
        assert_eq!(Phase::default(), Phase::AutoAdvancing);
    }

    #[test]
    fn drag_cycle() {
        let t = transition(Phase::AutoAdvancing, Trigger::PointerDown);
        assert_eq!(t.to, Phase::UserDragging);
        let t = transition(t.to, Trigger::PointerUp);
        assert_eq!(t.to, Phase::PausedAfterInteraction);
        assert_eq!(t.resume, TimerOp::Arm);
        let t = transition(t.to, Trigger::ResumeElapsed);
        assert_eq!(t.to, Phase::AutoAdvancing);
        assert_eq!(t.autoplay, TimerOp::Arm);
    }

    #[test]
    fn wheel_never_enters_dragging() {
        for phase in [Phase::AutoAdvancing, Phase::PausedAfterInteraction] {
            assert_eq!(
                transition(phase, Trigger::Wheel).to,
                Phase::PausedAfterInteraction
            );
        }
        assert!(
            transition(Phase::UserDragging, Trigger::Wheel).is_noop(Phase::UserDragging)
        );
    }

    #[test]
    fn autoplay_is_only_armed_on_resume() {
        for phase in PHASES {
            for trigger in TRIGGERS {
                let t = transition(phase, trigger);
                if t.autoplay == TimerOp::Arm {
                    assert_eq!(
                        (phase, trigger),
                        (Phase::PausedAfterInteraction, Trigger::ResumeElapsed)
                    );
                    assert_eq!(t.to, Phase::AutoAdvancing);
                }
            }
        }
    }

    #[test]
    fn leaving_auto_always_cancels_autoplay() {
        for trigger in TRIGGERS {
            let t = transition(Phase::AutoAdvancing, trigger);
            if t.to != Phase::AutoAdvancing {
                assert_eq!(t.autoplay, TimerOp::Cancel, "{trigger:?}");
            }
        }
    }

    #[test]
    fn dragging_never_holds_resume_timer() {
        for phase in PHASES {
            for trigger in TRIGGERS {
                let t = transition(phase, trigger);
                if t.to == Phase::UserDragging && phase != Phase::UserDragging {
                    assert_eq!(t.resume, TimerOp::Cancel);
                }
            }
        }
    }

    #[test]
    fn stale_resume_is_ignored() {
        for phase in [Phase::AutoAdvancing, Phase::UserDragging] {
            assert!(transition(phase, Trigger::ResumeElapsed).is_noop(phase));
        }
    }
}
