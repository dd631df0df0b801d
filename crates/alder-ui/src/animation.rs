//! State-transition animations.
//!
//! Controls hand the scheduler fire-and-forget transitions keyed on
//! `{state kind, target value}`; the scheduler owns timing and easing
//! and the host drives it once per frame with [`AnimationSystem::update`].

use alder_core::alloc::HashMap;

use crate::tree::ControlId;

/// Style-state kinds that animate between on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Checked,
    Indeterminate,
    Disabled,
    Hover,
    Active,
}

/// A fire-and-forget state transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub kind: StateKind,
    pub value: bool,
}

impl StateTransition {
    pub fn new(kind: StateKind, value: bool) -> Self {
        Self { kind, value }
    }
}

/// Easing functions for state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to linear progress `t` in [0, 1].
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Running {
    transition: StateTransition,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

/// Scheduler for style-state transitions.
///
/// A new request for the same `(control, kind)` pair replaces the
/// running transition; opposing requests therefore never fight.
pub struct AnimationSystem {
    running: HashMap<(ControlId, StateKind), Running>,
    started: Vec<(ControlId, StateTransition)>,
    default_duration: f32,
}

impl AnimationSystem {
    pub const DEFAULT_DURATION: f32 = 0.15;

    pub fn new() -> Self {
        Self {
            running: HashMap::new(),
            started: Vec::new(),
            default_duration: Self::DEFAULT_DURATION,
        }
    }

    /// Start a transition with the default duration and easing.
    pub fn start(&mut self, id: ControlId, transition: StateTransition) {
        self.start_with(id, transition, self.default_duration, Easing::default());
    }

    /// Start a transition with explicit timing.
    pub fn start_with(
        &mut self,
        id: ControlId,
        transition: StateTransition,
        duration: f32,
        easing: Easing,
    ) {
        tracing::trace!(?id, ?transition, "start state transition");
        self.started.push((id, transition));
        self.running.insert(
            (id, transition.kind),
            Running {
                transition,
                elapsed: 0.0,
                duration: duration.max(f32::EPSILON),
                easing,
            },
        );
    }

    /// Advance all running transitions and retire finished ones.
    pub fn update(&mut self, dt: f32) {
        self.running.retain(|_, running| {
            running.elapsed += dt;
            running.elapsed < running.duration
        });
    }

    /// Eased progress of a running transition, None when settled.
    pub fn progress(&self, id: ControlId, kind: StateKind) -> Option<f32> {
        self.running.get(&(id, kind)).map(|running| {
            let t = running.easing.apply(running.elapsed / running.duration);
            if running.transition.value { t } else { 1.0 - t }
        })
    }

    /// Whether any transition is running for the control.
    pub fn is_animating(&self, id: ControlId) -> bool {
        self.running.keys().any(|(running_id, _)| *running_id == id)
    }

    /// Drop every transition owned by the control.
    pub fn stop_all(&mut self, id: ControlId) {
        self.running.retain(|(running_id, _), _| *running_id != id);
    }

    /// Drain the log of started transitions.
    ///
    /// Lets hosts (and tests) observe exactly which transitions were
    /// requested since the last drain, independent of timing.
    pub fn drain_started(&mut self) -> Vec<(ControlId, StateTransition)> {
        std::mem::take(&mut self.started)
    }
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}
