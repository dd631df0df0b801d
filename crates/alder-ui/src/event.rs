//! Event types for the control dispatch chain.

use alder_core::geometry::Point;

use crate::tree::ControlId;

/// Result of a dispatch hook.
///
/// A derived control returns [`EventStatus::Ignored`] for anything it
/// does not fully handle; the dispatch wrapper then runs the base step
/// so lifecycle bookkeeping always happens. Returning
/// [`EventStatus::Accepted`] skips the base step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Accepted,
    Ignored,
}

/// Structural and notification events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// One-time setup after the subtree is fully constructed.
    Initialize,
    /// Teardown is underway; upward notification is already
    /// suppressed when this arrives.
    Destroy,
    /// Activation request forwarded from a label or an accessibility
    /// action.
    AccessAction,
    /// A descendant emitted a command event.
    Command { source: ControlId },
}

/// Pointer event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    /// Pointer entered control bounds.
    Enter,
    /// Pointer left control bounds.
    Leave,
    /// Primary button pressed on the control.
    LButtonDown,
    /// Primary button released on the control.
    LButtonUp,
}

/// Pointer event payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEventArg {
    pub event: MouseEvent,
    pub pos: Point,
}

impl MouseEventArg {
    pub fn new(event: MouseEvent, pos: Point) -> Self {
        Self { event, pos }
    }
}

/// Identifier of an emitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventId {
    /// Semantic state changed (checkbox toggled, etc.)
    Command,
}

/// An event emitted through the notification sink.
///
/// The tree queues these; the host drains them with
/// [`crate::tree::UiTree::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEvent {
    pub source: ControlId,
    pub id: EventId,
}

/// Pointer cursor requested from the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Arrow,
    /// Hyperlink affordance
    Hand,
}
