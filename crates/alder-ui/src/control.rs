//! The base control contract.
//!
//! Behaviors implement [`Control`] and live inside tree nodes. Every
//! hook has a default implementation that reports "not handled"; the
//! dispatch wrapper in the tree always runs the base step after a hook
//! returns [`EventStatus::Ignored`] or [`AttrStatus::Deferred`], so a
//! derived control cannot accidentally skip lifecycle bookkeeping —
//! it can only opt out explicitly by accepting the event.

use std::any::Any;

use alder_core::geometry::Size;
use alder_text::TextShaper;

use crate::attr::AttrKey;
use crate::event::{EventStatus, MouseEventArg, Notice};
use crate::tree::{ControlId, UiTree};

/// Dispatch context handed to control hooks.
///
/// While a hook runs, the control's behavior box is temporarily out of
/// its node, so the hook may freely mutate the rest of the tree
/// (including sibling and part nodes) through `ctx.tree`.
pub struct Ctx<'a> {
    pub tree: &'a mut UiTree,
    /// The control the hook runs for.
    pub id: ControlId,
}

/// Result of an attribute-parsing hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrStatus {
    /// The control consumed the attribute.
    Handled,
    /// Hand the attribute to the base control parser.
    Deferred,
}

/// Behavior of a control node.
pub trait Control: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Structural/notification event hook.
    ///
    /// Return [`EventStatus::Ignored`] for any event not fully
    /// handled; the base step then runs.
    fn do_event(
        &mut self,
        _ctx: &mut Ctx<'_>,
        _sender: Option<ControlId>,
        _notice: &Notice,
    ) -> EventStatus {
        EventStatus::Ignored
    }

    /// Pointer event hook, same fallthrough discipline.
    fn do_mouse_event(&mut self, _ctx: &mut Ctx<'_>, _arg: &MouseEventArg) -> EventStatus {
        EventStatus::Ignored
    }

    /// Attribute-parsing hook.
    ///
    /// Unrecognized keys must be deferred, never dropped, so the base
    /// parser still sees them.
    fn add_attribute(&mut self, _ctx: &mut Ctx<'_>, _key: AttrKey, _value: &str) -> AttrStatus {
        AttrStatus::Deferred
    }

    /// Intrinsic size for layout, None for pure containers.
    fn measure(&mut self, _shaper: &dyn TextShaper) -> Option<Size<f32>> {
        None
    }
}
