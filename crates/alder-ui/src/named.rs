//! Non-owning named control references.
//!
//! A named reference links one control to another by role (a label to
//! the control it activates) without owning it. It is a bare id into
//! the control arena; ids are never reused, so a reference to a
//! destroyed control simply stops resolving. Callers must revalidate
//! through [`NamedControlRef::resolve`] before every use.

use crate::tree::{ControlId, UiTree};

/// Weak association from a referrer control to a referent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NamedControlRef {
    target: Option<ControlId>,
}

impl NamedControlRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the reference at `target`.
    pub fn set_control(&mut self, target: ControlId) {
        self.target = Some(target);
    }

    /// Drop the association.
    pub fn clear(&mut self) {
        self.target = None;
    }

    /// Whether a target is set, stale or not.
    pub fn is_set(&self) -> bool {
        self.target.is_some()
    }

    /// The referent, if it is set and still alive in `tree`.
    pub fn resolve(&self, tree: &UiTree) -> Option<ControlId> {
        self.target.filter(|id| tree.contains(*id))
    }
}
