//! Focus management for controls.
//!
//! Focusable controls register in initialization order; the manager
//! tracks the focused control, queues gained/lost events, and cycles
//! with next/previous navigation. Composite parts are marked
//! non-focusable and never register.

use crate::tree::ControlId;

/// Focus change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    /// Control gained focus
    Gained(ControlId),
    /// Control lost focus
    Lost(ControlId),
}

/// Manages keyboard focus across the control tree.
pub struct FocusManager {
    /// Registered focusable controls, in registration order
    order: Vec<ControlId>,
    /// Currently focused control
    focused: Option<ControlId>,
    /// Focus event queue
    events: Vec<FocusEvent>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            focused: None,
            events: Vec::new(),
        }
    }

    /// Register a control as focusable. Registering twice is a no-op.
    pub fn register(&mut self, id: ControlId) {
        if !self.order.contains(&id) {
            self.order.push(id);
        }
    }

    /// Remove a control from the focus order, dropping focus if held.
    pub fn unregister(&mut self, id: ControlId) {
        self.order.retain(|entry| *entry != id);
        if self.focused == Some(id) {
            self.focused = None;
            self.events.push(FocusEvent::Lost(id));
        }
    }

    /// Currently focused control.
    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    /// Move focus, queuing lost/gained events for a real change.
    pub fn set_focus(&mut self, id: Option<ControlId>) {
        if self.focused == id {
            return;
        }
        if let Some(old) = self.focused {
            self.events.push(FocusEvent::Lost(old));
        }
        if let Some(new) = id {
            self.events.push(FocusEvent::Gained(new));
        }
        self.focused = id;
    }

    /// Focus the next control in registration order, wrapping around.
    pub fn focus_next(&mut self) {
        self.cycle(1);
    }

    /// Focus the previous control in registration order.
    pub fn focus_previous(&mut self) {
        self.cycle(-1);
    }

    fn cycle(&mut self, step: isize) {
        if self.order.is_empty() {
            return;
        }
        let len = self.order.len() as isize;
        let next = match self.focused.and_then(|id| {
            self.order.iter().position(|entry| *entry == id)
        }) {
            Some(pos) => (pos as isize + step).rem_euclid(len) as usize,
            None => {
                if step > 0 {
                    0
                } else {
                    self.order.len() - 1
                }
            }
        };
        self.set_focus(Some(self.order[next]));
    }

    /// Drain queued focus events.
    pub fn take_events(&mut self) -> Vec<FocusEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> ControlId {
        ControlId::from_raw(raw)
    }

    #[test]
    fn focus_change_queues_events() {
        let mut focus = FocusManager::new();
        focus.register(id(1));
        focus.register(id(2));

        focus.set_focus(Some(id(1)));
        focus.set_focus(Some(id(2)));
        assert_eq!(
            focus.take_events(),
            vec![
                FocusEvent::Gained(id(1)),
                FocusEvent::Lost(id(1)),
                FocusEvent::Gained(id(2)),
            ]
        );

        // No-op change queues nothing.
        focus.set_focus(Some(id(2)));
        assert!(focus.take_events().is_empty());
    }

    #[test]
    fn cycling_wraps() {
        let mut focus = FocusManager::new();
        focus.register(id(1));
        focus.register(id(2));
        focus.register(id(3));

        focus.focus_next();
        assert_eq!(focus.focused(), Some(id(1)));
        focus.focus_next();
        focus.focus_next();
        assert_eq!(focus.focused(), Some(id(3)));
        focus.focus_next();
        assert_eq!(focus.focused(), Some(id(1)));

        focus.focus_previous();
        assert_eq!(focus.focused(), Some(id(3)));
    }

    #[test]
    fn unregister_drops_focus() {
        let mut focus = FocusManager::new();
        focus.register(id(1));
        focus.set_focus(Some(id(1)));
        focus.take_events();

        focus.unregister(id(1));
        assert_eq!(focus.focused(), None);
        assert_eq!(focus.take_events(), vec![FocusEvent::Lost(id(1))]);
    }

    #[test]
    fn duplicate_registration_ignored() {
        let mut focus = FocusManager::new();
        focus.register(id(1));
        focus.register(id(1));
        focus.focus_next();
        focus.focus_next();
        assert_eq!(focus.focused(), Some(id(1)));
    }
}
