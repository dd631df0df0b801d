//! Event and attribute dispatch.
//!
//! Dispatch is wrapper-enforced: the tree takes the behavior box out
//! of the node, runs the hook, puts the box back, and then runs the
//! base step whenever the hook reported
//! [`EventStatus::Ignored`]/[`AttrStatus::Deferred`]. A behavior can
//! therefore extend the base handling but never silently lose it.

use alder_core::geometry::Point;
use tracing::{trace, warn};

use crate::attr::{self, AttrKey};
use crate::control::{AttrStatus, Ctx};
use crate::event::{Cursor, EventStatus, MouseEvent, MouseEventArg, Notice};
use crate::state::{Align, Appearance, Orient, StyleState};
use crate::tree::{ControlId, UiTree};

impl UiTree {
    /// Routes a notice to `id`, then runs the base handling unless the
    /// behavior accepted it.
    pub fn dispatch_notice(
        &mut self,
        id: ControlId,
        sender: Option<ControlId>,
        notice: &Notice,
    ) -> EventStatus {
        if !self.dispatch_allowed(id) {
            return EventStatus::Ignored;
        }
        let behavior = self.nodes.get_mut(&id).and_then(|n| n.behavior.take());
        let status = match behavior {
            Some(mut behavior) => {
                let mut ctx = Ctx { tree: &mut *self, id };
                let status = behavior.do_event(&mut ctx, sender, notice);
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.behavior = Some(behavior);
                }
                status
            }
            None => EventStatus::Ignored,
        };
        match status {
            EventStatus::Accepted => status,
            EventStatus::Ignored => self.base_notice(id, notice),
        }
    }

    /// Routes a pointer event to `id` with the same fallthrough rule.
    pub fn dispatch_mouse(&mut self, id: ControlId, arg: &MouseEventArg) -> EventStatus {
        if !self.dispatch_allowed(id) {
            return EventStatus::Ignored;
        }
        let behavior = self.nodes.get_mut(&id).and_then(|n| n.behavior.take());
        let status = match behavior {
            Some(mut behavior) => {
                let mut ctx = Ctx { tree: &mut *self, id };
                let status = behavior.do_mouse_event(&mut ctx, arg);
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.behavior = Some(behavior);
                }
                status
            }
            None => EventStatus::Ignored,
        };
        match status {
            EventStatus::Accepted => status,
            EventStatus::Ignored => self.base_mouse(id, arg),
        }
    }

    /// Feeds one attribute to a control by name.
    ///
    /// Unknown names are dropped with a trace; known keys go through
    /// the behavior first and fall back to the base parser.
    pub fn add_attribute(&mut self, id: ControlId, key: &str, value: &str) {
        match AttrKey::from_name(key) {
            Some(key) => self.add_attribute_keyed(id, key, value),
            None => trace!("{:?}: unknown attribute {key:?} ignored", id),
        }
    }

    pub fn add_attribute_keyed(&mut self, id: ControlId, key: AttrKey, value: &str) {
        if !self.contains(id) {
            warn!("add_attribute: {:?} does not exist", id);
            return;
        }
        let behavior = self.nodes.get_mut(&id).and_then(|n| n.behavior.take());
        let status = match behavior {
            Some(mut behavior) => {
                let mut ctx = Ctx { tree: &mut *self, id };
                let status = behavior.add_attribute(&mut ctx, key, value);
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.behavior = Some(behavior);
                }
                status
            }
            None => AttrStatus::Deferred,
        };
        if status == AttrStatus::Deferred {
            self.base_attribute(id, key, value);
        }
    }

    /// Dispatch is refused while the node or any ancestor is still
    /// under construction; a composite wires its parts before the
    /// outside world may reach them.
    fn dispatch_allowed(&self, id: ControlId) -> bool {
        let mut cursor = Some(id);
        while let Some(cur) = cursor {
            let Some(node) = self.nodes.get(&cur) else {
                return false;
            };
            if node.state().contains(StyleState::CONSTRUCTING) {
                warn!("dispatch to {:?} refused: {:?} is constructing", id, cur);
                return false;
            }
            cursor = node.parent;
        }
        true
    }

    // -- base steps -------------------------------------------------------

    fn base_notice(&mut self, id: ControlId, notice: &Notice) -> EventStatus {
        match notice {
            Notice::Initialize => {
                let focusable = {
                    let Some(state) = self.state_mut(id) else {
                        return EventStatus::Ignored;
                    };
                    state.insert(StyleState::INITIALIZED);
                    state.contains(StyleState::FOCUSABLE)
                };
                if focusable {
                    self.focus.register(id);
                }
                EventStatus::Accepted
            }
            Notice::Destroy => EventStatus::Accepted,
            // Unclaimed commands stop at the root.
            Notice::Command { .. } if self.root() == Some(id) => EventStatus::Accepted,
            Notice::AccessAction | Notice::Command { .. } => EventStatus::Ignored,
        }
    }

    fn base_mouse(&mut self, id: ControlId, arg: &MouseEventArg) -> EventStatus {
        if !self.contains(id) {
            return EventStatus::Ignored;
        }
        match arg.event {
            MouseEvent::Enter => {
                if let Some(state) = self.state_mut(id) {
                    state.insert(StyleState::HOVERED);
                }
            }
            MouseEvent::Leave => {
                if let Some(state) = self.state_mut(id) {
                    state.remove(StyleState::HOVERED);
                    state.remove(StyleState::ACTIVE);
                }
                self.cursor = Cursor::Arrow;
            }
            MouseEvent::LButtonDown => {
                if let Some(state) = self.state_mut(id) {
                    state.insert(StyleState::ACTIVE);
                }
            }
            MouseEvent::LButtonUp => {
                if let Some(state) = self.state_mut(id) {
                    state.remove(StyleState::ACTIVE);
                }
                if self.state(id).contains(StyleState::FOCUSABLE) {
                    self.focus.set_focus(Some(id));
                }
            }
        }
        EventStatus::Accepted
    }

    fn base_attribute(&mut self, id: ControlId, key: AttrKey, value: &str) {
        match key {
            AttrKey::Id => {
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.id_attr = Some(value.to_owned());
                }
            }
            // Parse-time flags set directly; runtime changes go
            // through the animating setters.
            AttrKey::Disabled => {
                if let Some(state) = self.state_mut(id) {
                    state.set(StyleState::DISABLED, attr::parse_bool(value));
                }
            }
            AttrKey::Checked => {
                if let Some(state) = self.state_mut(id) {
                    state.set(StyleState::CHECKED, attr::parse_bool(value));
                }
            }
            AttrKey::Indeterminate => {
                if let Some(state) = self.state_mut(id) {
                    state.set(StyleState::INDETERMINATE, attr::parse_bool(value));
                }
            }
            AttrKey::Orient => {
                if let Some(orient) = Orient::from_name(value) {
                    self.set_orient(id, orient);
                }
            }
            AttrKey::Align => {
                if let Some(align) = Align::from_name(value) {
                    self.set_align(id, align);
                }
            }
            AttrKey::Appearance => {
                if let Some(appearance) = Appearance::from_name(value) {
                    self.set_appearance(id, appearance);
                }
            }
            _ => trace!("{:?}: attribute {:?} not handled", id, key.name()),
        }
    }

    // -- pointer synthesis ------------------------------------------------

    /// Converts an absolute pointer position into enter/leave pairs
    /// against the current hover target.
    pub fn pointer_moved(&mut self, pos: Point) {
        let target = self
            .hit_test(pos)
            .map(|hit| self.event_target(hit))
            .filter(|id| self.state(*id).accepts_dispatch());
        if target == self.hovered {
            return;
        }
        if let Some(old) = self.hovered {
            self.dispatch_mouse(old, &MouseEventArg { event: MouseEvent::Leave, pos });
        }
        self.hovered = target;
        if let Some(new) = target {
            self.dispatch_mouse(new, &MouseEventArg { event: MouseEvent::Enter, pos });
        }
    }

    /// Routes a left-button transition to the control under `pos`.
    ///
    /// Disabled controls still hit-test (they occlude what is under
    /// them) but receive no button events.
    pub fn pointer_button(&mut self, pos: Point, pressed: bool) {
        self.pointer_moved(pos);
        let Some(target) = self.hovered else {
            return;
        };
        if !self.state(target).accepts_input() {
            trace!("button on {:?} dropped: control does not accept input", target);
            return;
        }
        let event = if pressed { MouseEvent::LButtonDown } else { MouseEvent::LButtonUp };
        self.dispatch_mouse(target, &MouseEventArg { event, pos });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Control;
    use std::any::Any;

    /// Behavior that records which hooks ran and optionally accepts
    /// everything, starving the base step.
    struct Recorder {
        accept: bool,
        notices: Vec<&'static str>,
    }

    impl Recorder {
        fn new(accept: bool) -> Self {
            Self { accept, notices: Vec::new() }
        }

        fn status(&self) -> EventStatus {
            if self.accept { EventStatus::Accepted } else { EventStatus::Ignored }
        }
    }

    impl Control for Recorder {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn do_event(
            &mut self,
            _ctx: &mut Ctx<'_>,
            _sender: Option<ControlId>,
            notice: &Notice,
        ) -> EventStatus {
            self.notices.push(match notice {
                Notice::Initialize => "initialize",
                Notice::Destroy => "destroy",
                Notice::AccessAction => "access",
                Notice::Command { .. } => "command",
            });
            self.status()
        }

        fn do_mouse_event(&mut self, _ctx: &mut Ctx<'_>, _arg: &MouseEventArg) -> EventStatus {
            self.status()
        }
    }

    fn build(tree: &mut UiTree, parent: Option<ControlId>, accept: bool) -> ControlId {
        let id = tree.alloc_node(parent, "recorder");
        tree.set_behavior(id, Box::new(Recorder::new(accept)));
        tree.finish_build(id);
        id
    }

    #[test]
    fn ignored_initialize_still_marks_initialized() {
        let mut tree = UiTree::new();
        let id = build(&mut tree, None, false);
        tree.initialize(id);
        assert!(tree.state(id).contains(StyleState::INITIALIZED));
        let recorder = tree.downcast_ref::<Recorder>(id).unwrap();
        assert_eq!(recorder.notices, ["initialize"]);
    }

    #[test]
    fn accepted_event_skips_base_step() {
        let mut tree = UiTree::new();
        let id = build(&mut tree, None, true);
        tree.initialize(id);
        // The behavior accepted Initialize, so the base never ran.
        assert!(!tree.state(id).contains(StyleState::INITIALIZED));
    }

    #[test]
    fn base_mouse_tracks_hover_and_active() {
        let mut tree = UiTree::new();
        let id = build(&mut tree, None, false);
        tree.initialize(id);
        let pos = Point::ZERO;
        tree.dispatch_mouse(id, &MouseEventArg { event: MouseEvent::Enter, pos });
        assert!(tree.state(id).contains(StyleState::HOVERED));
        tree.dispatch_mouse(id, &MouseEventArg { event: MouseEvent::LButtonDown, pos });
        assert!(tree.state(id).contains(StyleState::ACTIVE));
        tree.dispatch_mouse(id, &MouseEventArg { event: MouseEvent::LButtonUp, pos });
        assert!(!tree.state(id).contains(StyleState::ACTIVE));
        tree.dispatch_mouse(id, &MouseEventArg { event: MouseEvent::Leave, pos });
        assert!(!tree.state(id).contains(StyleState::HOVERED));
    }

    #[test]
    fn constructing_subtree_receives_no_dispatch() {
        let mut tree = UiTree::new();
        let root = tree.alloc_node(None, "container");
        let child = tree.alloc_node(Some(root), "recorder");
        tree.set_behavior(child, Box::new(Recorder::new(false)));
        tree.finish_build(child);
        // Parent still constructing: the child is unreachable.
        let status = tree.dispatch_notice(child, None, &Notice::AccessAction);
        assert_eq!(status, EventStatus::Ignored);
        assert!(tree.downcast_ref::<Recorder>(child).unwrap().notices.is_empty());
        tree.finish_build(root);
        tree.dispatch_notice(child, None, &Notice::AccessAction);
        assert_eq!(tree.downcast_ref::<Recorder>(child).unwrap().notices, ["access"]);
    }

    #[test]
    fn base_attribute_parses_shared_keys() {
        let mut tree = UiTree::new();
        let id = tree.alloc_node(None, "container");
        tree.finish_build(id);
        tree.add_attribute(id, "id", "main");
        tree.add_attribute(id, "disabled", "true");
        tree.add_attribute(id, "orient", "vertical");
        tree.add_attribute(id, "nonsense", "true");
        assert_eq!(tree.find_by_id_attr("main"), Some(id));
        assert!(tree.state(id).contains(StyleState::DISABLED));
    }
}
