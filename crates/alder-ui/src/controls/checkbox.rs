use std::any::Any;

use alder_core::geometry::Edges;
use tracing::trace;

use crate::animation::{StateKind, StateTransition};
use crate::attr::AttrKey;
use crate::control::{AttrStatus, Control, Ctx};
use crate::controls::{Image, Label};
use crate::event::{EventStatus, MouseEvent, MouseEventArg, Notice};
use crate::state::{Appearance, StyleState};
use crate::tree::{ControlId, UiTree};

/// Checkbox composite.
///
/// Built from two mandatory parts, an indicator [`Image`] and a
/// [`Label`], plus an optional custom image created lazily when a
/// `src` attribute arrives. The composite is atomic: input aimed at a
/// part routes to the checkbox, and the parts cannot be detached.
///
/// Checked/indeterminate changes animate on both the container and the
/// indicator part, and each logical change emits exactly one change
/// event.
pub struct Checkbox {
    image: ControlId,
    label: ControlId,
    custom_image: Option<ControlId>,
}

impl Checkbox {
    pub fn build(tree: &mut UiTree, parent: ControlId) -> ControlId {
        let id = tree.alloc_node(Some(parent), "checkbox");
        tree.set_margin(id, Edges::new(4.0, 2.0, 4.0, 2.0));
        tree.set_padding(id, Edges::new(4.0, 1.0, 2.0, 1.0));
        if let Some(state) = tree.state_mut(id) {
            state.insert(StyleState::FOCUSABLE | StyleState::ATOMIC);
        }
        let image = Image::build_part(tree, id);
        let label = Label::build_part(tree, id);
        if let Some(label_behavior) = tree.downcast_mut::<Label>(label) {
            label_behavior.set_control(id);
        }
        tree.set_behavior(id, Box::new(Checkbox { image, label, custom_image: None }));
        tree.finish_build(id);
        id
    }

    pub fn image_part(&self) -> ControlId {
        self.image
    }

    pub fn label_part(&self) -> ControlId {
        self.label
    }

    pub fn custom_image(&self) -> Option<ControlId> {
        self.custom_image
    }

    /// Core checked transition, shared by attribute parsing, pointer
    /// handling and the public handle.
    ///
    /// Order matters: an indeterminate checkbox first leaves the
    /// indeterminate state, then moves to the requested checked state.
    /// Both steps animate on the container and the indicator part, and
    /// at most one change event fires.
    fn apply_checked(tree: &mut UiTree, id: ControlId, image: ControlId, value: bool) {
        if !tree.state(id).accepts_input() {
            return;
        }
        let mut changed = false;
        if tree.state(id).contains(StyleState::INDETERMINATE) {
            Self::transition(tree, id, image, StateKind::Indeterminate, false);
            changed = true;
        }
        if tree.state(id).contains(StyleState::CHECKED) != value {
            Self::transition(tree, id, image, StateKind::Checked, value);
            changed = true;
        }
        if changed {
            trace!("checkbox {:?} checked -> {value}", id);
            tree.trigger_event(id);
        }
    }

    /// Enters the indeterminate state. Leaving it goes through
    /// [`Checkbox::apply_checked`], which clears the flag first.
    fn apply_indeterminate(tree: &mut UiTree, id: ControlId, image: ControlId) {
        if !tree.state(id).accepts_input() {
            return;
        }
        if tree.state(id).contains(StyleState::INDETERMINATE) {
            return;
        }
        Self::transition(tree, id, image, StateKind::Indeterminate, true);
        tree.trigger_event(id);
    }

    fn apply_toggle(tree: &mut UiTree, id: ControlId, image: ControlId) {
        let checked = tree.state(id).contains(StyleState::CHECKED);
        Self::apply_checked(tree, id, image, !checked);
    }

    /// Flips one semantic flag on the container and indicator part and
    /// starts the matching animations.
    fn transition(
        tree: &mut UiTree,
        id: ControlId,
        image: ControlId,
        kind: StateKind,
        value: bool,
    ) {
        let flag = match kind {
            StateKind::Checked => StyleState::CHECKED,
            StateKind::Indeterminate => StyleState::INDETERMINATE,
            StateKind::Disabled => StyleState::DISABLED,
            StateKind::Hover | StateKind::Active => return,
        };
        for node in [id, image] {
            if let Some(state) = tree.state_mut(node) {
                state.set(flag, value);
            }
            tree.animations.start(node, StateTransition { kind, value });
        }
    }
}

impl Control for Checkbox {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn do_event(
        &mut self,
        ctx: &mut Ctx<'_>,
        _sender: Option<ControlId>,
        notice: &Notice,
    ) -> EventStatus {
        match notice {
            Notice::Initialize => {
                // An explicit appearance attribute on the composite
                // suppresses the default roles for both nodes.
                if ctx.tree.appearance(ctx.id) == Appearance::NotSet {
                    ctx.tree.set_appearance(ctx.id, Appearance::CheckBoxContainer);
                    ctx.tree.set_appearance(self.image, Appearance::CheckBox);
                }
                // Attributes parsed before initialization land on the
                // container; mirror them onto the indicator.
                let sync = ctx.tree.state(ctx.id).part_sync_flags();
                if let Some(state) = ctx.tree.state_mut(self.image) {
                    state.remove(StyleState::CHECKED | StyleState::INDETERMINATE | StyleState::DISABLED);
                    state.insert(sync);
                }
                EventStatus::Ignored
            }
            Notice::AccessAction => {
                ctx.tree.focus_mut().set_focus(Some(ctx.id));
                Self::apply_toggle(ctx.tree, ctx.id, self.image);
                EventStatus::Accepted
            }
            _ => EventStatus::Ignored,
        }
    }

    fn do_mouse_event(&mut self, ctx: &mut Ctx<'_>, arg: &MouseEventArg) -> EventStatus {
        if arg.event == MouseEvent::LButtonUp {
            Self::apply_toggle(ctx.tree, ctx.id, self.image);
        }
        EventStatus::Ignored
    }

    fn add_attribute(&mut self, ctx: &mut Ctx<'_>, key: AttrKey, value: &str) -> AttrStatus {
        match key {
            // The markup says "label", the label part says "value".
            AttrKey::Label => {
                ctx.tree.add_attribute_keyed(self.label, AttrKey::Value, value);
                AttrStatus::Handled
            }
            AttrKey::AccessKey => {
                ctx.tree.add_attribute_keyed(self.label, AttrKey::AccessKey, value);
                AttrStatus::Handled
            }
            AttrKey::Src => {
                let custom = match self.custom_image {
                    Some(existing) => existing,
                    None => {
                        let custom = Image::build_part(ctx.tree, ctx.id);
                        ctx.tree.move_child_before(custom, self.label);
                        ctx.tree.initialize(custom);
                        self.custom_image = Some(custom);
                        custom
                    }
                };
                ctx.tree.add_attribute_keyed(custom, AttrKey::Src, value);
                AttrStatus::Handled
            }
            // Checked/indeterminate/disabled parse as plain flags in
            // the base; initialization mirrors them onto the part.
            _ => AttrStatus::Deferred,
        }
    }
}

/// Typed handle to a checkbox in a tree.
pub struct CheckboxRef<'a> {
    tree: &'a mut UiTree,
    id: ControlId,
}

impl UiTree {
    /// Typed access to a checkbox node.
    pub fn checkbox(&mut self, id: ControlId) -> Option<CheckboxRef<'_>> {
        self.downcast_ref::<Checkbox>(id)?;
        Some(CheckboxRef { tree: self, id })
    }
}

impl CheckboxRef<'_> {
    fn parts(&self) -> (ControlId, ControlId) {
        // The downcast succeeded when this handle was created, and the
        // handle borrows the tree, so the behavior is still in place.
        self.tree
            .downcast_ref::<Checkbox>(self.id)
            .map(|c| (c.image, c.label))
            .unwrap_or((self.id, self.id))
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn checked(&self) -> bool {
        self.tree.state(self.id).contains(StyleState::CHECKED)
    }

    pub fn indeterminate(&self) -> bool {
        self.tree.state(self.id).contains(StyleState::INDETERMINATE)
    }

    pub fn set_checked(&mut self, value: bool) {
        let (image, _) = self.parts();
        Checkbox::apply_checked(self.tree, self.id, image, value);
    }

    /// Enters the indeterminate state; [`CheckboxRef::set_checked`]
    /// is the only way back out.
    pub fn set_indeterminate(&mut self) {
        let (image, _) = self.parts();
        Checkbox::apply_indeterminate(self.tree, self.id, image);
    }

    pub fn toggle(&mut self) {
        let (image, _) = self.parts();
        Checkbox::apply_toggle(self.tree, self.id, image);
    }

    pub fn text(&self) -> &str {
        let (_, label) = self.parts();
        self.tree.downcast_ref::<Label>(label).map_or("", |l| l.text())
    }

    /// Routes through the attribute path so the rename-and-forward
    /// rule applies in one place.
    pub fn set_text(&mut self, text: &str) {
        self.tree.add_attribute_keyed(self.id, AttrKey::Label, text);
    }

    pub fn set_image_source(&mut self, src: &str) {
        self.tree.add_attribute_keyed(self.id, AttrKey::Src, src);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.tree.set_disabled(self.id, disabled);
    }
}
