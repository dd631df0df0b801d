use std::any::Any;

use crate::control::Control;
use crate::state::Appearance;
use crate::tree::{ControlId, UiTree};

/// Plain flexbox container. All behavior comes from the base control;
/// this exists so containers still participate in downcasts and get a
/// distinct appearance.
pub struct Container;

impl Container {
    pub fn build(tree: &mut UiTree, parent: Option<ControlId>) -> ControlId {
        let id = tree.alloc_node(parent, "container");
        tree.set_appearance(id, Appearance::Container);
        tree.set_behavior(id, Box::new(Container));
        tree.finish_build(id);
        id
    }
}

impl Control for Container {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
