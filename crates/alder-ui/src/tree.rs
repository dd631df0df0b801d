//! Retained control tree.
//!
//! The tree owns every control node in an arena keyed by [`ControlId`].
//! Ids are monotonically increasing and never reused, so a stale id
//! (e.g. held by a [`crate::named::NamedControlRef`]) simply fails to
//! resolve instead of aliasing a newer control. Layout runs through
//! taffy: each node owns a taffy leaf, and [`UiTree::compute_layout`]
//! rebuilds styles, runs a measure pass for text-bearing controls, and
//! then lets taffy place everything.

use alder_core::geometry::{Edges, Point, Rect, Size};
use alder_text::TextShaper;
use indexmap::IndexMap;
use taffy::{
    AlignItems, AvailableSpace, Dimension, FlexDirection, LengthPercentage, LengthPercentageAuto,
    NodeId, Style, TaffyTree,
};
use tracing::{trace, warn};

use crate::animation::{AnimationSystem, StateKind, StateTransition};
use crate::control::Control;
use crate::event::{CommandEvent, Cursor, EventId, Notice};
use crate::focus::FocusManager;
use crate::state::{Align, Appearance, Orient, StyleState};

/// Handle to a control node. Never reused within a tree's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn to_raw(self) -> u64 {
        self.0
    }
}

/// A single node in the tree: identity, flags, layout inputs, and the
/// boxed behavior (absent while a dispatch hook borrows it).
pub struct ControlNode {
    pub(crate) name: &'static str,
    pub(crate) behavior: Option<Box<dyn Control>>,
    pub(crate) state: StyleState,
    pub(crate) appearance: Appearance,
    pub(crate) orient: Orient,
    pub(crate) align: Align,
    pub(crate) margin: Edges,
    pub(crate) padding: Edges,
    pub(crate) id_attr: Option<String>,
    pub(crate) parent: Option<ControlId>,
    pub(crate) children: Vec<ControlId>,
    pub(crate) layout: NodeId,
    /// Intrinsic size from the last measure pass, if any.
    pub(crate) measured: Option<Size<f32>>,
}

impl ControlNode {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> StyleState {
        self.state
    }

    pub fn id_attr(&self) -> Option<&str> {
        self.id_attr.as_deref()
    }
}

pub struct UiTree {
    pub(crate) nodes: IndexMap<ControlId, ControlNode>,
    pub(crate) taffy: TaffyTree<()>,
    root: Option<ControlId>,
    next_id: u64,
    layout_dirty: bool,
    pub(crate) hovered: Option<ControlId>,
    pub(crate) cursor: Cursor,
    pub(crate) animations: AnimationSystem,
    pub(crate) focus: FocusManager,
    pub(crate) events: Vec<CommandEvent>,
}

impl Default for UiTree {
    fn default() -> Self {
        Self::new()
    }
}

impl UiTree {
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            taffy: TaffyTree::new(),
            root: None,
            next_id: 1,
            layout_dirty: true,
            hovered: None,
            cursor: Cursor::Arrow,
            animations: AnimationSystem::new(),
            focus: FocusManager::new(),
            events: Vec::new(),
        }
    }

    pub fn root(&self) -> Option<ControlId> {
        self.root
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- construction -----------------------------------------------------

    /// First phase of building a control: allocate the node shell.
    ///
    /// The node starts in the `CONSTRUCTING` state and receives no
    /// dispatch until [`UiTree::finish_build`] clears it. A `parent`
    /// of `None` makes the node the tree root (only valid once).
    pub fn alloc_node(&mut self, parent: Option<ControlId>, name: &'static str) -> ControlId {
        let id = ControlId(self.next_id);
        self.next_id += 1;
        let layout = match self.taffy.new_leaf(Style::default()) {
            Ok(node) => node,
            Err(e) => {
                // Non-fatal: the node participates in dispatch but not
                // in layout.
                warn!("failed to allocate layout node for {:?}: {e}", id);
                NodeId::from(u64::MAX)
            }
        };
        self.nodes.insert(
            id,
            ControlNode {
                name,
                behavior: None,
                state: StyleState::CONSTRUCTING,
                appearance: Appearance::NotSet,
                orient: Orient::default(),
                align: Align::default(),
                margin: Edges::default(),
                padding: Edges::default(),
                id_attr: None,
                parent,
                children: Vec::new(),
                layout,
                measured: None,
            },
        );
        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    parent_node.children.push(id);
                    let parent_layout = parent_node.layout;
                    if let Err(e) = self.taffy.add_child(parent_layout, layout) {
                        warn!("failed to attach layout node for {:?}: {e}", id);
                    }
                } else {
                    warn!("alloc_node: parent {:?} does not exist", p);
                }
            }
            None => {
                if self.root.is_some() {
                    warn!("alloc_node: tree already has a root, {:?} is orphaned", id);
                } else {
                    self.root = Some(id);
                }
            }
        }
        trace!("allocated <{name}> as {:?}", id);
        id
    }

    /// Second phase: install the behavior box.
    pub fn set_behavior(&mut self, id: ControlId, behavior: Box<dyn Control>) {
        match self.nodes.get_mut(&id) {
            Some(node) => node.behavior = Some(behavior),
            None => warn!("set_behavior: {:?} does not exist", id),
        }
    }

    /// Final phase: leave the constructing state.
    ///
    /// Until this runs, no event or attribute dispatch reaches the
    /// node or its subtree.
    pub fn finish_build(&mut self, id: ControlId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.state.remove(StyleState::CONSTRUCTING);
            self.layout_dirty = true;
        }
    }

    /// Post-order `Initialize` dispatch over the subtree at `id`.
    ///
    /// Children initialize before their parent so composite controls
    /// see fully set-up parts. Already-initialized nodes are skipped,
    /// which makes re-running this over a grown tree safe.
    pub fn initialize(&mut self, id: ControlId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if node.state.contains(StyleState::CONSTRUCTING) {
            warn!("initialize: {:?} is still constructing", id);
            return;
        }
        let children = node.children.clone();
        for child in children {
            self.initialize(child);
        }
        if self
            .nodes
            .get(&id)
            .is_some_and(|n| !n.state.contains(StyleState::INITIALIZED))
        {
            self.dispatch_notice(id, None, &Notice::Initialize);
        }
    }

    // -- structure --------------------------------------------------------

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.nodes.get(&id)?.parent
    }

    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.nodes.get(&id).map_or(&[], |n| n.children.as_slice())
    }

    pub fn node(&self, id: ControlId) -> Option<&ControlNode> {
        self.nodes.get(&id)
    }

    /// Finds a control by the value of its `id` attribute.
    pub fn find_by_id_attr(&self, id_attr: &str) -> Option<ControlId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.id_attr.as_deref() == Some(id_attr))
            .map(|(id, _)| *id)
    }

    /// Reorders `child` to sit directly before `before` within the
    /// same parent. Used by composites that insert parts late.
    pub fn move_child_before(&mut self, child: ControlId, before: ControlId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if self.parent(before) != Some(parent) {
            warn!("move_child_before: {:?} and {:?} are not siblings", child, before);
            return;
        }
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return;
        };
        parent_node.children.retain(|c| *c != child);
        let pos = parent_node
            .children
            .iter()
            .position(|c| *c == before)
            .unwrap_or(parent_node.children.len());
        parent_node.children.insert(pos, child);

        // Mirror the order in taffy.
        let parent_layout = parent_node.layout;
        let layouts: Vec<NodeId> = self
            .nodes
            .get(&parent)
            .map(|n| n.children.iter().filter_map(|c| self.nodes.get(c)).map(|c| c.layout).collect())
            .unwrap_or_default();
        if let Err(e) = self.taffy.set_children(parent_layout, &layouts) {
            warn!("move_child_before: failed to reorder layout children: {e}");
        }
        self.layout_dirty = true;
    }

    /// Detaches and destroys `child`. Refused when the parent is an
    /// atomic composite: parts belong to their owner and only die with
    /// it.
    pub fn remove_child(&mut self, parent: ControlId, child: ControlId) -> bool {
        if self.parent(child) != Some(parent) {
            warn!("remove_child: {:?} is not a child of {:?}", child, parent);
            return false;
        }
        if self.state(parent).contains(StyleState::ATOMIC) {
            warn!("remove_child: {:?} is atomic, refusing to detach {:?}", parent, child);
            return false;
        }
        self.remove(child);
        true
    }

    /// Tears down the subtree at `id`.
    ///
    /// Every node in the subtree is flagged `DESTRUCTING` before any
    /// `Destroy` dispatch runs, so teardown handlers cannot emit
    /// change notifications for half-dead controls.
    pub fn remove(&mut self, id: ControlId) {
        if !self.contains(id) {
            return;
        }
        let parent = self.parent(id);
        self.mark_destructing(id);
        self.destroy(id);
        if self.root == Some(id) {
            self.root = None;
        }
        if let Some(parent) = parent
            && let Some(parent_node) = self.nodes.get_mut(&parent)
        {
            parent_node.children.retain(|c| *c != id);
        }
        self.layout_dirty = true;
    }

    fn mark_destructing(&mut self, id: ControlId) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        node.state.insert(StyleState::DESTRUCTING);
        let children = node.children.clone();
        for child in children {
            self.mark_destructing(child);
        }
    }

    fn destroy(&mut self, id: ControlId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let children = node.children.clone();
        for child in children {
            self.destroy(child);
        }
        self.dispatch_notice(id, None, &Notice::Destroy);
        self.focus.unregister(id);
        self.animations.stop_all(id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if let Some(node) = self.nodes.swap_remove(&id) {
            if let Err(e) = self.taffy.remove(node.layout) {
                trace!("destroy: layout node for {:?} already gone: {e}", id);
            }
            trace!("destroyed <{}> {:?}", node.name, id);
        }
    }

    // -- state ------------------------------------------------------------

    pub fn state(&self, id: ControlId) -> StyleState {
        self.nodes.get(&id).map_or(StyleState::NONE, |n| n.state)
    }

    pub(crate) fn state_mut(&mut self, id: ControlId) -> Option<&mut StyleState> {
        self.nodes.get_mut(&id).map(|n| &mut n.state)
    }

    /// Enables or disables a control, animating the transition.
    ///
    /// Atomic composites mirror the change onto their parts so the
    /// whole control greys out together.
    pub fn set_disabled(&mut self, id: ControlId, disabled: bool) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        if node.state.contains(StyleState::DISABLED) == disabled {
            return;
        }
        node.state.set(StyleState::DISABLED, disabled);
        let atomic = node.state.contains(StyleState::ATOMIC);
        self.animations
            .start(id, StateTransition { kind: StateKind::Disabled, value: disabled });
        if atomic {
            let parts = self.children(id).to_vec();
            for part in parts {
                if let Some(part_node) = self.nodes.get_mut(&part) {
                    part_node.state.set(StyleState::DISABLED, disabled);
                }
                self.animations
                    .start(part, StateTransition { kind: StateKind::Disabled, value: disabled });
            }
        }
    }

    pub fn appearance(&self, id: ControlId) -> Appearance {
        self.nodes.get(&id).map_or(Appearance::NotSet, |n| n.appearance)
    }

    pub fn set_appearance(&mut self, id: ControlId, appearance: Appearance) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.appearance = appearance;
        }
    }

    pub fn set_orient(&mut self, id: ControlId, orient: Orient) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.orient = orient;
            self.layout_dirty = true;
        }
    }

    pub fn set_align(&mut self, id: ControlId, align: Align) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.align = align;
            self.layout_dirty = true;
        }
    }

    pub fn set_margin(&mut self, id: ControlId, margin: Edges) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.margin = margin;
            self.layout_dirty = true;
        }
    }

    pub fn set_padding(&mut self, id: ControlId, padding: Edges) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.padding = padding;
            self.layout_dirty = true;
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    // -- behavior access --------------------------------------------------

    pub fn downcast_ref<T: Control>(&self, id: ControlId) -> Option<&T> {
        self.nodes.get(&id)?.behavior.as_ref()?.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: Control>(&mut self, id: ControlId) -> Option<&mut T> {
        self.nodes.get_mut(&id)?.behavior.as_mut()?.as_any_mut().downcast_mut()
    }

    // -- change notification ----------------------------------------------

    /// Emits the control's change event: queues a [`CommandEvent`] for
    /// the host and bubbles a [`Notice::Command`] up the ancestor
    /// chain until some control accepts it.
    ///
    /// Suppressed entirely while the source or any ancestor is being
    /// torn down.
    pub fn trigger_event(&mut self, source: ControlId) {
        let mut cursor = Some(source);
        while let Some(id) = cursor {
            if self.state(id).contains(StyleState::DESTRUCTING) {
                trace!("trigger_event: {:?} is destructing, suppressed", source);
                return;
            }
            cursor = self.parent(id);
        }
        self.events.push(CommandEvent { source, id: EventId::Command });
        let mut cursor = self.parent(source);
        while let Some(id) = cursor {
            let status = self.dispatch_notice(id, Some(source), &Notice::Command { source });
            if status == crate::event::EventStatus::Accepted {
                break;
            }
            cursor = self.parent(id);
        }
    }

    /// Drains change events queued since the last call.
    pub fn take_events(&mut self) -> Vec<CommandEvent> {
        std::mem::take(&mut self.events)
    }

    // -- animation --------------------------------------------------------

    pub fn animations(&self) -> &AnimationSystem {
        &self.animations
    }

    pub fn update_animations(&mut self, dt: f32) {
        self.animations.update(dt);
    }

    // -- focus ------------------------------------------------------------

    pub fn focus(&self) -> &FocusManager {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusManager {
        &mut self.focus
    }

    // -- layout -----------------------------------------------------------

    pub fn mark_layout_dirty(&mut self) {
        self.layout_dirty = true;
    }

    /// Runs the measure pass and flexbox layout for the whole tree.
    ///
    /// Controls with intrinsic content (text, images) report a size
    /// through [`Control::measure`]; everything else sizes from its
    /// children.
    pub fn compute_layout(&mut self, viewport: Size<f32>, shaper: &dyn TextShaper) {
        let Some(root) = self.root else {
            return;
        };
        let ids: Vec<ControlId> = self.nodes.keys().copied().collect();
        for id in ids {
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };
            let mut behavior = node.behavior.take();
            let measured = behavior.as_mut().and_then(|b| b.measure(shaper));
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };
            node.behavior = behavior;
            node.measured = measured;
            let style = node.style();
            let layout = node.layout;
            if let Err(e) = self.taffy.set_style(layout, style) {
                warn!("compute_layout: failed to style {:?}: {e}", id);
            }
        }
        let root_layout = match self.nodes.get(&root) {
            Some(n) => n.layout,
            None => return,
        };
        let available = taffy::Size {
            width: AvailableSpace::Definite(viewport.width),
            height: AvailableSpace::Definite(viewport.height),
        };
        if let Err(e) = self.taffy.compute_layout(root_layout, available) {
            warn!("compute_layout failed: {e}");
            return;
        }
        self.layout_dirty = false;
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Absolute rectangle of a control after the last layout pass.
    pub fn layout(&self, id: ControlId) -> Rect<f32> {
        let Some(node) = self.nodes.get(&id) else {
            return Rect::ZERO;
        };
        let Ok(layout) = self.taffy.layout(node.layout) else {
            return Rect::ZERO;
        };
        let mut x = layout.location.x;
        let mut y = layout.location.y;
        let size = Size::new(layout.size.width, layout.size.height);
        let mut cursor = node.parent;
        while let Some(pid) = cursor {
            let Some(parent) = self.nodes.get(&pid) else {
                break;
            };
            if let Ok(parent_layout) = self.taffy.layout(parent.layout) {
                x += parent_layout.location.x;
                y += parent_layout.location.y;
            }
            cursor = parent.parent;
        }
        Rect::new(x, y, size.width, size.height)
    }

    /// Front-most control whose rectangle contains `pos`.
    pub fn hit_test(&self, pos: Point) -> Option<ControlId> {
        let root = self.root?;
        self.hit_test_node(root, pos, Point::ZERO)
    }

    fn hit_test_node(&self, id: ControlId, pos: Point, origin: Point) -> Option<ControlId> {
        let node = self.nodes.get(&id)?;
        if node.state.contains(StyleState::DESTRUCTING) {
            return None;
        }
        let layout = self.taffy.layout(node.layout).ok()?;
        let rect = Rect::new(
            origin.x + layout.location.x,
            origin.y + layout.location.y,
            layout.size.width,
            layout.size.height,
        );
        if !rect.contains(pos) {
            return None;
        }
        // Later children draw on top.
        for child in node.children.iter().rev() {
            if let Some(hit) = self.hit_test_node(*child, pos, rect.position()) {
                return Some(hit);
            }
        }
        Some(id)
    }

    /// Resolves the control that should receive input aimed at `id`.
    ///
    /// Parts of an atomic composite route to the composite itself.
    pub fn event_target(&self, id: ControlId) -> ControlId {
        let mut id = id;
        while let Some(parent) = self.parent(id) {
            if !self.state(parent).contains(StyleState::ATOMIC) {
                break;
            }
            id = parent;
        }
        id
    }
}

impl ControlNode {
    /// Taffy style from the node's layout inputs and last measure.
    fn style(&self) -> Style {
        let size = match self.measured {
            Some(m) => taffy::Size {
                width: Dimension::Length(m.width),
                height: Dimension::Length(m.height),
            },
            None => taffy::Size { width: Dimension::Auto, height: Dimension::Auto },
        };
        Style {
            size,
            flex_direction: match self.orient {
                Orient::Horizontal => FlexDirection::Row,
                Orient::Vertical => FlexDirection::Column,
            },
            align_items: Some(match self.align {
                Align::Start => AlignItems::FlexStart,
                Align::Center => AlignItems::Center,
                Align::End => AlignItems::FlexEnd,
                Align::Stretch => AlignItems::Stretch,
            }),
            margin: taffy::Rect {
                left: LengthPercentageAuto::Length(self.margin.left),
                right: LengthPercentageAuto::Length(self.margin.right),
                top: LengthPercentageAuto::Length(self.margin.top),
                bottom: LengthPercentageAuto::Length(self.margin.bottom),
            },
            padding: taffy::Rect {
                left: LengthPercentage::Length(self.padding.left),
                right: LengthPercentage::Length(self.padding.right),
                top: LengthPercentage::Length(self.padding.top),
                bottom: LengthPercentage::Length(self.padding.bottom),
            },
            ..Style::default()
        }
    }
}
