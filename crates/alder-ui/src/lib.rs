//! Alder UI: a retained-mode control tree.
//!
//! The tree owns controls in an arena and routes events, attributes
//! and layout through them. Behaviors implement [`Control`] and extend
//! the base control by overriding hooks; the dispatch wrapper always
//! runs the base step after an unhandled hook, so derived controls
//! compose instead of replacing the base.
//!
//! ```
//! use alder_text::HeuristicShaper;
//! use alder_ui::{Checkbox, Container, UiTree};
//!
//! let mut tree = UiTree::new();
//! let root = Container::build(&mut tree, None);
//! let checkbox = Checkbox::build(&mut tree, root);
//! tree.initialize(root);
//!
//! tree.add_attribute(checkbox, "label", "Enable logging");
//! tree.checkbox(checkbox).unwrap().toggle();
//! assert_eq!(tree.take_events().len(), 1);
//!
//! tree.compute_layout(alder_core::geometry::Size::new(800.0, 600.0), &HeuristicShaper::new());
//! ```

pub mod animation;
pub mod attr;
pub mod control;
pub mod controls;
pub mod event;
pub mod focus;
pub mod named;
pub mod router;
pub mod state;
pub mod tree;

pub use animation::{AnimationSystem, Easing, StateKind, StateTransition};
pub use attr::AttrKey;
pub use control::{AttrStatus, Control, Ctx};
pub use controls::{Checkbox, CheckboxRef, Container, Image, Label};
pub use event::{
    CommandEvent, Cursor, EventId, EventStatus, MouseEvent, MouseEventArg, Notice,
};
pub use focus::{FocusEvent, FocusManager};
pub use named::NamedControlRef;
pub use state::{Align, Appearance, Orient, StyleState};
pub use tree::{ControlId, ControlNode, UiTree};
