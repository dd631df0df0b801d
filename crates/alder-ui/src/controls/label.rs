use std::any::Any;

use alder_core::geometry::Size;
use alder_text::{TextLayout, TextShaper, TextStyle};
use tracing::trace;

use crate::attr::AttrKey;
use crate::control::{AttrStatus, Control, Ctx};
use crate::event::{Cursor, EventStatus, MouseEvent, MouseEventArg, Notice};
use crate::named::NamedControlRef;
use crate::tree::{ControlId, UiTree};

/// Text label.
///
/// A label can act as a hyperlink (`href`) and can proxy activation to
/// another control through a named reference: clicking the label or
/// pressing its access key forwards an access action to that control.
pub struct Label {
    text: String,
    layout: TextLayout,
    style: TextStyle,
    href: Option<String>,
    control: NamedControlRef,
    access_key: Option<char>,
    /// Byte offset of the access key within `text`, for underlining.
    access_key_pos: Option<usize>,
    show_access_key: bool,
    /// An explicit style rule matched this label; suppresses the
    /// built-in hyperlink affordance.
    style_matched: bool,
}

impl Label {
    pub fn build(tree: &mut UiTree, parent: Option<ControlId>) -> ControlId {
        let id = tree.alloc_node(parent, "label");
        tree.set_behavior(id, Box::new(Label::new()));
        tree.finish_build(id);
        id
    }

    pub(crate) fn build_part(tree: &mut UiTree, parent: ControlId) -> ControlId {
        Self::build(tree, Some(parent))
    }

    fn new() -> Self {
        Self {
            text: String::new(),
            layout: TextLayout::new(),
            style: TextStyle::new(),
            href: None,
            control: NamedControlRef::new(),
            access_key: None,
            access_key_pos: None,
            show_access_key: false,
            style_matched: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the label text. Returns true when the text actually
    /// changed; the measurement cache is only invalidated then.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.text == text {
            return false;
        }
        self.text = text;
        self.layout.invalidate();
        self.update_access_key_pos();
        true
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Whether the label shows the built-in hyperlink affordance: a
    /// non-empty href with no explicit style rule overriding it.
    pub fn is_def_href(&self) -> bool {
        self.href.as_deref().is_some_and(|h| !h.is_empty()) && !self.style_matched
    }

    pub fn set_style_matched(&mut self, matched: bool) {
        self.style_matched = matched;
    }

    pub fn access_key(&self) -> Option<char> {
        self.access_key
    }

    pub fn access_key_pos(&self) -> Option<usize> {
        self.access_key_pos
    }

    pub fn set_access_key(&mut self, key: char) {
        self.access_key = Some(key.to_ascii_lowercase());
        self.update_access_key_pos();
    }

    /// Toggles the access-key underline without touching the text or
    /// the cached marker position.
    pub fn show_access_key(&mut self, show: bool) {
        self.show_access_key = show;
    }

    pub fn access_key_shown(&self) -> bool {
        self.show_access_key
    }

    /// Points the label's activation proxy at another control.
    pub fn set_control(&mut self, id: ControlId) {
        self.control.set_control(id);
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: TextStyle) {
        if self.style != style {
            self.style = style;
            self.layout.invalidate();
        }
    }

    fn update_access_key_pos(&mut self) {
        self.access_key_pos = self.access_key.and_then(|key| {
            self.text
                .char_indices()
                .find(|(_, c)| c.to_ascii_lowercase() == key)
                .map(|(pos, _)| pos)
        });
    }
}

impl Control for Label {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn do_mouse_event(&mut self, ctx: &mut Ctx<'_>, arg: &MouseEventArg) -> EventStatus {
        match arg.event {
            MouseEvent::Enter if self.is_def_href() => {
                ctx.tree.set_cursor(Cursor::Hand);
            }
            MouseEvent::LButtonUp => {
                if let Some(target) = self.control.resolve(ctx.tree) {
                    trace!("label {:?} forwards activation to {:?}", ctx.id, target);
                    ctx.tree.dispatch_notice(target, Some(ctx.id), &Notice::AccessAction);
                }
            }
            _ => {}
        }
        EventStatus::Ignored
    }

    fn add_attribute(&mut self, ctx: &mut Ctx<'_>, key: AttrKey, value: &str) -> AttrStatus {
        match key {
            AttrKey::Value => {
                if self.set_text(value) {
                    ctx.tree.mark_layout_dirty();
                }
                AttrStatus::Handled
            }
            AttrKey::Href => {
                self.href = Some(value.to_owned());
                AttrStatus::Handled
            }
            AttrKey::AccessKey => {
                if let Some(key) = value.chars().next() {
                    self.set_access_key(key);
                }
                AttrStatus::Handled
            }
            _ => AttrStatus::Deferred,
        }
    }

    fn measure(&mut self, shaper: &dyn TextShaper) -> Option<Size<f32>> {
        Some(self.layout.measure(shaper, &self.text, &self.style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alder_text::HeuristicShaper;

    #[test]
    fn value_attribute_sets_text() {
        let mut tree = UiTree::new();
        let id = Label::build(&mut tree, None);
        tree.initialize(id);
        tree.add_attribute(id, "value", "Hello");
        assert_eq!(tree.downcast_ref::<Label>(id).unwrap().text(), "Hello");
    }

    #[test]
    fn set_text_invalidates_only_on_change() {
        let mut label = Label::new();
        label.measure(&HeuristicShaper::new());
        assert!(label.set_text("a"));
        let generation = label.layout.generation();
        assert!(!label.set_text("a"));
        assert_eq!(label.layout.generation(), generation);
        assert!(label.set_text("b"));
        assert_eq!(label.layout.generation(), generation + 1);
    }

    #[test]
    fn access_key_position_tracks_text() {
        let mut label = Label::new();
        label.set_access_key('K');
        assert_eq!(label.access_key(), Some('k'));
        assert_eq!(label.access_key_pos(), None);
        label.set_text("OK");
        assert_eq!(label.access_key_pos(), Some(1));
        label.set_text("no match");
        assert_eq!(label.access_key_pos(), None);
    }

    #[test]
    fn href_label_sets_hand_cursor_on_enter() {
        let mut tree = UiTree::new();
        let id = Label::build(&mut tree, None);
        tree.initialize(id);
        tree.add_attribute(id, "href", "https://example.com");
        tree.dispatch_mouse(
            id,
            &MouseEventArg {
                event: MouseEvent::Enter,
                pos: alder_core::geometry::Point::ZERO,
            },
        );
        assert_eq!(tree.cursor(), Cursor::Hand);
    }

    #[test]
    fn style_match_overrides_href_affordance() {
        let mut label = Label::new();
        assert!(!label.is_def_href());
        label.href = Some(String::new());
        assert!(!label.is_def_href());
        label.href = Some("https://example.com".into());
        assert!(label.is_def_href());
        label.set_style_matched(true);
        assert!(!label.is_def_href());
    }

    #[test]
    fn showing_the_access_key_keeps_text_and_position() {
        let mut label = Label::new();
        label.set_text("Cancel");
        label.set_access_key('c');
        label.show_access_key(true);
        assert!(label.access_key_shown());
        assert_eq!(label.text(), "Cancel");
        assert_eq!(label.access_key_pos(), Some(0));
        label.show_access_key(false);
        assert_eq!(label.access_key_pos(), Some(0));
    }

    #[test]
    fn measure_uses_text_bounds() {
        let mut label = Label::new();
        label.set_text("hello");
        let size = label.measure(&HeuristicShaper::new()).unwrap();
        assert!(size.width > 0.0);
        assert!(size.height > 0.0);
    }
}
