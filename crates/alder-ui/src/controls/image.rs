use std::any::Any;

use alder_core::geometry::Size;
use alder_text::TextShaper;
use tracing::trace;

use crate::attr::AttrKey;
use crate::control::{AttrStatus, Control, Ctx};
use crate::tree::{ControlId, UiTree};

/// Image control.
///
/// Decoding and rendering live outside the core; here an image is a
/// source string plus a natural size for layout.
pub struct Image {
    source: Option<String>,
    natural_size: Size<f32>,
}

impl Image {
    /// Default glyph box, used for indicator parts before a real
    /// source is known.
    pub const DEFAULT_SIZE: Size<f32> = Size { width: 16.0, height: 16.0 };

    pub fn build(tree: &mut UiTree, parent: Option<ControlId>) -> ControlId {
        let id = tree.alloc_node(parent, "image");
        tree.set_behavior(
            id,
            Box::new(Image { source: None, natural_size: Self::DEFAULT_SIZE }),
        );
        tree.finish_build(id);
        id
    }

    /// Builds an image as a part of a composite control.
    pub(crate) fn build_part(tree: &mut UiTree, parent: ControlId) -> ControlId {
        Self::build(tree, Some(parent))
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns true when the source actually changed.
    pub fn set_source(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        if self.source.as_deref() == Some(source.as_str()) {
            return false;
        }
        trace!("image source set to {source:?}");
        self.source = Some(source);
        true
    }

    pub fn natural_size(&self) -> Size<f32> {
        self.natural_size
    }

    pub fn set_natural_size(&mut self, size: Size<f32>) {
        self.natural_size = size;
    }
}

impl Control for Image {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn add_attribute(&mut self, ctx: &mut Ctx<'_>, key: AttrKey, value: &str) -> AttrStatus {
        match key {
            AttrKey::Src => {
                if self.set_source(value) {
                    ctx.tree.mark_layout_dirty();
                }
                AttrStatus::Handled
            }
            _ => AttrStatus::Deferred,
        }
    }

    fn measure(&mut self, _shaper: &dyn TextShaper) -> Option<Size<f32>> {
        Some(self.natural_size)
    }
}
