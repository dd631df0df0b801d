//! Enumerated attribute keys.
//!
//! Attribute sources hand the tree `(key, value)` string pairs during
//! construction. Keys are resolved once into [`AttrKey`] and routed
//! through the control's `add_attribute` hook; unknown keys never
//! reach a control and are silently ignored after a trace log.

/// Recognized attribute keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKey {
    /// Debug identifier
    Id,
    /// Generic value (label text for text-bearing controls)
    Value,
    /// Composite-level label text; composites forward this to their
    /// label part renamed to `Value`
    Label,
    /// Access key character
    AccessKey,
    /// Image source
    Src,
    /// Hyperlink marker
    Href,
    Checked,
    Indeterminate,
    Disabled,
    Orient,
    Align,
    Appearance,
}

impl AttrKey {
    /// Resolve an attribute name from the source document.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "value" => Some(Self::Value),
            "label" => Some(Self::Label),
            "accesskey" => Some(Self::AccessKey),
            "src" => Some(Self::Src),
            "href" => Some(Self::Href),
            "checked" => Some(Self::Checked),
            "indeterminate" => Some(Self::Indeterminate),
            "disabled" => Some(Self::Disabled),
            "orient" => Some(Self::Orient),
            "align" => Some(Self::Align),
            "appearance" => Some(Self::Appearance),
            _ => None,
        }
    }

    /// Attribute name as it appears in the source document.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Value => "value",
            Self::Label => "label",
            Self::AccessKey => "accesskey",
            Self::Src => "src",
            Self::Href => "href",
            Self::Checked => "checked",
            Self::Indeterminate => "indeterminate",
            Self::Disabled => "disabled",
            Self::Orient => "orient",
            Self::Align => "align",
            Self::Appearance => "appearance",
        }
    }
}

/// Parse a boolean attribute value.
///
/// Anything other than the recognized true spellings reads as false,
/// matching the tolerant source-document convention.
pub fn parse_bool(value: &str) -> bool {
    matches!(value, "true" | "1")
}
