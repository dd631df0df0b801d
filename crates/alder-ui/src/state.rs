//! Style-state flags and enumerated style attributes for controls.

use bitflags::bitflags;

bitflags! {
    /// Per-control style state.
    ///
    /// The semantic flags (checked, indeterminate, disabled) drive
    /// state-transition animations; the structural flags (atomic,
    /// destructing, constructing) gate what the dispatch layer is
    /// allowed to do with a node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StyleState: u16 {
        /// No state
        const NONE          = 0b0000_0000_0000;

        /// Checked (checkbox-like controls)
        const CHECKED       = 0b0000_0000_0001;

        /// Indeterminate third state (checkbox-like controls)
        const INDETERMINATE = 0b0000_0000_0010;

        /// Disabled: all state setters no-op, no input dispatch
        const DISABLED      = 0b0000_0000_0100;

        /// Eligible for keyboard focus
        const FOCUSABLE     = 0b0000_0000_1000;

        /// Children are structural parts of this control, not
        /// independently addressable by external code
        const ATOMIC        = 0b0000_0001_0000;

        /// Teardown has begun; upward notification is suppressed.
        /// Set exactly once per lifetime.
        const DESTRUCTING   = 0b0000_0010_0000;

        /// Pointer is over the control
        const HOVERED       = 0b0000_0100_0000;

        /// Primary button is held on the control
        const ACTIVE        = 0b0000_1000_0000;

        /// Two-phase construction in progress; event dispatch into
        /// the control is refused until the build is finished
        const CONSTRUCTING  = 0b0001_0000_0000;

        /// Initialize notice has been delivered
        const INITIALIZED   = 0b0010_0000_0000;
    }
}

impl StyleState {
    /// Returns true if the control may react to input and setters.
    #[inline]
    pub fn accepts_input(&self) -> bool {
        !self.intersects(Self::DISABLED | Self::DESTRUCTING | Self::CONSTRUCTING)
    }

    /// Returns true if event dispatch into the control is allowed.
    #[inline]
    pub fn accepts_dispatch(&self) -> bool {
        !self.intersects(Self::DESTRUCTING | Self::CONSTRUCTING)
    }

    /// Semantic flags synchronized from a composite onto its parts at
    /// initialization.
    #[inline]
    pub fn part_sync_flags(&self) -> Self {
        *self & (Self::CHECKED | Self::INDETERMINATE | Self::DISABLED)
    }
}

impl Default for StyleState {
    fn default() -> Self {
        Self::NONE
    }
}

/// Main-axis orientation of a control's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orient {
    #[default]
    Horizontal,
    Vertical,
}

impl Orient {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

/// Cross-axis alignment of a control's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
    Stretch,
}

impl Align {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" => Some(Self::End),
            "stretch" => Some(Self::Stretch),
            _ => None,
        }
    }
}

/// Appearance role written into the node for the style registry.
///
/// Resolution to a visual rule happens in a renderer outside this
/// core; controls only record which role they want drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    /// No explicit appearance; the control assigns its default role
    /// at initialization
    #[default]
    NotSet,
    /// Checkbox glyph (the indicator part)
    CheckBox,
    /// Checkbox container (glyph + label row)
    CheckBoxContainer,
    /// Plain text label
    Label,
    /// Image surface
    Image,
    /// Generic container
    Container,
    /// Explicitly no drawn appearance
    None,
}

impl Appearance {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "checkbox" => Some(Self::CheckBox),
            "checkbox-container" => Some(Self::CheckBoxContainer),
            "label" => Some(Self::Label),
            "image" => Some(Self::Image),
            "container" => Some(Self::Container),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_input() {
        assert!(StyleState::NONE.accepts_input());
        assert!((StyleState::CHECKED | StyleState::FOCUSABLE).accepts_input());
        assert!(!StyleState::DISABLED.accepts_input());
        assert!(!StyleState::DESTRUCTING.accepts_input());
        assert!(!StyleState::CONSTRUCTING.accepts_input());
    }

    #[test]
    fn test_accepts_dispatch() {
        // Disabled controls still take part in dispatch; their
        // setters are the guard, not the dispatch layer.
        assert!(StyleState::DISABLED.accepts_dispatch());
        assert!(!StyleState::DESTRUCTING.accepts_dispatch());
        assert!(!StyleState::CONSTRUCTING.accepts_dispatch());
    }

    #[test]
    fn test_part_sync_flags() {
        let state = StyleState::CHECKED
            | StyleState::DISABLED
            | StyleState::FOCUSABLE
            | StyleState::ATOMIC;
        let synced = state.part_sync_flags();
        assert!(synced.contains(StyleState::CHECKED));
        assert!(synced.contains(StyleState::DISABLED));
        assert!(!synced.contains(StyleState::FOCUSABLE));
        assert!(!synced.contains(StyleState::ATOMIC));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(Orient::from_name("vertical"), Some(Orient::Vertical));
        assert_eq!(Orient::from_name("diagonal"), None);
        assert_eq!(Align::from_name("center"), Some(Align::Center));
        assert_eq!(
            Appearance::from_name("checkbox-container"),
            Some(Appearance::CheckBoxContainer)
        );
        assert_eq!(Appearance::from_name("bogus"), None);
    }
}
