//! Alder Text - text measurement for the Alder UI toolkit
//!
//! Shaping itself is an external collaborator; this crate provides the
//! narrow interface the control core consumes:
//! - [`TextShaper`]: the measurement contract a real shaping engine
//!   implements
//! - [`HeuristicShaper`]: a char-count estimate used when no engine is
//!   attached
//! - [`TextLayout`]: a generation-counted measurement cache, invalidated
//!   by the owning control after every text or font mutation

pub mod error;
pub mod layout;
pub mod shaper;

pub use error::TextError;
pub use layout::TextLayout;
pub use shaper::{HeuristicShaper, TextShaper, TextStyle};
