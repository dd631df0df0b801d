//! Built-in controls.

mod checkbox;
mod container;
mod image;
mod label;

pub use checkbox::{Checkbox, CheckboxRef};
pub use container::Container;
pub use image::Image;
pub use label::Label;
