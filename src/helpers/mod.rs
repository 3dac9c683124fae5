//! Helper functions for generated pages

mod html;

pub use html::*;
