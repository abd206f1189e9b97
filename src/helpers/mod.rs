//! Formatting helpers
//!
//! Date display, reading-time estimation and body-block HTML rendering
//! shared by the generator and the dev server.

mod date;
mod html;
mod reading;

pub use date::*;
pub use html::*;
pub use reading::*;
