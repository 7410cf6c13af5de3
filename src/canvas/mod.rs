mod core;

pub use core::{Canvas, CursorPosition};
