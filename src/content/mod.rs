mod core;

pub use core::{flatten, Node, INDENT, UNBOUNDED_DEPTH};
