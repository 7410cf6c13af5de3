mod core;

pub use core::{solve, ScreenLayout, BOX_TOP_ROW, STATUS_ROW, TITLE_ROW};
