mod utils;

pub use utils::{ansi_overhead, display_width, fit};
