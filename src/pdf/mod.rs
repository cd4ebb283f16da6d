//! PDF rendering for generated meeting minutes.

mod renderer;

pub use renderer::{minutes_filename, render_minutes};
