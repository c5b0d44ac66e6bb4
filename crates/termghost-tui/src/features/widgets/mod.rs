//! Ambient sidebar widgets.
//!
//! - `state.rs`: widget models and their randomized intervals
//! - `render.rs`: sidebar layout and drawing

mod render;
mod state;

pub use render::render_sidebar;
pub use state::{
    CPU_SAMPLES, CpuGraph, MemoryBar, NetworkActivity, ProgressRing, Stats, TOTAL_MEMORY_GB,
    WidgetsState, format_elapsed, format_speed,
};
