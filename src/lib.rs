// Library exports for testing and potential library use
//
// The render loop is single-threaded. The shader watcher's notify callback is
// the only other thread; it talks to the loop through an mpsc channel and
// keeps its debounce state behind a `parking_lot::Mutex`.

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod cli;
pub mod logging;
pub mod shader_watcher;

// Re-export the workspace crates for tests and embedding hosts
pub use backdrop_config as config;
pub use backdrop_layout as layout;
pub use backdrop_render as render;
