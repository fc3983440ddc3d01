//! Country guides: list, overview and editorial sections.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
