//! Signed-in user's profile page and password change.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
