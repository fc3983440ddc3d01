//! Authentication feature: login/register tabs and password recovery.
//!
//! # Design
//! - Forms validate locally into request bodies; nothing reaches the API with field errors.
//! - Successful login or registration persists the session and redirects to the profile page.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
