//! Public partner profile: reviews feed, review form and contact form.
//!
//! # Design
//! - Reviews page through the shared search controller keyed by partner id.
//! - Forms validate locally and only produce request bodies when valid.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
