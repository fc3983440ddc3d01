//! Property search feature.
//!
//! # Design
//! - Filter inputs stay raw strings until a search is submitted.
//! - Paging and accumulation come from the shared search controller.
//! - Price inputs are major units on screen and minor units on the wire.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
