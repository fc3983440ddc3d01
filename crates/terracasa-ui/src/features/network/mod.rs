//! Partner network search feature.
//!
//! # Design
//! - Location, category and language filters go to the server.
//! - Trust and availability refinements are applied to each received page.
//! - The first load shows only highly rated partners.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
