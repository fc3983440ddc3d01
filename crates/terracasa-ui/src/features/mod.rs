//! Feature slices. Each keeps DOM-free state beside a wasm-only view.
pub mod auth;
pub mod countries;
pub mod listing;
pub mod network;
pub mod partners;
pub mod profile;
pub mod properties;
