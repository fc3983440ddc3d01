//! Post-ad wizard for partners publishing a property.
//!
//! # Design
//! - Six sections validated one at a time; going back is always allowed.
//! - The request body is assembled only from a fully valid form.
//! - Images are counted and listed by name; uploading is out of scope.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
