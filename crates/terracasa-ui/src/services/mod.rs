//! Browser transport: the REST client and translation bundle fetching.

pub mod api;
pub mod bundles;
