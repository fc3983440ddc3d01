//! Core, DOM-free primitives and helpers for the Web UI.
pub mod auth;
pub mod config;
pub mod http;
pub mod logic;
pub mod search;
pub mod storage;
pub mod store;
pub mod telemetry;
pub mod validation;
