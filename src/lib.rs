//! Shared UI models for the wayfare site front-end.
//!
//! Keeping the menu state machine out of the wasm-only crate allows us to
//! unit-test the navigation behavior on the host.

pub mod menu;
