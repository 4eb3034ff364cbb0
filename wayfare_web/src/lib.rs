//! Wires the mobile menu to the page once the document is parsed.
//!
//! Everything DOM-facing sits behind the `web` feature and a wasm32 target;
//! on any other build this crate compiles to an empty shell, which keeps
//! host-side `cargo test` runs free of any wasm toolchain requirement.

/// Placeholder so non-wasm builds export at least one item.
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
pub fn placeholder() {
    // No-op.
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
