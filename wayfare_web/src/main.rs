// Binary target so Trunk has something to build for wasm32. Anywhere else
// there is nothing to run; the binder lives behind `--features web`.

fn main() {
    // No-op on native targets.
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    wayfare_web::start();
}
