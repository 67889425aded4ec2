pub mod traits;

#[cfg(not(target_arch = "wasm32"))]
pub mod png;
