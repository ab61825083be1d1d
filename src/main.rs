#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::suspicious)]

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    inflation_map::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("The tooltip runs in the browser; build it for wasm32. Use `update-map` to refresh the page.");
}
