// The interaction core builds natively for its unit tests; only the browser
// entry point uses it outside of tests.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod content;
mod logging;
mod pointer;
mod reveal;
mod storage;
mod theme;
mod visitor;

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
