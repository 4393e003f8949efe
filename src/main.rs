// Pure behavior modules; compiled for host tests too.
#[cfg(any(test, target_arch = "wasm32"))]
mod counter;
#[cfg(any(test, target_arch = "wasm32"))]
mod menu;
#[cfg(any(test, target_arch = "wasm32"))]
mod notice;
#[cfg(any(test, target_arch = "wasm32"))]
mod validate;

#[cfg(target_arch = "wasm32")]
mod contact;
#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(target_arch = "wasm32")]
mod visibility;
#[cfg(target_arch = "wasm32")]
mod widgets;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
