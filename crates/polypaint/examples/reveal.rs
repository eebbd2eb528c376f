//! Print the painting order for the demo scene or a random one.
//!
//! Usage:
//!   cargo run -p polypaint --example reveal
//!   cargo run -p polypaint --example reveal -- 5
//!
//! Each line is one reveal step: body, face, depth key.

use polypaint::prelude::*;

fn main() {
    let mut provider = GeometryProvider::with_seed(2025).expect("default sampler is valid");
    if let Some(arg) = std::env::args().nth(1) {
        if let Err(e) = provider.regenerate_from_input(&arg) {
            eprintln!("{e}; showing the demo scene");
        }
    }
    let scene = provider.snapshot();
    for (step, f) in sort_faces(&scene, Axis::Y).iter().enumerate() {
        println!(
            "step {step:>3}: body {} face {} key {:+.3}",
            f.source.body, f.source.face, f.key
        );
    }
}
