//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `bijou_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use bijou_core::{AccessoryDraft, MemoryStorage, Wardrobe};

fn main() {
    // Why: keep a tiny CLI probe to validate core crate wiring independently
    // from Flutter/FFI runtime setup.
    println!("bijou_core ping={}", bijou_core::ping());
    println!("bijou_core version={}", bijou_core::core_version());

    let mut wardrobe = Wardrobe::open(Box::new(MemoryStorage::new()));
    let added = wardrobe
        .add(AccessoryDraft::new("smoke necklace", "data:blob"))
        .is_ok();
    println!(
        "bijou_core roundtrip added={} count={}",
        added,
        wardrobe.list(None).count()
    );
}
