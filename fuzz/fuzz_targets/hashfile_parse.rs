#![no_main]

use std::io::Write;

use evo_checkpoints::{load_checkpoints_from_json, Checkpoints};
use libfuzzer_sys::fuzz_target;

// Arbitrary hashfile bytes must produce Ok or a CheckpointError, never a panic.
fuzz_target!(|data: &[u8]| {
    let path = std::env::temp_dir().join(format!(
        "evo-checkpoints-fuzz-{}.json",
        std::process::id()
    ));
    let Ok(mut f) = std::fs::File::create(&path) else {
        return;
    };
    if f.write_all(data).is_err() {
        return;
    }
    drop(f);

    let mut cp = Checkpoints::new();
    let _ = load_checkpoints_from_json(&mut cp, &path);
    let _ = std::fs::remove_file(&path);
});
