#![no_main]

use evo_checkpoints::Checkpoints;
use libfuzzer_sys::fuzz_target;

// Fuzz batch loading: pins never change once set, skipped heights never land,
// and the reorg guard never lets a candidate at or below the governing pin through.
fuzz_target!(|data: &[u8]| {
    let mut pairs = Vec::new();
    for chunk in data.chunks_exact(3) {
        let height = u16::from_le_bytes([chunk[0], chunk[1]]) as u64;
        pairs.push((height, [chunk[2]; 32]));
    }
    let (seed, batch) = pairs.split_at(pairs.len() / 2);

    let mut cp = Checkpoints::new();
    let _ = cp.load_ordered(seed.iter().copied());
    let before = cp.clone();
    let prev_max = cp.get_max_height().ok();

    let _ = cp.load_ordered(batch.iter().copied());

    for (height, hash) in before.get_points() {
        if cp.get_points().get(height) != Some(hash) {
            panic!("pinned checkpoint changed at height {height}");
        }
    }
    if let Some(max) = prev_max {
        for height in cp.get_points().keys() {
            if *height <= max && !before.get_points().contains_key(height) {
                panic!("batch wrote below prior max at height {height}");
            }
        }
    }

    for (tip, candidate) in batch.iter().map(|(h, _)| *h).zip(seed.iter().map(|(h, _)| *h)) {
        if !cp.is_alternative_block_allowed(tip, candidate) {
            continue;
        }
        if candidate == 0 {
            panic!("genesis replacement allowed");
        }
        if let Some((pin, _)) = cp.get_points().range(..=tip).next_back() {
            if candidate <= *pin {
                panic!("reorg below checkpoint {pin} allowed");
            }
        }
    }
});
