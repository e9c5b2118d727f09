use crate::checkpoints::{BlockCheck, Checkpoints};
use crate::error::ErrorCode;
use crate::hash::{hash_to_hex, parse_hash_hex, Hash};
use crate::network::{Network, MAINNET_CHECKPOINTS};

fn h(b: u8) -> Hash {
    [b; 32]
}

fn with_points(points: &[(u64, u8)]) -> Checkpoints {
    let mut cp = Checkpoints::new();
    for (height, b) in points {
        cp.add(*height, h(*b)).expect("add");
    }
    cp
}

#[test]
fn max_height_tracks_largest_key() {
    let pairs: &[(u64, u64)] = &[
        (100, 200),
        (0, 1),
        (0, u64::MAX),
        (u64::MAX - 1, u64::MAX),
        (1, 1_000_000),
        (41, 42),
    ];
    for &(lo, hi) in pairs {
        let mut ascending = Checkpoints::new();
        ascending.add(lo, h(1)).expect("add lo");
        ascending.add(hi, h(2)).expect("add hi");
        assert_eq!(ascending.get_max_height().expect("max"), hi, "{lo} then {hi}");

        let mut descending = Checkpoints::new();
        descending.add(hi, h(2)).expect("add hi");
        descending.add(lo, h(1)).expect("add lo");
        assert_eq!(descending.get_max_height().expect("max"), hi, "{hi} then {lo}");
    }
}

#[test]
fn max_height_on_empty_table_is_an_error() {
    let err = Checkpoints::new().get_max_height().unwrap_err();
    assert_eq!(err.code, ErrorCode::NoCheckpoints);
}

#[test]
fn add_same_hash_twice_is_idempotent() {
    let mut cp = Checkpoints::new();
    cp.add(7, h(0xaa)).expect("first add");
    cp.add(7, h(0xaa)).expect("second add");
    assert_eq!(cp.len(), 1);
}

#[test]
fn add_conflicting_hash_fails_and_keeps_table() {
    let mut cp = with_points(&[(7, 0xaa)]);
    let before = cp.clone();

    let err = cp.add(7, h(0xbb)).unwrap_err();
    assert_eq!(err.code, ErrorCode::Conflict);
    assert!(err.msg.contains("height 7"));
    assert_eq!(cp, before);
    assert_eq!(cp.get_points().get(&7), Some(&h(0xaa)));
}

#[test]
fn add_hex_rejects_malformed_hash() {
    let mut cp = Checkpoints::new();

    let err = cp.add_hex(1, "abcd").unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedInput);

    let not_hex = "zz".repeat(32);
    let err = cp.add_hex(1, &not_hex).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedInput);

    assert!(cp.is_empty());
}

#[test]
fn add_hex_accepts_upper_case() {
    let mut cp = Checkpoints::new();
    cp.add_hex(3, &"AB".repeat(32)).expect("add upper");
    assert_eq!(cp.get_points().get(&3), Some(&h(0xab)));
}

#[test]
fn checkpoint_zone() {
    let empty = Checkpoints::new();
    assert!(!empty.is_in_checkpoint_zone(0));
    assert!(!empty.is_in_checkpoint_zone(u64::MAX));

    let cp = with_points(&[(10, 1), (20, 2)]);
    assert!(cp.is_in_checkpoint_zone(0));
    assert!(cp.is_in_checkpoint_zone(15));
    assert!(cp.is_in_checkpoint_zone(20));
    assert!(!cp.is_in_checkpoint_zone(21));
}

#[test]
fn check_block_outcomes() {
    let cp = with_points(&[(100, 1)]);

    assert_eq!(
        cp.check_block(100, &h(1)),
        BlockCheck {
            passed: true,
            is_checkpoint: true
        }
    );
    assert_eq!(
        cp.check_block(100, &h(2)),
        BlockCheck {
            passed: false,
            is_checkpoint: true
        }
    );
    assert_eq!(
        cp.check_block(101, &h(2)),
        BlockCheck {
            passed: true,
            is_checkpoint: false
        }
    );
    assert!(cp.check_block_hash(100, &h(1)));
    assert!(!cp.check_block_hash(100, &h(9)));
}

#[test]
fn alternative_block_never_replaces_genesis() {
    let empty = Checkpoints::new();
    assert!(!empty.is_alternative_block_allowed(0, 0));
    assert!(!empty.is_alternative_block_allowed(1_000, 0));

    let cp = with_points(&[(100, 1), (200, 2)]);
    assert!(!cp.is_alternative_block_allowed(150, 0));
}

#[test]
fn alternative_block_reorg_depth_guard() {
    let cp = with_points(&[(100, 1), (200, 2)]);

    assert!(cp.is_alternative_block_allowed(150, 101));
    assert!(!cp.is_alternative_block_allowed(150, 50));
    assert!(!cp.is_alternative_block_allowed(150, 100));

    // Tip before the first checkpoint: nothing to guard.
    assert!(cp.is_alternative_block_allowed(50, 10));
    assert!(cp.is_alternative_block_allowed(99, 1));

    // Tip exactly on a checkpoint uses that checkpoint.
    assert!(!cp.is_alternative_block_allowed(200, 200));
    assert!(cp.is_alternative_block_allowed(200, 201));
    assert!(!cp.is_alternative_block_allowed(250, 150));
}

#[test]
fn alternative_block_on_empty_table_is_allowed() {
    let cp = Checkpoints::new();
    assert!(cp.is_alternative_block_allowed(10, 5));
}

#[test]
fn check_for_conflicts_compares_shared_heights_only() {
    let ours = with_points(&[(100, 1), (200, 2)]);

    let agreeing = with_points(&[(100, 1), (300, 3)]);
    ours.check_for_conflicts(&agreeing).expect("compatible");

    let disagreeing = with_points(&[(100, 9)]);
    let err = ours.check_for_conflicts(&disagreeing).unwrap_err();
    assert_eq!(err.code, ErrorCode::Conflict);

    // Pure check: nothing merged.
    assert_eq!(ours.len(), 2);
    assert!(!ours.get_points().contains_key(&300));
}

#[test]
fn load_ordered_skips_heights_at_or_below_prior_max() {
    let mut cp = with_points(&[(100, 1)]);

    cp.load_ordered(vec![(50, h(5)), (100, h(1)), (100, h(7)), (150, h(3))])
        .expect("load");

    assert_eq!(cp.len(), 2);
    assert!(!cp.get_points().contains_key(&50));
    assert_eq!(cp.get_points().get(&100), Some(&h(1)));
    assert_eq!(cp.get_points().get(&150), Some(&h(3)));
}

#[test]
fn load_ordered_on_empty_table_skips_nothing() {
    let mut cp = Checkpoints::new();
    cp.load_ordered(vec![(0, h(1)), (10, h(2))]).expect("load");
    assert_eq!(cp.len(), 2);
    assert_eq!(cp.get_max_height().expect("max"), 10);
}

#[test]
fn load_ordered_fails_fast_on_conflict() {
    let mut cp = with_points(&[(100, 1)]);

    let err = cp
        .load_ordered(vec![(150, h(2)), (160, h(3)), (150, h(4)), (170, h(5))])
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Conflict);

    assert_eq!(cp.get_points().get(&150), Some(&h(2)));
    assert_eq!(cp.get_points().get(&160), Some(&h(3)));
    assert!(!cp.get_points().contains_key(&170));
}

#[test]
fn load_ordered_hex_aborts_at_malformed_entry() {
    let mut cp = Checkpoints::new();
    let good = hash_to_hex(&h(1));

    let err = cp
        .load_ordered_hex(vec![
            (1, good.clone()),
            (2, "nothex".to_string()),
            (3, good),
        ])
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedInput);
    assert!(err.msg.contains("height 2"));
    assert_eq!(cp.len(), 1);
}

#[test]
fn network_tables_feed_constructor() {
    let mainnet = Checkpoints::for_network(Network::Mainnet).expect("mainnet");
    assert_eq!(mainnet.len(), MAINNET_CHECKPOINTS.len());
    let genesis = parse_hash_hex(MAINNET_CHECKPOINTS[0].1).expect("genesis hex");
    assert!(mainnet.check_block_hash(0, &genesis));
    assert!(!mainnet.is_alternative_block_allowed(5, 0));

    for net in [
        Network::Testnet,
        Network::Stagenet,
        Network::Fakechain,
        Network::Undefined,
    ] {
        assert!(Checkpoints::for_network(net).expect("table").is_empty());
    }
}

#[test]
fn network_names_round_trip() {
    for net in [
        Network::Mainnet,
        Network::Testnet,
        Network::Stagenet,
        Network::Fakechain,
        Network::Undefined,
    ] {
        assert_eq!(net.as_str().parse::<Network>().expect("parse"), net);
    }
    let err = "regtest".parse::<Network>().unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedInput);
}
