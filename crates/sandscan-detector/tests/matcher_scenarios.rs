use sandscan_core::{Direction, TransactionRecord};
use sandscan_detector::{detect_sandwiches, DetectionOptions, PatternMatcher, PatternType};

fn dex(sig: &str, ts: i64, dir: Direction) -> TransactionRecord {
    TransactionRecord::new(sig, ts, dir, true)
}

#[test]
fn single_buy_sell_window() {
    let txs = vec![
        dex("a", 100, Direction::Buy),
        dex("b", 101, Direction::Buy),
        dex("c", 103, Direction::Sell),
    ];
    let res = detect_sandwiches(txs, &DetectionOptions::default());
    assert_eq!(res.potential_sandwiches.len(), 1);
    let s = &res.potential_sandwiches[0];
    assert_eq!(s.pattern_type, PatternType::new(Direction::Buy, Direction::Sell));
    assert_eq!(s.time_diffs, [1.0, 2.0]);
    assert_eq!(s.front().signature, "a");
    assert_eq!(s.victim().signature, "b");
    assert_eq!(s.back().signature, "c");
}

#[test]
fn mismatched_front_is_rejected_next_window_matches() {
    let txs = vec![
        dex("a", 100, Direction::Buy),
        dex("b", 101, Direction::Sell),
        dex("c", 102, Direction::Sell),
        dex("d", 104, Direction::Buy),
    ];
    let res = detect_sandwiches(txs, &DetectionOptions::default());
    assert_eq!(res.potential_sandwiches.len(), 1);
    let s = &res.potential_sandwiches[0];
    assert_eq!(s.pattern_type.to_string(), "sell-buy");
    assert_eq!(s.time_diffs, [1.0, 2.0]);
    assert_eq!(s.front().signature, "b");
}

#[test]
fn two_transactions_yield_nothing() {
    let txs = vec![dex("a", 100, Direction::Buy), dex("b", 101, Direction::Buy)];
    let res = detect_sandwiches(txs, &DetectionOptions::default());
    assert!(res.potential_sandwiches.is_empty());
    assert_eq!(res.transactions.len(), 2);

    let a = dex("a", 1, Direction::Buy);
    let b = dex("b", 2, Direction::Buy);
    assert!(PatternMatcher::default().find_candidates(&[&a, &b]).is_empty());
    assert!(PatternMatcher::default().find_candidates(&[]).is_empty());
}

#[test]
fn disjoint_windows_within_bound() {
    let txs = vec![
        dex("a", 100, Direction::Buy),
        dex("b", 101, Direction::Buy),
        dex("c", 102, Direction::Sell),
        dex("d", 105, Direction::Buy),
        dex("e", 106, Direction::Buy),
        dex("f", 107, Direction::Sell),
    ];
    let opts = DetectionOptions::default().max_bracket_seconds(Some(3.0));
    let res = detect_sandwiches(txs, &opts);
    let fronts: Vec<_> = res.potential_sandwiches.iter().map(|s| s.front().signature.as_str()).collect();
    assert_eq!(fronts, vec!["a", "d"]);
}

#[test]
fn bracket_bound_rejects_slow_back_run() {
    let txs = vec![
        dex("a", 100, Direction::Buy),
        dex("b", 101, Direction::Buy),
        dex("c", 110, Direction::Sell),
    ];
    let bounded = DetectionOptions::default().max_bracket_seconds(Some(5.0));
    assert!(detect_sandwiches(txs.clone(), &bounded).potential_sandwiches.is_empty());
    // sem limite o mesmo trio é aceito
    assert_eq!(detect_sandwiches(txs, &DetectionOptions::default()).potential_sandwiches.len(), 1);
}

#[test]
fn non_dex_noise_does_not_break_adjacency() {
    let txs = vec![
        dex("a", 100, Direction::Buy),
        TransactionRecord::new("noise", 100, Direction::Sell, false),
        dex("b", 101, Direction::Buy),
        TransactionRecord::new("unknown", 102, Direction::Unknown, true),
        dex("c", 103, Direction::Sell),
    ];
    let res = detect_sandwiches(txs, &DetectionOptions::default());
    assert_eq!(res.transactions.len(), 5);
    assert_eq!(res.potential_sandwiches.len(), 1);
    assert_eq!(res.potential_sandwiches[0].victim().signature, "b");
}

#[test]
fn including_unknown_direction_can_break_windows() {
    let txs = vec![
        dex("a", 100, Direction::Buy),
        dex("b", 101, Direction::Buy),
        TransactionRecord::new("u", 102, Direction::Unknown, true),
        dex("c", 103, Direction::Sell),
    ];
    let opts = DetectionOptions::default().include_unknown_direction(true);
    assert!(detect_sandwiches(txs, &opts).potential_sandwiches.is_empty());
}

#[test]
fn unsorted_input_is_sorted_before_matching() {
    let txs = vec![
        dex("c", 103, Direction::Sell),
        dex("a", 100, Direction::Buy),
        dex("b", 101, Direction::Buy),
    ];
    let res = detect_sandwiches(txs, &DetectionOptions::default());
    let order: Vec<_> = res.transactions.iter().map(|t| t.signature.as_str()).collect();
    assert_eq!(order, vec!["a", "b", "c"]);
    assert_eq!(res.potential_sandwiches.len(), 1);
}

#[test]
fn records_missing_timestamp_stay_in_full_list_only() {
    let mut orphan = dex("orphan", 0, Direction::Buy);
    orphan.timestamp = None;
    let txs = vec![
        dex("a", 100, Direction::Buy),
        orphan,
        dex("b", 101, Direction::Buy),
        dex("c", 102, Direction::Sell),
    ];
    let res = detect_sandwiches(txs, &DetectionOptions::default());
    assert_eq!(res.transactions.last().unwrap().signature, "orphan");
    assert_eq!(res.potential_sandwiches.len(), 1);
}
