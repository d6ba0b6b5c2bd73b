mod common;

use aspa_scope::aspa::AspaStore;
use aspa_scope::common::Afi;
use aspa_scope::path::sequence_path;
use aspa_scope::verify::{Direction, Verdict, check_downflow, check_upflow};
use common::{FormalOracle, FormalResult};

const V4: Afi = Afi::V4;

/// 検証AS (AS10) から見た参照例。
/// `received` は受信表記（先頭が隣接AS、末尾が起点AS）。
struct Example {
    label: &'static str,
    records: &'static [(u32, &'static [u32])],
    received: &'static [u32],
    direction: Direction,
    verdict: Verdict,
    formal: FormalResult,
}

const EXAMPLES: &[Example] = &[
    Example {
        label: "Ex1",
        records: &[(80, &[70]), (70, &[40]), (20, &[30])],
        received: &[20, 30, 40, 70, 80],
        direction: Direction::Downstream,
        verdict: Verdict::Unknown,
        formal: FormalResult::Valid,
    },
    Example {
        label: "Ex2",
        records: &[(80, &[70]), (70, &[40]), (20, &[30]), (90, &[30, 40])],
        received: &[20, 30, 90, 40, 70, 80],
        direction: Direction::Downstream,
        verdict: Verdict::Unknown,
        formal: FormalResult::Unknown,
    },
    Example {
        label: "Ex2b",
        records: &[
            (80, &[70]),
            (70, &[40]),
            (20, &[30]),
            (90, &[30, 40]),
            (30, &[]),
            (40, &[]),
        ],
        received: &[20, 30, 90, 40, 70, 80],
        direction: Direction::Downstream,
        verdict: Verdict::Invalid,
        formal: FormalResult::Invalid,
    },
    Example {
        label: "Ex3",
        records: &[(80, &[70]), (70, &[40]), (20, &[30])],
        received: &[20, 30, 90, 40, 70, 80],
        direction: Direction::Downstream,
        verdict: Verdict::Unknown,
        formal: FormalResult::Unknown,
    },
    Example {
        label: "Ex4",
        records: &[(70, &[80])],
        received: &[100, 30, 40, 50, 60, 70, 80],
        direction: Direction::Upstream,
        verdict: Verdict::Invalid,
        formal: FormalResult::Invalid,
    },
    Example {
        label: "Ex4-fixed",
        records: &[(70, &[80]), (60, &[70]), (30, &[100])],
        received: &[100, 30, 40, 50, 60, 70, 80],
        direction: Direction::Upstream,
        verdict: Verdict::Invalid,
        formal: FormalResult::Invalid,
    },
    Example {
        label: "Ex5",
        records: &[(40, &[30]), (30, &[20])],
        received: &[20, 30, 40],
        direction: Direction::Upstream,
        verdict: Verdict::Valid,
        formal: FormalResult::Valid,
    },
    Example {
        label: "Ex6",
        records: &[
            (120, &[110]),
            (110, &[100]),
            (100, &[90]),
            (80, &[90]),
            (60, &[50]),
            (40, &[50]),
            (30, &[40]),
            (20, &[30]),
        ],
        received: &[20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120],
        direction: Direction::Downstream,
        verdict: Verdict::Invalid,
        formal: FormalResult::Invalid,
    },
    Example {
        label: "Ex7",
        records: &[
            (20, &[30]),
            (30, &[40]),
            (40, &[50]),
            (80, &[90]),
            (90, &[100]),
            (110, &[100]),
            (120, &[110]),
            (130, &[120]),
            (140, &[130]),
        ],
        received: &[20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120, 130, 140],
        direction: Direction::Downstream,
        verdict: Verdict::Unknown,
        formal: FormalResult::Unknown,
    },
    Example {
        label: "Ex8",
        records: &[],
        received: &[20],
        direction: Direction::Downstream,
        verdict: Verdict::Valid,
        formal: FormalResult::Valid,
    },
    Example {
        label: "Ex9",
        records: &[],
        received: &[20],
        direction: Direction::Upstream,
        verdict: Verdict::Valid,
        formal: FormalResult::Valid,
    },
    Example {
        label: "Ex11",
        records: &[],
        received: &[20, 30],
        direction: Direction::Downstream,
        verdict: Verdict::Unknown,
        formal: FormalResult::Valid,
    },
    Example {
        label: "Ex12",
        records: &[],
        received: &[20, 30],
        direction: Direction::Upstream,
        verdict: Verdict::Unknown,
        formal: FormalResult::Unknown,
    },
    Example {
        label: "Ex13",
        records: &[
            (20, &[30]),
            (30, &[40]),
            (40, &[50]),
            (50, &[60]),
            (60, &[70]),
            (90, &[80]),
            (80, &[70]),
            (130, &[120]),
            (120, &[110]),
        ],
        received: &[20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120, 130],
        direction: Direction::Downstream,
        verdict: Verdict::Unknown,
        formal: FormalResult::Unknown,
    },
    Example {
        label: "Ex14",
        records: &[
            (20, &[30]),
            (30, &[40]),
            (40, &[50]),
            (50, &[60]),
            (60, &[70]),
            (90, &[80]),
            (80, &[70]),
            (130, &[120]),
            (120, &[110]),
            (100, &[90, 110]),
            (110, &[200]),
        ],
        received: &[20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120, 130],
        direction: Direction::Downstream,
        verdict: Verdict::Invalid,
        formal: FormalResult::Invalid,
    },
];

fn store_of(records: &[(u32, &[u32])]) -> AspaStore {
    let mut builder = AspaStore::builder();
    builder.family(V4);
    for (customer, providers) in records {
        builder.insert(V4, *customer, providers.iter().copied());
    }
    builder.build()
}

fn run(example: &Example) -> (Verdict, FormalResult) {
    let store = store_of(example.records);
    let origin_first: Vec<u32> = example.received.iter().rev().copied().collect();
    let path = sequence_path(&origin_first);
    let neighbor = example.received[0];
    let oracle = FormalOracle::new(&store, &origin_first);

    match example.direction {
        Direction::Upstream => (check_upflow(&store, &path, neighbor, V4), oracle.upstream()),
        _ => (
            check_downflow(&store, &path, neighbor, V4, false),
            oracle.downstream(),
        ),
    }
}

#[test]
fn reference_examples_verdicts() {
    for example in EXAMPLES {
        let (verdict, formal) = run(example);
        assert_eq!(verdict, example.verdict, "{}", example.label);
        assert_eq!(formal, example.formal, "{} (formal)", example.label);
        // Invalid かどうかは形式手順と必ず一致する
        assert_eq!(
            verdict == Verdict::Invalid,
            example.formal == FormalResult::Invalid,
            "{} (invalid agreement)",
            example.label
        );
    }
}

#[test]
fn single_pass_reports_unattested_ramp_as_unknown() {
    // 上りも下りも正しいが 40 -> 30 の頂点付近に証明なしのペアがある
    let example = &EXAMPLES[0];
    let (verdict, formal) = run(example);
    assert_eq!(verdict, Verdict::Unknown);
    assert_eq!(formal, FormalResult::Valid);

    // 証明なしの起点ASからの1ホップも Unknown
    let mut builder = AspaStore::builder();
    builder.insert(V4, 12389, [1273]);
    let store = builder.build();
    let path = sequence_path(&[1, 12389]);
    assert_eq!(check_downflow(&store, &path, 12389, V4, false), Verdict::Unknown);
}
