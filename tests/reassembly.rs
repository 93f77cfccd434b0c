//! Integration tests for the fragment reassembly engine.

use smstitch::config::{ColumnSpec, ReassemblyConfig};
use smstitch::core::{build_candidate_graph, find_components, reassemble};
use smstitch::io::{read_log, write_rows};
use smstitch::record::{parse_timestamp, Record};

fn record(phone: &str, ts: &str, text: &str) -> Record {
    Record::new(
        phone,
        parse_timestamp(ts).unwrap(),
        text,
        vec![phone.into(), ts.into(), text.into()],
    )
}

// =========================================================================
// Merge scenarios
// =========================================================================

#[test]
fn incomplete_text_merges_with_close_neighbor() {
    let records = vec![
        record("77010000001", "2025-05-01T12:00:00", "Sizge 123 kody bar"),
        record("77010000001", "2025-05-01T12:00:05", "keldi."),
    ];
    let rows = reassemble(&records, &ReassemblyConfig::new(), 1, 2);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][2], "Sizge 123 kody bar keldi.");
    assert_eq!(rows[0][1], "2025-05-01T12:00:05");
}

#[test]
fn complete_texts_without_shared_tokens_stay_apart() {
    let records = vec![
        record("77010000001", "2025-05-01T12:00:00", "Birinshi habar!"),
        record("77010000001", "2025-05-01T12:00:03", "Ekinshi habar?"),
    ];
    let rows = reassemble(&records, &ReassemblyConfig::new(), 1, 2);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], records[0].row);
    assert_eq!(rows[1], records[1].row);
}

#[test]
fn out_of_order_two_part_delivery_is_repaired() {
    // the continuation carries the earlier timestamp; the opener arrives
    // later but must lead the merged text
    let records = vec![
        record("77010000001", "2025-05-01T12:00:00", "AB12.Kod posylki 9"),
        record("77010000001", "2025-05-01T12:00:04", "Sizge salemdeme keldi"),
    ];
    let rows = reassemble(&records, &ReassemblyConfig::new(), 1, 2);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][2], "Sizge salemdeme keldiAB12.Kod posylki 9");
}

#[test]
fn chain_of_shared_tokens_merges_transitively() {
    // A-B and B-C each share two tokens; A and C are 30s apart and share
    // nothing, yet transitive closure pulls all three together
    let records = vec![
        record("77010000001", "2025-05-01T12:00:00", "Kod CN168298188KZ pin 482913."),
        record(
            "77010000001",
            "2025-05-01T12:00:15",
            "Qayta CN168298188KZ pin 482913 jane EH700144202KZ nomer 555777.",
        ),
        record("77010000001", "2025-05-01T12:00:30", "Jonelti EH700144202KZ rastau 555777."),
    ];
    let graph = build_candidate_graph(&records, &ReassemblyConfig::new());
    assert!(graph[0].contains(&1));
    assert!(graph[1].contains(&2));
    assert!(!graph[0].contains(&2));

    let rows = reassemble(&records, &ReassemblyConfig::new(), 1, 2);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "2025-05-01T12:00:30");
}

#[test]
fn merge_concatenates_in_ascending_timestamp_order() {
    let records = vec![
        record("77010000001", "2025-05-01T12:00:10", "gamma."),
        record("77010000001", "2025-05-01T12:00:00", "alpha"),
        record("77010000001", "2025-05-01T12:00:05", "beta"),
    ];
    let rows = reassemble(&records, &ReassemblyConfig::new(), 1, 2);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][2], "alpha beta gamma.");
}

// =========================================================================
// Partition properties
// =========================================================================

#[test]
fn clusters_partition_the_record_set() {
    let records = vec![
        record("700", "2025-05-01T12:00:00", "Sizge kody"),
        record("700", "2025-05-01T12:00:05", "bar keldi."),
        record("700", "2025-05-01T13:00:00", "Bolek habar."),
        record("701", "2025-05-01T12:00:00", "Basqa nomer"),
        record("702", "2025-05-01T12:00:01", "Jane biri."),
    ];
    let graph = build_candidate_graph(&records, &ReassemblyConfig::new());
    let components = find_components(&graph);

    let mut all: Vec<usize> = components.iter().flatten().copied().collect();
    all.sort_unstable();
    assert_eq!(all, (0..records.len()).collect::<Vec<_>>());
}

#[test]
fn edges_stay_inside_one_phone_and_window() {
    let records = vec![
        record("700", "2025-05-01T12:00:00", "Birinshi bolik"),
        record("700", "2025-05-01T12:00:10", "ekinshi bolik"),
        record("700", "2025-05-01T12:10:00", "alys bolik"),
        record("701", "2025-05-01T12:00:01", "basqa nomer boligi"),
    ];
    let config = ReassemblyConfig::new();
    let graph = build_candidate_graph(&records, &config);

    for (i, neighbors) in graph.iter().enumerate() {
        for &j in neighbors {
            assert_eq!(records[i].phone, records[j].phone);
            let delta = (records[j].timestamp - records[i].timestamp)
                .num_seconds()
                .abs();
            assert!(delta <= config.time_window_secs);
        }
    }
}

#[test]
fn adjacency_is_symmetric() {
    let records = vec![
        record("700", "2025-05-01T12:00:00", "bolik bir"),
        record("700", "2025-05-01T12:00:05", "bolik eki"),
        record("700", "2025-05-01T12:00:09", "bolik ush"),
    ];
    let graph = build_candidate_graph(&records, &ReassemblyConfig::new());
    for (i, neighbors) in graph.iter().enumerate() {
        for &j in neighbors {
            assert!(graph[j].contains(&i), "edge {i}-{j} missing its reverse");
        }
    }
}

// =========================================================================
// File round trip
// =========================================================================

#[test]
fn file_round_trip_preserves_singletons_and_merges_fragments() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("delivery.csv");
    let output = dir.path().join("merged.csv");

    std::fs::write(
        &input,
        "traffic_type\tphone\tsend_date\tmessage\n\
         NOTIFY\t77010000001\t2025-05-01T12:00:00\tSizge 123 kody bar\n\
         NOTIFY\t77010000001\t2025-05-01T12:00:05\tkeldi.\n\
         SERVICE\t77020000002\t2025-05-01T12:00:00\tBolek toly habar.\n\
         BROKEN\t\t2025-05-01T12:00:00\tjoq nomer\n",
    )
    .unwrap();

    let columns = ColumnSpec::new();
    let log = read_log(&input, &columns).unwrap();
    assert_eq!(log.records.len(), 3);
    assert_eq!(log.skipped, 1);

    let rows = reassemble(&log.records, &ReassemblyConfig::new(), log.date_idx, log.msg_idx);
    write_rows(&output, &log.header, &rows).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3); // header + merged + singleton
    assert_eq!(lines[0], "traffic_type\tphone\tsend_date\tmessage");
    assert_eq!(
        lines[1],
        "NOTIFY\t77010000001\t2025-05-01T12:00:05\tSizge 123 kody bar keldi."
    );
    // the singleton row survives byte-for-byte
    assert_eq!(lines[2], "SERVICE\t77020000002\t2025-05-01T12:00:00\tBolek toly habar.");
}

#[test]
fn empty_log_produces_header_only_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.csv");
    let output = dir.path().join("merged.csv");
    std::fs::write(&input, "phone\tsend_date\tmessage\n").unwrap();

    let log = read_log(&input, &ColumnSpec::new()).unwrap();
    let rows = reassemble(&log.records, &ReassemblyConfig::new(), log.date_idx, log.msg_idx);
    write_rows(&output, &log.header, &rows).unwrap();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "phone\tsend_date\tmessage\n"
    );
}
