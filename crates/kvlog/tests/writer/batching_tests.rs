use super::test_utilities::{DOMAIN, make_record, memory_writer, test_config, writer_for};
use kvlog::store::InMemoryStore;
use std::num::NonZeroUsize;
use std::sync::Arc;
use test_log::test;

#[test]
fn thirty_records_make_two_calls_in_order() {
    let (store, writer) = memory_writer();
    let records: Vec<_> = (0..30).map(make_record).collect();

    let summary = writer.write(&records).unwrap();
    assert_eq!(summary.records, 30);
    assert_eq!(summary.batches, 2);

    let calls = store.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].items.len(), 25);
    assert_eq!(calls[1].items.len(), 5);
    assert!(calls.iter().all(|c| c.domain == DOMAIN));

    let messages: Vec<_> = store
        .items(DOMAIN)
        .iter()
        .map(|item| item.attribute("msg").unwrap().to_string())
        .collect();
    let expected: Vec<_> = (0..30).map(|i| format!("request {i}")).collect();
    assert_eq!(messages, expected);
}

#[test]
fn zero_records_make_no_calls() {
    let (store, writer) = memory_writer();
    let summary = writer.write(&[]).unwrap();
    assert_eq!(summary.batches, 0);
    assert_eq!(store.call_count(), 0);
}

#[test]
fn batch_boundaries() {
    for &(n, batch, expected_calls) in &[
        (1usize, 25usize, 1usize),
        (25, 25, 1),
        (26, 25, 2),
        (50, 25, 2),
        (51, 25, 3),
        (7, 1, 7),
        (7, 100, 1),
    ] {
        let store = Arc::new(InMemoryStore::new());
        let config = test_config().with_max_batch_items(NonZeroUsize::new(batch).unwrap());
        let writer = writer_for(store.clone(), config);
        let records: Vec<_> = (0..n).map(make_record).collect();

        writer.write(&records).unwrap();

        let sizes: Vec<_> = store.calls().iter().map(|c| c.items.len()).collect();
        assert_eq!(sizes.len(), expected_calls, "n={n} batch={batch}");
        let (last, full) = sizes.split_last().unwrap();
        assert!(full.iter().all(|s| *s == batch));
        assert!(*last >= 1 && *last <= batch);
        assert_eq!(sizes.iter().sum::<usize>(), n);
    }
}

#[test]
fn every_record_gets_a_fresh_key() {
    let (store, writer) = memory_writer();
    let records: Vec<_> = (0..60).map(make_record).collect();
    writer.write(&records).unwrap();
    writer.write(&records[..3]).unwrap();

    let keys: Vec<_> = store.items(DOMAIN).into_iter().map(|i| i.key).collect();
    let expected: Vec<_> = (0..63).map(|i| format!("rec-{i}")).collect();
    assert_eq!(keys, expected);
}

#[test]
fn default_writer_uses_uuid_keys() {
    let store = Arc::new(InMemoryStore::new());
    let writer = kvlog::RecordWriter::new(store.clone(), test_config()).unwrap();
    writer.write(&[make_record(0), make_record(1)]).unwrap();

    let items = store.items(DOMAIN);
    assert_ne!(items[0].key, items[1].key);
    for item in &items {
        assert!(uuid::Uuid::parse_str(&item.key).is_ok());
    }
}
