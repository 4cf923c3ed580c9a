use super::test_utilities::{BASE_MILLIS, DOMAIN, memory_writer, test_config, writer_for};
use kvlog::store::InMemoryStore;
use kvlog::{LogRecord, TextEncoding, TimeZoneSetting};
use std::sync::Arc;
use test_log::test;

#[test]
fn long_ascii_message_is_cut_to_budget() {
    let (store, writer) = memory_writer();
    let record = LogRecord::new(BASE_MILLIS).with_message("a".repeat(2000));

    let summary = writer.write(&[record]).unwrap();
    assert_eq!(summary.truncated_attributes, 1);

    let items = store.items(DOMAIN);
    let msg = items[0].attribute("msg").unwrap();
    assert_eq!(msg.len(), 1024);
    assert_eq!(msg.chars().count(), 1024);
}

#[test]
fn multibyte_message_is_cut_on_character_boundary() {
    let (store, writer) = memory_writer();
    let original = "€".repeat(700);
    let record = LogRecord::new(BASE_MILLIS).with_message(original.clone());

    writer.write(&[record]).unwrap();

    let items = store.items(DOMAIN);
    let msg = items[0].attribute("msg").unwrap();
    assert!(msg.len() <= 1024);
    assert!(original.starts_with(msg));
    assert_eq!(msg.chars().count(), 341);
}

#[test]
fn every_attribute_respects_the_budget() {
    let store = Arc::new(InMemoryStore::new());
    let writer = writer_for(store.clone(), test_config().with_max_attribute_bytes(10));
    let record = LogRecord::new(BASE_MILLIS)
        .with_host("a-very-long-hostname")
        .with_logger("日本語のロガー")
        .with_mdc("trace", "0123456789abcdef");

    let summary = writer.write(&[record]).unwrap();
    assert_eq!(summary.truncated_attributes, 4);

    let items = store.items(DOMAIN);
    for attribute in &items[0].attributes {
        assert!(attribute.value.len() <= 10, "{attribute:?}");
    }
    assert_eq!(items[0].attribute("host"), Some("a-very-lon"));
    assert_eq!(items[0].attribute("logger"), Some("日本語"));
    assert_eq!(items[0].attribute("time"), Some("2024-03-15"));
}

#[test]
fn utf16_budget_is_measured_in_utf16_bytes() {
    let store = Arc::new(InMemoryStore::with_limits(kvlog::store::StoreLimits {
        max_batch_items: 25,
        max_attribute_bytes: 8,
        encoding: TextEncoding::Utf16,
    }));
    let config = test_config()
        .with_max_attribute_bytes(8)
        .with_encoding(TextEncoding::Utf16);
    let writer = writer_for(store.clone(), config);

    writer
        .write(&[LogRecord::new(BASE_MILLIS).with_message("日本語のロガー")])
        .unwrap();
    assert_eq!(store.items(DOMAIN)[0].attribute("msg"), Some("日本語の"));
}

#[test]
fn mdc_entries_become_prefixed_attributes() {
    let (store, writer) = memory_writer();
    let without = LogRecord::new(BASE_MILLIS).with_message("no mdc");
    let with = LogRecord::new(BASE_MILLIS).with_mdc("userId", "42");

    writer.write(&[without, with]).unwrap();

    let items = store.items(DOMAIN);
    assert!(!items[0].attribute_names().iter().any(|n| n.starts_with("mdc.")));

    let mdc: Vec<_> = items[1]
        .attributes
        .iter()
        .filter(|a| a.name.starts_with("mdc."))
        .collect();
    assert_eq!(mdc.len(), 1);
    assert_eq!(mdc[0].name, "mdc.userId");
    assert_eq!(mdc[0].value, "42");
}

#[test]
fn absent_fields_never_produce_attributes() {
    let (store, writer) = memory_writer();
    let records = vec![
        LogRecord::new(BASE_MILLIS).with_host("h"),
        LogRecord::new(BASE_MILLIS).with_level("ERROR").with_context("ctx"),
        LogRecord::new(BASE_MILLIS),
    ];
    writer.write(&records).unwrap();

    let names: Vec<Vec<String>> = store
        .items(DOMAIN)
        .iter()
        .map(|i| i.attributes.iter().map(|a| a.name.clone()).collect())
        .collect();
    assert_eq!(
        names,
        vec![
            vec!["host".to_string(), "time".to_string()],
            vec!["level".to_string(), "context".to_string(), "time".to_string()],
            vec!["time".to_string()],
        ]
    );
}

#[test]
fn configured_zone_controls_time_rendering() {
    let store = Arc::new(InMemoryStore::new());
    let mut writer = writer_for(store.clone(), test_config());
    let record = LogRecord::new(BASE_MILLIS);

    writer.write(std::slice::from_ref(&record)).unwrap();
    writer.set_time_zone("America/Los_Angeles".parse::<TimeZoneSetting>().unwrap());
    writer.write(std::slice::from_ref(&record)).unwrap();

    let times: Vec<_> = store
        .items(DOMAIN)
        .iter()
        .map(|i| i.attribute("time").unwrap().to_string())
        .collect();
    assert_eq!(
        times,
        vec!["2024-03-15T17:30:00.000Z", "2024-03-15T10:30:00.000-07:00"]
    );
}

#[test]
fn writers_with_different_zones_are_independent() {
    let store = Arc::new(InMemoryStore::new());
    let utc = writer_for(store.clone(), test_config());
    let mut tokyo = writer_for(store.clone(), test_config());
    tokyo.set_time_zone_str("Asia/Tokyo").unwrap();

    let record = LogRecord::new(BASE_MILLIS);
    utc.write(std::slice::from_ref(&record)).unwrap();
    tokyo.write(std::slice::from_ref(&record)).unwrap();

    let items = store.items(DOMAIN);
    assert_eq!(items[0].attribute("time"), Some("2024-03-15T17:30:00.000Z"));
    assert_eq!(
        items[1].attribute("time"),
        Some("2024-03-16T02:30:00.000+09:00")
    );
}
