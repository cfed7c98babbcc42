//! Query semantics: pagination, tag filtering, search, tag universe.
//! Listing, search, and filtering must all agree on the same record set.

use crate::temp_store;

/// 25 records inserted in order; each insert persists, so update stamps
/// strictly increase with the insertion index.
fn populated() -> (tempfile::TempDir, tagstore::RecordStore) {
    let (dir, store) = temp_store();
    for i in 1..=25 {
        store.add(&format!("rec{i:02}"), &format!("value {i}"), &[]).unwrap();
    }
    (dir, store)
}

#[test]
fn test_pages_of_25_records() {
    let (_dir, store) = populated();

    let (page1, total) = store.list(1, Some(10), None);
    assert_eq!(total, 25);
    assert_eq!(page1.len(), 10);
    assert_eq!(page1[0].0, "rec25", "most recently updated first");
    assert_eq!(page1[9].0, "rec16");

    let (page3, _) = store.list(3, Some(10), None);
    assert_eq!(page3.len(), 5, "last page holds the 5 oldest");
    assert_eq!(page3[0].0, "rec05");
    assert_eq!(page3[4].0, "rec01");

    let (page4, total) = store.list(4, Some(10), None);
    assert!(page4.is_empty(), "past-the-end pages are empty, not errors");
    assert_eq!(total, 25);
}

#[test]
fn test_pages_concatenate_without_gaps() {
    let (_dir, store) = populated();

    let mut gathered = Vec::new();
    for page in 1..=3 {
        let (slice, _) = store.list(page, Some(10), None);
        gathered.extend(slice.into_iter().map(|(k, _)| k));
    }

    let (full, _) = store.list(1, Some(25), None);
    let full_keys: Vec<String> = full.into_iter().map(|(k, _)| k).collect();
    assert_eq!(gathered, full_keys);
}

#[test]
fn test_updating_a_record_moves_it_to_the_front() {
    let (_dir, store) = populated();

    store.add("rec03", "value 3 revised", &[]).unwrap();

    let (page1, _) = store.list(1, Some(3), None);
    assert_eq!(page1[0].0, "rec03");
    assert_eq!(page1[1].0, "rec25");
}

#[test]
fn test_tag_filter_agrees_with_pagination_total() {
    let (_dir, store) = temp_store();
    for i in 0..7 {
        let tags: &[&str] = if i % 2 == 0 { &["even"] } else { &["odd"] };
        store.add(&format!("n{i}"), "v", tags).unwrap();
    }

    let (page, total) = store.list(1, Some(2), Some("even"));
    assert_eq!(total, 4, "total counts the whole filtered set");
    assert_eq!(page.len(), 2);
    for (_, record) in &page {
        assert!(record.tags.contains("even"));
    }

    let (page2, _) = store.list(2, Some(2), Some("even"));
    assert_eq!(page2.len(), 2);
}

#[test]
fn test_default_page_size_comes_from_config() {
    let (_dir, store) = populated();
    let (page, _) = store.list(1, None, None);
    assert_eq!(page.len(), store.config().default_page_size);
}

#[test]
fn test_search_spans_key_value_and_tags() {
    let (_dir, store) = temp_store();
    store.add("alpha", "shared needle", &[]).unwrap();
    store.add("needle-key", "plain", &[]).unwrap();
    store.add("gamma", "plain", &["Needle-Tag"]).unwrap();
    store.add("delta", "nothing", &[]).unwrap();

    let results = store.search("NEEDLE");
    let keys: Vec<&str> = results.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec!["alpha", "gamma", "needle-key"],
        "matches from key, value, and tag, in key order"
    );
}

#[test]
fn test_search_and_list_agree_on_membership() {
    let (_dir, store) = temp_store();
    store.add("a", "common", &["t"]).unwrap();
    store.add("b", "common", &[]).unwrap();

    let searched: Vec<String> = store.search("common").into_iter().map(|(k, _)| k).collect();
    let (listed, _) = store.list(1, Some(10), None);
    let listed_keys: Vec<String> = listed.into_iter().map(|(k, _)| k).collect();

    for key in &searched {
        assert!(listed_keys.contains(key));
    }
}

#[test]
fn test_empty_store_queries() {
    let (_dir, store) = temp_store();
    assert!(store.search("anything").is_empty());
    assert!(store.all_tags().is_empty());
    let (page, total) = store.list(1, None, Some("tag"));
    assert!(page.is_empty());
    assert_eq!(total, 0);
}

#[test]
fn test_all_tags_tracks_mutations() {
    let (_dir, store) = temp_store();
    store.add("a", "v", &["x", "y"]).unwrap();
    store.add("b", "v", &["y", "z"]).unwrap();
    assert_eq!(store.all_tags(), vec!["x", "y", "z"]);

    store.delete_tag("a", "y").unwrap();
    assert_eq!(
        store.all_tags(),
        vec!["x", "y", "z"],
        "tag still held by another record"
    );

    store.delete_tag("b", "y").unwrap();
    assert_eq!(store.all_tags(), vec!["x", "z"]);
}
