//! Learning hub content and detail overlay against a real file-backed cache

use std::sync::Arc;

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::Value;
use twinhub::hub::SectionPatch;
use twinhub::storage::{PATHWAYS_KEY, SECTIONS_KEY};
use twinhub::{ClickTarget, FileStore, LearningHub, LocalStore, OverlayState, SectionEntry};

fn persisted(store: &FileStore, key: &str) -> Value {
    serde_json::from_str(&store.get(key).expect("key persisted")).unwrap()
}

#[test]
fn editing_a_detail_persists_under_section_content() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(FileStore::open(dir.path()).unwrap());
    let mut hub = LearningHub::load(cache.clone());

    let opened = hub.open_detail("videos").unwrap();
    assert_eq!(opened.title, "Video lessons");
    assert_eq!(opened.body, hub.sections().get("videos").unwrap().description);

    hub.set_edit_mode(true);
    hub.begin_edit().unwrap();
    hub.overlay_mut()
        .set_draft_body("<p>Full video curriculum</p>")
        .unwrap();
    hub.save_detail().unwrap();
    assert_eq!(hub.overlay().state(), &OverlayState::Closed);

    let json = persisted(&cache, SECTIONS_KEY);
    assert_eq!(
        json["videos"]["content"]["body"],
        Value::from("<p>Full video curriculum</p>")
    );
    let saved_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(json["videos"]["content"]["lastUpdated"].clone()).unwrap();
    assert!(saved_at >= opened.last_updated);
}

#[test]
fn removing_middle_item_is_persisted_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(FileStore::open(dir.path()).unwrap());
    let mut hub = LearningHub::load(cache.clone());
    hub.set_edit_mode(true);

    let sections = hub.sections_mut().unwrap();
    sections
        .update("labs", SectionPatch::new().items(vec!["a".into(), "b".into(), "c".into()]))
        .unwrap();
    assert!(sections.remove_item_at("labs", 1).unwrap());

    let json = persisted(&cache, SECTIONS_KEY);
    assert_eq!(json["labs"]["items"], serde_json::json!(["a", "c"]));
}

#[test]
fn edits_survive_reopening_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut hub = LearningHub::load(Arc::new(FileStore::open(dir.path()).unwrap()));
        hub.set_edit_mode(true);
        hub.pathways_mut()
            .unwrap()
            .add_item("python", "Notebook: pandas for sensor logs")
            .unwrap();
    }

    let cache = Arc::new(FileStore::open(dir.path()).unwrap());
    let hub = LearningHub::load(cache.clone());
    let python = hub.pathways().get("python").unwrap();
    assert_eq!(python.items.last().map(String::as_str), Some("Notebook: pandas for sensor logs"));

    // Sections were never touched, so only pathways hit disk
    assert!(cache.get(PATHWAYS_KEY).is_some());
    assert!(cache.get(SECTIONS_KEY).is_none());
}

#[test]
fn cached_sections_replace_defaults_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(FileStore::open(dir.path()).unwrap());
    let mut only = IndexMap::new();
    only.insert(
        "workshops".to_string(),
        SectionEntry {
            title: "Workshops".into(),
            description: "Weekend sessions".into(),
            items: vec!["Drone mapping".into()],
            content: None,
        },
    );
    cache
        .set(SECTIONS_KEY, &serde_json::to_string(&only).unwrap())
        .unwrap();

    let hub = LearningHub::load(cache);
    let keys: Vec<_> = hub.sections().list_all().keys().cloned().collect();
    assert_eq!(keys, vec!["workshops".to_string()]);
    // Pathways still come from defaults
    assert_eq!(hub.pathways().len(), 4);
}

#[test]
fn clicks_inside_controls_do_not_open_detail() {
    let dir = tempfile::tempdir().unwrap();
    let mut hub = LearningHub::load(Arc::new(FileStore::open(dir.path()).unwrap()));

    assert!(!hub
        .click_section("labs", &[ClickTarget::Button, ClickTarget::Card])
        .unwrap());
    assert!(!hub.overlay().is_open());

    assert!(hub
        .click_section("labs", &[ClickTarget::Text, ClickTarget::Card])
        .unwrap());
    assert_eq!(hub.overlay().section(), Some("labs"));
}

#[test]
fn cancelled_edit_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(FileStore::open(dir.path()).unwrap());
    let mut hub = LearningHub::load(cache.clone());
    hub.set_edit_mode(true);

    hub.open_detail("courses").unwrap();
    hub.begin_edit().unwrap().title = "Scratch".into();
    hub.cancel_edit().unwrap();
    hub.close_detail();

    assert!(cache.get(SECTIONS_KEY).is_none());
}
