use std::sync::Arc;

use edubench_catalog::preferences::{
    DismissalStore, FileStorage, JsonPreference, KeyValueStorage, PreferenceStore, Settings,
    SettingsStore,
};
use edubench_catalog::{CatalogConfig, Slug};
use tempfile::tempdir;

#[test]
fn test_file_storage_round_trip() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("prefs"));

    assert_eq!(storage.get("edubench-settings").unwrap(), None);
    storage.set("edubench-settings", r#"{"hideOldPapers":false}"#).unwrap();
    assert_eq!(
        storage.get("edubench-settings").unwrap().as_deref(),
        Some(r#"{"hideOldPapers":false}"#)
    );
    assert!(dir.path().join("prefs/edubench-settings.json").exists());
    assert!(!dir.path().join("prefs/.edubench-settings.json.tmp").exists());

    storage.remove("edubench-settings").unwrap();
    assert_eq!(storage.get("edubench-settings").unwrap(), None);
    // Removing twice is not an error
    storage.remove("edubench-settings").unwrap();
}

#[test]
fn test_preferences_survive_reopen() {
    let dir = tempdir().unwrap();
    let config = CatalogConfig::default();

    {
        let storage = Arc::new(FileStorage::new(dir.path()));
        let dismissals = DismissalStore::open(Arc::clone(&storage), config.dismissed_key.clone());
        dismissals.dismiss(Slug::from("mmlu")).unwrap();

        let settings = SettingsStore::open(storage, config.settings_key.clone());
        settings.set_min_relevance(7.5).unwrap();
        settings.set_hide_old_papers(false).unwrap();
    }

    let storage = Arc::new(FileStorage::new(dir.path()));
    let dismissals = DismissalStore::open(Arc::clone(&storage), config.dismissed_key.clone());
    assert!(dismissals.is_dismissed(&Slug::from("mmlu")));

    let settings = SettingsStore::open(storage, config.settings_key);
    assert_eq!(
        settings.settings(),
        Settings {
            hide_old_papers: false,
            min_relevance: 7.5
        }
    );
}

#[test]
fn invariant_corrupt_preferences_fall_back_to_defaults() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("edubench-dismissed.json"), "{{{{").unwrap();
    std::fs::write(dir.path().join("edubench-settings.json"), "[1, 2]").unwrap();

    let storage = Arc::new(FileStorage::new(dir.path()));
    let dismissals = DismissalStore::open(Arc::clone(&storage), "edubench-dismissed");
    assert_eq!(dismissals.count(), 0);

    let settings = SettingsStore::open(Arc::clone(&storage), "edubench-settings");
    assert_eq!(settings.settings(), Settings::default());

    // The next write replaces the corrupt value
    dismissals.dismiss(Slug::from("bbq")).unwrap();
    let pref: JsonPreference<Vec<String>, _> = JsonPreference::new(storage, "edubench-dismissed");
    assert_eq!(pref.load(), vec!["bbq".to_string()]);
}

#[test]
fn test_settings_serialize_with_camel_case_keys() {
    let json = serde_json::to_string(&Settings::default()).unwrap();
    assert_eq!(json, r#"{"hideOldPapers":true,"minRelevance":0.0}"#);
}
