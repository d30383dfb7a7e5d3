#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use wasm_bindgen_test::*;
use yourvue_web::{LocalStorage, WizardBridge, dom};
use yourvue_wizard::{PROGRESS_KEY, WizardConfig, WizardStorage};

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_storage() -> LocalStorage {
    let storage = LocalStorage::open().expect("localStorage available in test browser");
    for key in [
        PROGRESS_KEY,
        "yourvue-s1-data",
        "yourvue-s1-popup-shown",
        "yourvue-s2-data",
        "yourvue-s3-data",
    ] {
        storage.clear(key).expect("clear key");
    }
    storage
}

#[wasm_bindgen_test]
fn local_storage_round_trips_raw_values() {
    let storage = fresh_storage();
    storage.set("yourvue-s1-popup-shown", "true").unwrap();
    assert_eq!(
        storage.get("yourvue-s1-popup-shown").unwrap().as_deref(),
        Some("true")
    );
    storage.clear("yourvue-s1-popup-shown").unwrap();
    assert_eq!(storage.get("yourvue-s1-popup-shown").unwrap(), None);
}

#[wasm_bindgen_test]
fn bridge_persists_progress_into_local_storage() {
    let storage = Rc::new(fresh_storage());
    let mut bridge = WizardBridge::with_storage(storage.clone(), WizardConfig::default(), 3);
    let now = dom::now_ms();
    bridge
        .apply_json(r#"{"type":"select_career_stage","stage":"STARTER"}"#, now)
        .unwrap();
    bridge.apply_json(r#"{"type":"continue_from_overview"}"#, now).unwrap();
    bridge.apply_json(r#"{"type":"skip_location"}"#, now).unwrap();
    bridge.apply_json(r#"{"type":"start_now"}"#, now).unwrap();

    let progress = storage.get(PROGRESS_KEY).unwrap().expect("progress saved");
    assert!(progress.contains(r#""currentStage":2"#));
    let s1 = storage.get("yourvue-s1-data").unwrap().expect("s1 saved");
    assert!(s1.contains("STARTER"));
}

#[wasm_bindgen_test]
fn clock_reads_wall_time() {
    assert!(dom::now_ms() > 1_600_000_000_000);
}
