//! JSON bridge between the core session and a JavaScript UI.
//!
//! The UI posts [`Command`] objects, renders the returned snapshot, and
//! schedules a wake-up for `nextDeadline` which it answers with `tick`.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use yourvue_wizard::{
    AssessmentSession, Command, MemoryStorage, Millis, Outcome, SharedStorage, SubscriptionId,
    WizardConfig,
};

use crate::dom;
use crate::storage::LocalStorage;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed command: {0}")]
    Command(#[source] serde_json::Error),
    #[error("malformed config: {0}")]
    Config(#[source] serde_json::Error),
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[source] serde_json::Error),
}

impl From<BridgeError> for JsValue {
    fn from(err: BridgeError) -> Self {
        Self::from_str(&err.to_string())
    }
}

/// Response to an applied command: the outcome plus the snapshot to render.
#[derive(Debug, serde::Serialize)]
struct Applied<'a> {
    #[serde(flatten)]
    outcome: &'a Outcome,
    snapshot: yourvue_wizard::SessionSnapshot,
}

#[wasm_bindgen]
pub struct WizardBridge {
    session: AssessmentSession,
    listeners: Vec<SubscriptionId>,
}

impl WizardBridge {
    /// Build a bridge over any storage backend.
    #[must_use]
    pub fn with_storage(storage: SharedStorage, cfg: WizardConfig, seed: u64) -> Self {
        Self {
            session: AssessmentSession::new(storage, cfg, seed),
            listeners: Vec::new(),
        }
    }

    /// Decode `json` into a command, apply it, and encode the result.
    ///
    /// # Errors
    /// Returns an error if the command cannot be decoded or the snapshot
    /// cannot be encoded.
    pub fn apply_json(&mut self, json: &str, now: Millis) -> Result<String, BridgeError> {
        let command: Command = serde_json::from_str(json).map_err(BridgeError::Command)?;
        let outcome = self.session.apply(command, now);
        let response = Applied {
            outcome: &outcome,
            snapshot: self.session.snapshot(),
        };
        serde_json::to_string(&response).map_err(BridgeError::Snapshot)
    }

    /// Encode the current snapshot.
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be encoded.
    pub fn snapshot_json(&self) -> Result<String, BridgeError> {
        self.session.snapshot().to_json().map_err(BridgeError::Snapshot)
    }

    #[must_use]
    pub const fn session(&self) -> &AssessmentSession {
        &self.session
    }
}

fn open_storage() -> SharedStorage {
    match LocalStorage::open() {
        Ok(storage) => Rc::new(storage),
        Err(err) => {
            dom::console_error(&format!("{err}; progress will not survive a reload"));
            MemoryStorage::shared()
        }
    }
}

#[wasm_bindgen]
impl WizardBridge {
    /// Open a session on `localStorage` with the bundled configuration.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_storage(open_storage(), WizardConfig::default_config().clone(), seed)
    }

    /// Open a session with a JSON configuration override.
    ///
    /// # Errors
    /// Returns an error if `config` is not a valid configuration document.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: &str, seed: u64) -> Result<Self, JsValue> {
        let cfg = WizardConfig::from_json(config).map_err(BridgeError::Config)?;
        Ok(Self::with_storage(open_storage(), cfg, seed))
    }

    /// Apply a JSON command at host time `now`.
    ///
    /// # Errors
    /// Rejects with a message when the command is malformed.
    pub fn apply(&mut self, command: &str, now: f64) -> Result<String, JsValue> {
        Ok(self.apply_json(command, dom::millis_from_js(now))?)
    }

    /// Advance timers; returns `true` if the UI should re-render.
    pub fn tick(&mut self, now: f64) -> bool {
        self.session.tick(dom::millis_from_js(now))
    }

    /// Current snapshot as JSON.
    ///
    /// # Errors
    /// Rejects when the snapshot cannot be encoded.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        Ok(self.snapshot_json()?)
    }

    /// Earliest pending timer deadline, if any.
    #[wasm_bindgen(js_name = nextDeadline)]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn next_deadline(&self) -> Option<f64> {
        self.session.next_deadline().map(|at| at as f64)
    }

    /// Host wall-clock time, for UIs that do not track their own.
    #[must_use]
    pub fn now() -> f64 {
        js_sys::Date::now()
    }

    /// Call `callback` with the progress JSON after every progress change.
    #[wasm_bindgen(js_name = onProgress)]
    pub fn on_progress(&mut self, callback: js_sys::Function) {
        let id = self.session.subscribe(move |progress| {
            let payload = match serde_json::to_string(progress) {
                Ok(json) => JsValue::from_str(&json),
                Err(err) => {
                    log::warn!("progress listener skipped: {err}");
                    return;
                }
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
                dom::console_error(&dom::js_error_message(&err));
            }
        });
        self.listeners.push(id);
    }

    /// Drop every progress listener registered through `onProgress`.
    #[wasm_bindgen(js_name = clearListeners)]
    pub fn clear_listeners(&mut self) {
        for id in self.listeners.drain(..) {
            self.session.unsubscribe(id);
        }
    }
}
