//! `localStorage` backend for the persistence port.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use yourvue_wizard::{StorageError, WizardStorage};

use crate::dom;

/// Browser storage; every record lands under its fixed key as a JSON string.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: Storage,
}

impl LocalStorage {
    /// Open `window.localStorage`.
    ///
    /// # Errors
    /// Returns [`StorageError::Unavailable`] when the page has no usable storage
    /// (private mode, sandboxed iframe, non-browser host).
    pub fn open() -> Result<Self, StorageError> {
        dom::local_storage()
            .map(|inner| Self { inner })
            .map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))
    }
}

fn backend(err: &JsValue) -> StorageError {
    StorageError::Backend(dom::js_error_message(err))
}

impl WizardStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(|e| backend(&e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(|e| backend(&e))
    }

    fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(|e| backend(&e))
    }
}
