//! localStorageによるキーバリューストア

use dristi_common::{KeyValueStore, StorageError};
use gloo::storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

fn unavailable(e: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", e))
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw().get_item(key).map_err(unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw().set_item(key, value).map_err(unavailable)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw().remove_item(key).map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_round_trip() {
        let store = BrowserStore;
        store.set("dristi-test", "v").unwrap();
        assert_eq!(store.get("dristi-test").unwrap().as_deref(), Some("v"));
        store.remove("dristi-test").unwrap();
        assert_eq!(store.get("dristi-test").unwrap(), None);
    }
}
