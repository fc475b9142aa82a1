//! Browser implementations of the storage and export seams

use shared::error::{ClientError, ClientResult};
use shared::export::{ExportFile, Exporter};
use shared::storage::KeyValueStore;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Storage, Url, Window};

fn describe(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn window() -> Option<Window> {
    web_sys::window()
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> ClientResult<Storage> {
        window()
            .ok_or_else(|| ClientError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| ClientError::Storage(describe(e)))?
            .ok_or_else(|| ClientError::Storage("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| ClientError::Storage(describe(e)))
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| ClientError::Storage(describe(e)))
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| ClientError::Storage(describe(e)))
    }
}

/// Downloads files through a temporary object URL and prints with
/// `window.print()`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserExporter;

impl Exporter for BrowserExporter {
    fn export_file(&self, file: &ExportFile) -> ClientResult<()> {
        let export_err = |e: JsValue| ClientError::Export(describe(e));
        let document = window()
            .and_then(|w| w.document())
            .ok_or_else(|| ClientError::Export("no document".to_string()))?;

        let parts = js_sys::Array::of1(&JsValue::from_str(&file.contents));
        let options = BlobPropertyBag::new();
        options.set_type(file.mime_type());
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(export_err)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(export_err)?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(export_err)?
            .dyn_into()
            .map_err(|_| ClientError::Export("could not create download link".to_string()))?;
        anchor.set_href(&url);
        anchor.set_download(&file.filename);
        anchor.click();

        Url::revoke_object_url(&url).map_err(export_err)
    }

    fn print(&self) -> ClientResult<()> {
        window()
            .ok_or_else(|| ClientError::Export("no window".to_string()))?
            .print()
            .map_err(|e| ClientError::Export(describe(e)))
    }
}
