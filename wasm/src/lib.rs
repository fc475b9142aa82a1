//! WebAssembly module for the EnvanterX inventory front end
//!
//! Provides client-side logic for:
//! - Packing and reading counterparties in movement notes
//! - Matching submitted stock changes to confirmed movements
//! - Movement history rows, dashboard figures and CSV/print exports
//! - The stored-credential Authorization header

use serde::de::DeserializeOwned;
use validator::Validate;
use wasm_bindgen::prelude::*;

use shared::auth::CredentialStore;
use shared::clock::SystemClock;
use shared::config::{ClientConfig, CounterpartyLabels};
use shared::history::build_movement_rows;
use shared::report::{export_csv, movements_csv, products_csv};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

pub mod browser;
pub mod logging;

use browser::{BrowserExporter, LocalStorage};

fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn load_config(config_json: Option<String>) -> Result<ClientConfig, JsValue> {
    match config_json {
        Some(json) => ClientConfig::from_json(&json),
        None => ClientConfig::load(),
    }
    .map_err(js_error)
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    let level = ClientConfig::load()
        .map(|config| config.log_level)
        .unwrap_or_else(|_| "info".to_string());
    logging::install(&level);
}

/// Replace the active log filter, e.g. `shared=debug`. Returns false for
/// an invalid directive.
#[wasm_bindgen]
pub fn set_log_level(directive: &str) -> bool {
    logging::set_level(directive)
}

// ============================================================================
// Note codec
// ============================================================================

#[wasm_bindgen]
pub fn compose_note_with_partner(partner: &str, note: &str) -> String {
    shared::compose_note_with_partner(partner, note)
}

#[wasm_bindgen]
pub fn extract_counterparty_from_note(note: &str) -> String {
    shared::extract_counterparty_from_note(note)
}

#[wasm_bindgen]
pub fn get_movement_note_body(note: &str) -> String {
    shared::get_movement_note_body(note)
}

/// Display counterparty for a movement record (JSON)
#[wasm_bindgen]
pub fn get_movement_counterparty(movement_json: &str) -> Result<String, JsValue> {
    let movement: Movement = parse_json(movement_json, "movement")?;
    Ok(shared::get_movement_counterparty(&movement))
}

// ============================================================================
// Counterparty cache
// ============================================================================

/// Counterparty cache backed by `localStorage`
#[wasm_bindgen]
pub struct PartnerCache {
    reconciler: shared::PartnerReconciler<LocalStorage, SystemClock>,
    labels: CounterpartyLabels,
}

#[wasm_bindgen]
impl PartnerCache {
    /// Create a cache; `config_json` overrides keys, window and labels
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PartnerCache, JsValue> {
        let config = load_config(config_json)?;
        Ok(Self {
            reconciler: shared::PartnerReconciler::with_config(
                LocalStorage,
                SystemClock,
                config.partner_cache,
            ),
            labels: config.labels,
        })
    }

    /// Record `{productId, type, quantity, partner}` after a stock change
    /// was sent. Returns false when there was no partner to record.
    #[wasm_bindgen(js_name = addPendingPartner)]
    pub fn add_pending_partner(&self, pending_json: &str) -> Result<bool, JsValue> {
        let pending: PendingPartner = parse_json(pending_json, "pending partner")?;
        Ok(self.reconciler.add_pending_partner(&pending).is_some())
    }

    /// The consumed pending entry as JSON, or undefined
    #[wasm_bindgen(js_name = matchPendingPartner)]
    pub fn match_pending_partner(&self, movement_json: &str) -> Result<Option<String>, JsValue> {
        let movement: Movement = parse_json(movement_json, "movement")?;
        self.reconciler
            .match_pending_partner(&movement)
            .map(|entry| to_json(&entry))
            .transpose()
    }

    #[wasm_bindgen(js_name = storeMovementPartner)]
    pub fn store_movement_partner(&self, movement_id: f64, partner: &str) {
        self.reconciler.store_movement_partner(movement_id as i64, partner);
    }

    #[wasm_bindgen(js_name = getStoredMovementPartner)]
    pub fn get_stored_movement_partner(&self, movement_id: f64) -> String {
        self.reconciler.get_stored_movement_partner(movement_id as i64)
    }

    #[wasm_bindgen(js_name = pendingCount)]
    pub fn pending_count(&self) -> usize {
        self.reconciler.pending_entries().len()
    }

    /// Display rows for a movement list (JSON array in, JSON array out)
    #[wasm_bindgen(js_name = movementRows)]
    pub fn movement_rows(&self, movements_json: &str) -> Result<String, JsValue> {
        let movements: Vec<Movement> = parse_json(movements_json, "movements")?;
        to_json(&build_movement_rows(&self.reconciler, &movements, &self.labels))
    }

    /// Download the movement list as CSV
    #[wasm_bindgen(js_name = exportMovementsCsv)]
    pub fn export_movements_csv(&self, movements_json: &str, filename: &str) -> Result<(), JsValue> {
        let movements: Vec<Movement> = parse_json(movements_json, "movements")?;
        let rows = build_movement_rows(&self.reconciler, &movements, &self.labels);
        let csv = movements_csv(&rows).map_err(js_error)?;
        export_csv(&BrowserExporter, filename, csv).map_err(js_error)?;
        Ok(())
    }
}

// ============================================================================
// Stock changes
// ============================================================================

/// Validate the stock dialog and build the request body plus the pending
/// partner to record once the request succeeds
#[wasm_bindgen]
pub fn prepare_stock_change(form_json: &str) -> Result<String, JsValue> {
    let form: StockChangeForm = parse_json(form_json, "stock change")?;
    let submission = form.into_submission().map_err(js_error)?;
    to_json(&submission)
}

/// Check the product create/edit form. Returns the form JSON unchanged
/// when valid, otherwise the field errors.
#[wasm_bindgen]
pub fn validate_product_form(form_json: &str) -> Result<String, JsValue> {
    let form: ProductForm = parse_json(form_json, "product form")?;
    form.validate()
        .map_err(|e| js_error(shared::ClientError::Validation(e.to_string())))?;
    to_json(&form)
}

/// Stock after a change, for backends that only accept a product update
#[wasm_bindgen]
pub fn calculate_projected_stock(current: i32, direction: &str, amount: i32) -> i32 {
    let direction = match direction {
        "decrease" => StockDirection::Decrease,
        _ => StockDirection::Increase,
    };
    let projected = shared::projected_stock(i64::from(current), direction, i64::from(amount));
    projected.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

// ============================================================================
// Reports
// ============================================================================

#[wasm_bindgen]
pub fn inventory_summary(products_json: &str) -> Result<String, JsValue> {
    let products: Vec<Product> = parse_json(products_json, "products")?;
    to_json(&shared::report::summarize_inventory(&products))
}

#[wasm_bindgen]
pub fn low_stock_products(products_json: &str) -> Result<String, JsValue> {
    let products: Vec<Product> = parse_json(products_json, "products")?;
    to_json(&shared::report::low_stock_products(&products))
}

#[wasm_bindgen]
pub fn filter_products(products_json: &str, query: &str) -> Result<String, JsValue> {
    let products: Vec<Product> = parse_json(products_json, "products")?;
    to_json(&shared::report::filter_products(&products, query))
}

#[wasm_bindgen]
pub fn export_products_csv(products_json: &str, filename: &str) -> Result<(), JsValue> {
    let products: Vec<Product> = parse_json(products_json, "products")?;
    let csv = products_csv(&products).map_err(js_error)?;
    export_csv(&BrowserExporter, filename, csv).map_err(js_error)?;
    Ok(())
}

/// Open the print dialog so the report can be saved as PDF
#[wasm_bindgen]
pub fn print_report() -> Result<(), JsValue> {
    shared::report::print_report(&BrowserExporter).map_err(js_error)
}

// ============================================================================
// Backend contract
// ============================================================================

#[wasm_bindgen]
pub fn authorization_header(credential: &str) -> Option<String> {
    shared::auth::authorization_header(credential)
}

/// Store a Basic credential for the login form's username and password
#[wasm_bindgen]
pub fn login(username: &str, password: &str) -> Result<(), JsValue> {
    validate_login(username, password).map_err(JsValue::from_str)?;
    let config = ClientConfig::load().map_err(js_error)?;
    CredentialStore::new(LocalStorage, &config.api)
        .login(username, password)
        .map_err(js_error)?;
    Ok(())
}

#[wasm_bindgen]
pub fn logout() -> Result<(), JsValue> {
    let config = ClientConfig::load().map_err(js_error)?;
    CredentialStore::new(LocalStorage, &config.api)
        .logout()
        .map_err(js_error)
}

/// Header for the stored credential, or undefined when logged out
#[wasm_bindgen]
pub fn current_authorization_header() -> Option<String> {
    let config = ClientConfig::load().ok()?;
    CredentialStore::new(LocalStorage, &config.api).authorization_header()
}

#[wasm_bindgen]
pub fn is_authenticated() -> bool {
    current_authorization_header().is_some()
}

/// Image URL under the configured API base
#[wasm_bindgen]
pub fn build_image_url(image_path: &str) -> Option<String> {
    let config = ClientConfig::load().ok()?;
    shared::http::build_image_url(&config.api.base_url, image_path)
}

/// Message to show for a failed request's response body
#[wasm_bindgen]
pub fn format_error_message(body: &str, fallback: Option<String>) -> String {
    let fallback = fallback.unwrap_or_else(|| shared::http::DEFAULT_ERROR_MESSAGE.to_string());
    shared::http::format_error_body(body, &fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_codec_bindings() {
        assert_eq!(compose_note_with_partner(" Acme ", "fatura"), "Acme · fatura");
        assert_eq!(extract_counterparty_from_note("Acme · fatura"), "Acme");
        assert_eq!(get_movement_note_body("Acme · fatura"), "fatura");
    }

    #[test]
    fn test_get_movement_counterparty_binding() {
        let json = r#"{"type": "SATIS", "counterparty": "Bilinmeyen Müşteri"}"#;
        assert_eq!(get_movement_counterparty(json).unwrap(), "Bilinmeyen Müşteri");
        let json = r#"{"type": "SATIS"}"#;
        assert_eq!(get_movement_counterparty(json).unwrap(), "Bilinmeyen Müşteri");
    }

    #[test]
    fn test_prepare_stock_change() {
        let json = r#"{"productId": 5, "type": "increase", "amount": 10, "partner": "Acme Ltd"}"#;
        let submission: serde_json::Value =
            serde_json::from_str(&prepare_stock_change(json).unwrap()).unwrap();
        assert_eq!(submission["request"]["note"], "Acme Ltd");
        assert_eq!(submission["pending"]["type"], "SATIN_ALMA");
    }

    #[test]
    fn test_validate_product_form() {
        let valid = r#"{"name": "Vida M4", "unitCost": 3.5, "stockQuantity": 120, "alertThreshold": 50}"#;
        let form: serde_json::Value =
            serde_json::from_str(&validate_product_form(valid).unwrap()).unwrap();
        assert_eq!(form["name"], "Vida M4");
        assert_eq!(form["stockQuantity"], 120);
    }

    #[test]
    fn test_projected_stock() {
        assert_eq!(calculate_projected_stock(10, "increase", 5), 15);
        assert_eq!(calculate_projected_stock(10, "decrease", 5), 5);
        assert_eq!(calculate_projected_stock(i32::MAX, "increase", 10), i32::MAX);
        assert_eq!(calculate_projected_stock(i32::MIN, "decrease", 10), i32::MIN);
    }

    #[test]
    fn test_inventory_summary() {
        let json = r#"[
            {"id": 1, "name": "Vida M4", "stockQuantity": 120, "unitCost": 3.5, "alertThreshold": 50},
            {"id": 2, "name": "Conta 20mm", "stockQuantity": 4, "unitCost": 2.1, "alertThreshold": 20}
        ]"#;
        let summary: serde_json::Value =
            serde_json::from_str(&inventory_summary(json).unwrap()).unwrap();
        assert_eq!(summary["totalStock"], 124);
        assert_eq!(summary["lowStockCount"], 1);
        assert_eq!(summary["productCount"], 2);
    }

    #[test]
    fn test_contract_helpers() {
        assert_eq!(authorization_header("tok").as_deref(), Some("Bearer tok"));
        assert_eq!(
            build_image_url("a/b.png").as_deref(),
            Some("/api/files/products/b.png")
        );
        assert_eq!(format_error_message(r#"{"message":"x"}"#, None), "x");
        assert_eq!(format_error_message("", None), "Bir hata oluştu.");
    }
}
