//! Inventory reporting: dashboard figures, product search and exports

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ClientError, ClientResult};
use crate::export::{ExportFile, Exporter};
use crate::history::MovementRow;
use crate::models::{InventorySummary, Product};
use crate::types::ExportFormat;

/// Totals shown on the dashboard and reports page
pub fn summarize_inventory(products: &[Product]) -> InventorySummary {
    InventorySummary {
        product_count: products.len(),
        total_stock: products.iter().map(|p| p.stock_quantity).sum(),
        total_value: products.iter().map(Product::stock_value).sum(),
        low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
    }
}

/// Products whose stock is below their alert threshold
pub fn low_stock_products(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock()).collect()
}

/// Case-insensitive name search; an empty query keeps everything
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
        .collect()
}

/// Serialize records as CSV with a header row
pub fn export_to_csv<T: Serialize>(data: &[T]) -> ClientResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in data {
        wtr.serialize(record)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ClientError::Export(format!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| ClientError::Export(format!("UTF-8 conversion error: {}", e)))
}

#[derive(Serialize)]
struct MovementCsvRecord<'a> {
    #[serde(rename = "Tarih")]
    date: String,
    #[serde(rename = "Ürün")]
    product: &'a str,
    #[serde(rename = "Miktar")]
    quantity: u64,
    #[serde(rename = "Yön")]
    direction: &'static str,
    #[serde(rename = "Tür")]
    type_label: &'a str,
    #[serde(rename = "Karşı Taraf")]
    counterparty: &'a str,
    #[serde(rename = "Açıklama")]
    note: &'a str,
}

#[derive(Serialize)]
struct ProductCsvRecord<'a> {
    #[serde(rename = "Ürün")]
    name: &'a str,
    #[serde(rename = "Stok")]
    stock: i64,
    #[serde(rename = "Birim")]
    unit_cost: Decimal,
    #[serde(rename = "Eşik")]
    threshold: i64,
    #[serde(rename = "Değer")]
    value: Decimal,
}

pub fn movements_csv(rows: &[MovementRow]) -> ClientResult<String> {
    let records: Vec<MovementCsvRecord> = rows
        .iter()
        .map(|row| MovementCsvRecord {
            date: row
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            product: &row.product_name,
            quantity: row.quantity,
            direction: row.direction.label(),
            type_label: &row.type_label,
            counterparty: &row.counterparty,
            note: &row.note_body,
        })
        .collect();
    export_to_csv(&records)
}

pub fn products_csv(products: &[Product]) -> ClientResult<String> {
    let records: Vec<ProductCsvRecord> = products
        .iter()
        .map(|p| ProductCsvRecord {
            name: &p.name,
            stock: p.stock_quantity,
            unit_cost: p.unit_cost,
            threshold: p.alert_threshold,
            value: p.stock_value(),
        })
        .collect();
    export_to_csv(&records)
}

/// Hand a CSV document to the exporter
pub fn export_csv<E: Exporter + ?Sized>(exporter: &E, stem: &str, csv: String) -> ClientResult<ExportFile> {
    let file = ExportFile::new(stem, ExportFormat::Csv, csv);
    exporter.export_file(&file)?;
    tracing::info!("Exported {} ({} bytes)", file.filename, file.contents.len());
    Ok(file)
}

/// Print the current report; the browser offers PDF as a destination
pub fn print_report<E: Exporter + ?Sized>(exporter: &E) -> ClientResult<()> {
    exporter.print()
}
