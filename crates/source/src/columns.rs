//! Maps table columns to label roles.
//!
//! Resolution order per role: explicit override, then known header
//! names, then content heuristics. A role that stays unmapped becomes
//! [`ColumnRef::Unresolved`] and reads as an empty field, except
//! quantity which defaults to one label per row.

use crate::Table;
use crate::normalize::strip_non_digits;

const TITLE_CANDIDATES: &[&str] = &[
    "nombre",
    "name",
    "titulo",
    "producto",
    "descripcion",
    "descripcion_corta",
];
const SKU_CANDIDATES: &[&str] = &["sku", "modelo", "clave", "referencia"];
const BARCODE_CANDIDATES: &[&str] = &[
    "barcode",
    "ean",
    "gtin",
    "codigo",
    "codigo_barras",
    "codigo_de_barras",
    "cod_barras",
];
// "cantifad" is a misspelling that ships in real inventory exports;
// files carrying it must keep resolving their quantity column.
const QUANTITY_CANDIDATES: &[&str] = &[
    "cantifad",
    "cantidad",
    "qty",
    "cantidad_de_etiquetas",
    "num_etiquetas",
];

/// Lowercases a header and collapses every run of characters outside
/// `[a-z0-9]` into a single underscore.
pub fn norm_col(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// User-supplied column names that win over any automatic resolution.
#[derive(Debug, Default, Clone)]
pub struct ColumnOverrides {
    pub title: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub quantity: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRef {
    Index(usize),
    /// No column matched; the field reads as empty.
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityRef {
    Index(usize),
    /// No quantity column; every row yields exactly one label.
    DefaultOne,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub title: ColumnRef,
    pub sku: ColumnRef,
    pub barcode: ColumnRef,
    pub quantity: QuantityRef,
}

impl ColumnMap {
    pub fn field<'a>(&self, table: &'a Table, row: usize, role: ColumnRef) -> &'a str {
        match role {
            ColumnRef::Index(col) => table.cell(row, col),
            ColumnRef::Unresolved => "",
        }
    }
}

pub fn resolve_columns(table: &Table, overrides: &ColumnOverrides) -> ColumnMap {
    let mut title = resolve_named(table, overrides.title.as_deref(), TITLE_CANDIDATES);
    let mut sku = resolve_named(table, overrides.sku.as_deref(), SKU_CANDIDATES);
    let mut barcode = resolve_named(table, overrides.barcode.as_deref(), BARCODE_CANDIDATES);
    let quantity = resolve_named(table, overrides.quantity.as_deref(), QUANTITY_CANDIDATES);

    if barcode.is_none() {
        barcode = barcode_by_content(table);
    }
    if sku.is_none() {
        sku = sku_by_name(table);
    }
    if title.is_none() {
        title = title_by_mean_length(table);
    }

    let map = ColumnMap {
        title: title.map_or(ColumnRef::Unresolved, ColumnRef::Index),
        sku: sku.map_or(ColumnRef::Unresolved, ColumnRef::Index),
        barcode: barcode.map_or(ColumnRef::Unresolved, ColumnRef::Index),
        quantity: quantity.map_or(QuantityRef::DefaultOne, QuantityRef::Index),
    };
    log::debug!("resolved columns: {map:?}");
    map
}

fn resolve_named(table: &Table, override_name: Option<&str>, candidates: &[&str]) -> Option<usize> {
    if let Some(name) = override_name.filter(|n| !n.trim().is_empty()) {
        let normalized = norm_col(name);
        if let Some(idx) = table.column_index(&normalized) {
            return Some(idx);
        }
        log::warn!("override column {normalized:?} not found, falling back to auto-detection");
    }
    candidates
        .iter()
        .find_map(|candidate| table.column_index(candidate))
}

/// A column where more than half the non-empty digit-stripped values
/// are 12 to 14 digits long is taken to hold barcodes.
fn barcode_by_content(table: &Table) -> Option<usize> {
    if table.rows.is_empty() {
        return None;
    }
    (0..table.columns.len()).find(|&col| {
        let matches = table
            .rows
            .iter()
            .filter(|row| {
                let digits = strip_non_digits(row.get(col).map_or("", String::as_str));
                (12..=14).contains(&digits.len())
            })
            .count();
        matches as f64 / table.rows.len() as f64 > 0.5
    })
}

fn sku_by_name(table: &Table) -> Option<usize> {
    table.columns.iter().position(|name| {
        name.contains("sku") || name.contains("modelo") || name.contains("referencia")
    })
}

/// The column with the greatest mean cell length is the best guess
/// for a product title. Ties break toward the later column name.
fn title_by_mean_length(table: &Table) -> Option<usize> {
    if table.rows.is_empty() {
        return None;
    }
    let mut best: Option<(f64, &str, usize)> = None;
    for (col, name) in table.columns.iter().enumerate() {
        let total: usize = table.rows.iter().map(|row| row.get(col).map_or(0, String::len)).sum();
        let mean = total as f64 / table.rows.len() as f64;
        let better = match best {
            None => true,
            Some((best_mean, best_name, _)) => {
                mean > best_mean || (mean == best_mean && name.as_str() > best_name)
            }
        };
        if better {
            best = Some((mean, name, col));
        }
    }
    best.map(|(_, _, col)| col)
}
