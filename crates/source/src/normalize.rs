use crate::{ColumnMap, QuantityRef, Table};
use etiqueta_types::LabelRecord;

/// Keeps only ASCII digits, dropping separators, prefixes and spaces.
pub fn strip_non_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Parses a label quantity.
///
/// Blank or unparsable values mean one label; parsable values are
/// truncated toward zero and clamped at zero, so a negative quantity
/// suppresses the row entirely.
pub fn parse_quantity(value: &str) -> u32 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 1;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v.trunc().max(0.0) as u32,
        _ => 1,
    }
}

/// Normalizes every table row and replicates it `quantity` times,
/// preserving input order.
pub fn build_labels(table: &Table, map: &ColumnMap) -> Vec<LabelRecord> {
    let mut out = Vec::with_capacity(table.rows.len());
    for row in 0..table.rows.len() {
        let title = map.field(table, row, map.title).trim().to_string();
        let sku = map.field(table, row, map.sku).trim().to_string();
        let digits = strip_non_digits(map.field(table, row, map.barcode).trim());
        let quantity = match map.quantity {
            QuantityRef::Index(col) => parse_quantity(table.cell(row, col)),
            QuantityRef::DefaultOne => 1,
        };
        for _ in 0..quantity {
            out.push(LabelRecord::new(&title, &sku, &digits));
        }
    }
    log::info!("built {} labels from {} rows", out.len(), table.rows.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnOverrides, resolve_columns};

    #[test]
    fn strips_everything_but_digits() {
        assert_eq!(strip_non_digits("EAN: 123-456-789012"), "123456789012");
        assert_eq!(strip_non_digits("   "), "");
        assert_eq!(strip_non_digits("4006381333931"), "4006381333931");
    }

    #[test]
    fn quantity_parse_rules() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" 2.9 "), 2);
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("   "), 1);
        assert_eq!(parse_quantity("lots"), 1);
        assert_eq!(parse_quantity("nan"), 1);
        assert_eq!(parse_quantity("-1"), 0);
        assert_eq!(parse_quantity("-0.5"), 0);
    }

    #[test]
    fn replicates_rows_by_quantity_in_order() {
        let table = Table::from_csv_str(
            "nombre,sku,barcode,cantidad\n\
             First,A,111111111111,2\n\
             Skipped,B,222222222222,-1\n\
             Last,C,333333333333,\n",
        )
        .unwrap();
        let map = resolve_columns(&table, &ColumnOverrides::default());
        let labels = build_labels(&table, &map);
        let titles: Vec<&str> = labels.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "First", "Last"]);
    }

    #[test]
    fn fields_are_trimmed_and_barcode_digit_stripped() {
        let table =
            Table::from_csv_str("nombre,sku,barcode\n  Widget ,  W-1 , EAN: 123-456-789012 \n")
                .unwrap();
        let map = resolve_columns(&table, &ColumnOverrides::default());
        let labels = build_labels(&table, &map);
        assert_eq!(labels[0].title, "Widget");
        assert_eq!(labels[0].sku, "W-1");
        assert_eq!(labels[0].barcode_digits, "123456789012");
    }

    #[test]
    fn unresolved_roles_read_as_empty() {
        let table = Table::from_csv_str("z1\nhello\n").unwrap();
        let map = resolve_columns(&table, &ColumnOverrides::default());
        let labels = build_labels(&table, &map);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].sku, "");
        assert_eq!(labels[0].barcode_digits, "");
    }
}
