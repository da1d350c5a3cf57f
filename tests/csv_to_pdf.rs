//! End-to-end run: CSV on disk to a paginated PDF.

use etiqueta::{ColumnOverrides, LabelPipeline, Table, build_labels, resolve_columns};
use etiqueta::{FontResource, LayoutParameters};
use std::io::Write;

fn write_csv(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("products.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn pipeline() -> LabelPipeline {
    LabelPipeline::with_font(LayoutParameters::default(), FontResource::Builtin)
}

#[test]
fn quantity_column_drives_page_count() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(
        &dir,
        "Nombre,SKU,Codigo de Barras,Cantidad\n\
         Widget Pro,W-1,4006381333931,3\n\
         Gadget Mini,G-2,012345678905,\n\
         Hidden,H-3,111111111111,-2\n",
    );

    let table = Table::from_path(&csv).unwrap();
    let map = resolve_columns(&table, &ColumnOverrides::default());
    let records = build_labels(&table, &map);
    assert_eq!(records.len(), 4); // 3 + 1 (blank means one) + 0

    let out = dir.path().join("labels.pdf");
    pipeline().generate_pdf_file(&records, &out).unwrap();

    let doc = lopdf::Document::load(&out).unwrap();
    assert_eq!(doc.get_pages().len(), 4);
}

#[test]
fn latin1_input_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.csv");
    // "Señal" in Latin-1: the ñ is the lone byte 0xF1.
    let bytes = b"nombre,sku,barcode\nSe\xF1al,S-1,4006381333931\n";
    std::fs::write(&path, bytes).unwrap();

    let table = Table::from_path(&path).unwrap();
    let map = resolve_columns(&table, &ColumnOverrides::default());
    let records = build_labels(&table, &map);
    assert_eq!(records[0].title, "Señal");

    let out = dir.path().join("latin1.pdf");
    pipeline().generate_pdf_file(&records, &out).unwrap();
    assert_eq!(lopdf::Document::load(&out).unwrap().get_pages().len(), 1);
}

#[test]
fn pages_are_label_sized() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, "nombre,sku,barcode\nWidget,W-1,4006381333931\n");
    let table = Table::from_path(&csv).unwrap();
    let map = resolve_columns(&table, &ColumnOverrides::default());
    let records = build_labels(&table, &map);

    let out = dir.path().join("labels.pdf");
    pipeline().generate_pdf_file(&records, &out).unwrap();

    let doc = lopdf::Document::load(&out).unwrap();
    for (_, page_id) in doc.get_pages() {
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let width_pt = media_box[2].as_float().unwrap();
        let height_pt = media_box[3].as_float().unwrap();
        assert!((width_pt - etiqueta::units::mm_to_pt(51.0)).abs() < 0.01);
        assert!((height_pt - etiqueta::units::mm_to_pt(25.0)).abs() < 0.01);
    }
}
