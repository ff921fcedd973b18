mod common;

use std::fs;

use avance_tools::ToolError;
use avance_tools::config::IngestConfig;
use avance_tools::consolidate::{Progress, consolidate};
use avance_tools::io::discovery::list_candidates;
use avance_tools::model::CellValue;
use avance_tools::request::RunRequest;
use common::{Blank, Number, Text, read_back, write_sales, write_workbook};
use tempfile::tempdir;

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn dated_row(item: &str, qty: f64, zona: &str, day: &str) -> Vec<CellValue> {
    vec![
        text(item),
        CellValue::Float(qty),
        text(zona),
        text("2023"),
        text("05"),
        text(day),
    ]
}

#[test]
fn discovery_filters_by_prefix_and_extension() {
    let temp_dir = tempdir().expect("temporary directory");
    let folder = temp_dir.path();
    for name in [
        "foo.xlsx",
        "AvanceVentasINTI.2023.05.10.csv",
        "AvanceVentasINTI.2023.05.11.xlsx",
        "AvanceVentasINTI.2023.05.10.xlsx",
        "Out.xlsx",
    ] {
        fs::write(folder.join(name), b"").expect("placeholder written");
    }
    fs::create_dir(folder.join("AvanceVentasINTI.dir.xlsx")).expect("directory created");

    let names = list_candidates(folder, &IngestConfig::default()).expect("listing");
    assert_eq!(
        names,
        [
            "AvanceVentasINTI.2023.05.10.xlsx",
            "AvanceVentasINTI.2023.05.11.xlsx"
        ]
    );
}

#[test]
fn discovery_rejects_missing_folder() {
    let temp_dir = tempdir().expect("temporary directory");
    let missing = temp_dir.path().join("nope");
    assert!(matches!(
        list_candidates(&missing, &IngestConfig::default()),
        Err(ToolError::InvalidDirectory(path)) if path == missing
    ));
}

#[test]
fn consolidation_tags_each_block_with_its_file_date() {
    let temp_dir = tempdir().expect("temporary directory");
    let folder = temp_dir.path();
    write_sales(
        &folder.join("AvanceVentasINTI.2023.05.11.xlsx"),
        &[("Cafe", 3.0, "Sur")],
    );
    write_sales(
        &folder.join("AvanceVentasINTI.2023.05.10.xlsx"),
        &[("Arroz", 1.0, "Norte"), ("Leche", 2.0, "Sur")],
    );
    write_sales(&folder.join("foo.xlsx"), &[("Ignorado", 9.0, "X")]);

    let config = IngestConfig::default();
    let plan = RunRequest::new(folder.display().to_string(), "A:C", "1", "")
        .validate(&config)
        .expect("valid request");
    let mut notifications = Vec::new();
    let table = consolidate(&plan.folder, &plan.window, &config, |progress| {
        notifications.push(progress)
    })
    .expect("consolidated");

    assert_eq!(
        table.columns(),
        ["Item", "Qty", "Zona", "Year", "Month", "Day"]
    );
    assert_eq!(
        table.rows(),
        [
            dated_row("Arroz", 1.0, "Norte", "10"),
            dated_row("Leche", 2.0, "Sur", "10"),
            dated_row("Cafe", 3.0, "Sur", "11"),
        ]
    );
    assert_eq!(
        notifications,
        [
            Progress { completed: 1, total: 2 },
            Progress { completed: 2, total: 2 }
        ]
    );
}

#[test]
fn window_honours_start_row_columns_and_limit() {
    let temp_dir = tempdir().expect("temporary directory");
    let folder = temp_dir.path();
    let sheet = vec![
        vec![Text("Reporte de ventas")],
        vec![Blank],
        vec![Text("Item"), Text("Qty"), Text("Zona"), Text("Nota")],
        vec![Text("Arroz"), Number(1.0), Text("Norte"), Text("a")],
        vec![Blank, Blank, Blank, Text("solo nota")],
        vec![Text("Leche"), Number(2.0), Text("Sur"), Text("b")],
        vec![Text("Cafe"), Number(3.0), Text("Sur"), Text("c")],
    ];
    write_workbook(&folder.join("AvanceVentasINTI.2024.01.02.xlsx"), "ITEM_O", &sheet);
    write_workbook(
        &folder.join("AvanceVentasINTI.2024.01.03.xlsx"),
        "ITEM_O",
        &sheet[..4],
    );

    let config = IngestConfig::default();
    let plan = RunRequest::new(folder.display().to_string(), "B:C", "3", "2")
        .validate(&config)
        .expect("valid request");
    let table = consolidate(&plan.folder, &plan.window, &config, |_| {}).expect("consolidated");

    assert_eq!(table.columns(), ["Qty", "Zona", "Year", "Month", "Day"]);
    // Two rows from the first file (blank selection skipped), one from the shorter file.
    let quantities: Vec<&CellValue> = table.rows().iter().map(|row| &row[0]).collect();
    assert_eq!(
        quantities,
        [&CellValue::Float(1.0), &CellValue::Float(2.0), &CellValue::Float(1.0)]
    );
    let days: Vec<&CellValue> = table.rows().iter().map(|row| &row[4]).collect();
    assert_eq!(days, [&text("02"), &text("02"), &text("03")]);
}

#[test]
fn differing_column_sets_fail_the_run() {
    let temp_dir = tempdir().expect("temporary directory");
    let folder = temp_dir.path();
    write_sales(&folder.join("AvanceVentasINTI.2023.05.10.xlsx"), &[("Arroz", 1.0, "Norte")]);
    write_workbook(
        &folder.join("AvanceVentasINTI.2023.05.11.xlsx"),
        "ITEM_O",
        &[
            vec![Text("Item"), Text("Cantidad"), Text("Zona")],
            vec![Text("Cafe"), Number(3.0), Text("Sur")],
        ],
    );

    let config = IngestConfig::default();
    let plan = RunRequest::new(folder.display().to_string(), "A:C", "1", "")
        .validate(&config)
        .expect("valid request");
    let err = consolidate(&plan.folder, &plan.window, &config, |_| {}).unwrap_err();

    match err {
        ToolError::ColumnSetMismatch {
            source_name,
            expected,
            found,
        } => {
            assert_eq!(source_name, "AvanceVentasINTI.2023.05.11.xlsx");
            assert_eq!(expected, ["Item", "Qty", "Zona"]);
            assert_eq!(found, ["Item", "Cantidad", "Zona"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reordered_columns_are_aligned_by_name() {
    let temp_dir = tempdir().expect("temporary directory");
    let folder = temp_dir.path();
    write_sales(&folder.join("AvanceVentasINTI.2023.05.10.xlsx"), &[("Arroz", 1.0, "Norte")]);
    write_workbook(
        &folder.join("AvanceVentasINTI.2023.05.11.xlsx"),
        "ITEM_O",
        &[
            vec![Text("Zona"), Text("Item"), Text("Qty")],
            vec![Text("Sur"), Text("Cafe"), Number(3.0)],
        ],
    );

    let config = IngestConfig::default();
    let plan = RunRequest::new(folder.display().to_string(), "A:C", "1", "")
        .validate(&config)
        .expect("valid request");
    let table = consolidate(&plan.folder, &plan.window, &config, |_| {}).expect("consolidated");

    assert_eq!(
        table.rows()[1][..3],
        [text("Cafe"), CellValue::Float(3.0), text("Sur")]
    );
}

#[test]
fn unreadable_sources_abort_the_batch() {
    let temp_dir = tempdir().expect("temporary directory");
    let folder = temp_dir.path();
    write_sales(&folder.join("AvanceVentasINTI.2023.05.10.xlsx"), &[("Arroz", 1.0, "Norte")]);
    write_workbook(
        &folder.join("AvanceVentasINTI.2023.05.11.xlsx"),
        "OTRA",
        &[vec![Text("Item")]],
    );
    fs::write(folder.join("AvanceVentasINTI.2023.05.12.xlsx"), b"not a zip").expect("written");

    let config = IngestConfig::default();
    let plan = RunRequest::new(folder.display().to_string(), "A:C", "1", "")
        .validate(&config)
        .expect("valid request");
    let mut completed = Vec::new();
    let err = consolidate(&plan.folder, &plan.window, &config, |progress| {
        completed.push(progress.completed)
    })
    .unwrap_err();

    match err {
        ToolError::UnreadableSource { source_name, reason } => {
            assert!(source_name.ends_with("AvanceVentasINTI.2023.05.11.xlsx"));
            assert!(reason.contains("ITEM_O"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(completed, [1]);
}

#[test]
fn malformed_and_missing_sources_are_reported() {
    let temp_dir = tempdir().expect("temporary directory");
    let folder = temp_dir.path();
    let config = IngestConfig::default();
    let plan = RunRequest::new(folder.display().to_string(), "A:C", "1", "")
        .validate(&config)
        .expect("valid request");

    assert!(matches!(
        consolidate(&plan.folder, &plan.window, &config, |_| {}),
        Err(ToolError::NoMatchingFiles(_))
    ));

    write_sales(&folder.join("AvanceVentasINTI.xlsx"), &[("Arroz", 1.0, "Norte")]);
    assert!(matches!(
        consolidate(&plan.folder, &plan.window, &config, |_| {}),
        Err(ToolError::MalformedFilename(name)) if name == "AvanceVentasINTI.xlsx"
    ));
}

#[test]
fn start_row_past_the_data_is_unreadable() {
    let temp_dir = tempdir().expect("temporary directory");
    let folder = temp_dir.path();
    write_sales(&folder.join("AvanceVentasINTI.2023.05.10.xlsx"), &[("Arroz", 1.0, "Norte")]);

    let config = IngestConfig::default();
    let plan = RunRequest::new(folder.display().to_string(), "A:C", "40", "")
        .validate(&config)
        .expect("valid request");
    assert!(matches!(
        consolidate(&plan.folder, &plan.window, &config, |_| {}),
        Err(ToolError::UnreadableSource { .. })
    ));
}

#[test]
fn output_workbook_round_trips_the_table() {
    let temp_dir = tempdir().expect("temporary directory");
    let folder = temp_dir.path();
    write_sales(
        &folder.join("AvanceVentasINTI.2023.05.10.xlsx"),
        &[("Arroz", 1.5, "Norte"), ("Leche", 2.0, "Sur")],
    );

    let config = IngestConfig::default();
    let plan = RunRequest::new(folder.display().to_string(), "A:C", "1", "")
        .validate(&config)
        .expect("valid request");
    let table = consolidate(&plan.folder, &plan.window, &config, |_| {}).expect("consolidated");
    let output = folder.join("Out.xlsx");
    avance_tools::io::excel_write::write_table(&output, &table).expect("written");

    assert_eq!(
        read_back(&output),
        [
            vec!["Item", "Qty", "Zona", "Year", "Month", "Day"],
            vec!["Arroz", "1.5", "Norte", "2023", "05", "10"],
            vec!["Leche", "2", "Sur", "2023", "05", "10"],
        ]
    );
}
