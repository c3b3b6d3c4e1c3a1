//! CSV import/export on real files

mod common;

use std::fs;

use common::{table, test_model};
use whisk::messages::{AppMsg, Msg};
use whisk::runtime::App;
use whisk::table::{
    export, import, import_with_delimiter, serialize, Delimiter, ImportError, SourceError,
};

#[test]
fn test_export_trims_blank_edges_and_writes_no_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let source = table(&[
        &["", "", ""],
        &["", "name", "qty"],
        &["", "bolt", "12"],
        &["", " ", ""],
    ]);

    export(&source, &path, Delimiter::Comma).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "name,qty\nbolt,12\n");
}

#[test]
fn test_export_reimport_export_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    let source = table(&[
        &["", "", "", ""],
        &["", "\u{feff}a, with comma", "", "x"],
        &["", "", "", ""],
        &["", "\"quoted\"", "line\nbreak", ""],
        &["", "", "", ""],
    ]);

    export(&source, &first, Delimiter::Comma).unwrap();
    let reloaded = import(&first, None).unwrap();
    export(&reloaded, &second, Delimiter::Comma).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    // Interior blank row survives
    assert_eq!(reloaded.shape(), (3, 3));
    // A leading U+FEFF in the first cell is data, not a byte order mark
    assert_eq!(reloaded.get(0, 0), Ok("\u{feff}a, with comma"));
}

#[test]
fn test_all_blank_table_exports_empty_file() {
    let bytes = serialize(&table(&[&["", " "], &["", ""]]), Delimiter::Comma).unwrap();
    assert!(bytes.is_empty());
}

#[test]
fn test_import_pads_ragged_rows_and_keeps_row_zero_as_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ragged.csv");
    fs::write(&path, "h1,h2,h3\n1\n2,3\n").unwrap();

    let loaded = import(&path, None).unwrap();
    assert_eq!(loaded.shape(), (3, 3));
    assert_eq!(loaded.get(0, 0), Ok("h1"));
    assert_eq!(loaded.get(1, 2), Ok(""));
    assert!(loaded.is_rectangular());
}

#[test]
fn test_import_delimiter_from_extension_then_content() {
    let dir = tempfile::tempdir().unwrap();
    let tsv = dir.path().join("data.tsv");
    fs::write(&tsv, "a\tb\n").unwrap();
    let (_, delimiter) = import_with_delimiter(&tsv, None).unwrap();
    assert_eq!(delimiter, Delimiter::Tab);

    let txt = dir.path().join("data.txt");
    fs::write(&txt, "a;b;c\n1;2;3\n").unwrap();
    let (loaded, delimiter) = import_with_delimiter(&txt, None).unwrap();
    assert_eq!(delimiter, Delimiter::Semicolon);
    assert_eq!(loaded.shape(), (2, 3));

    // Explicit delimiter wins
    let (loaded, delimiter) = import_with_delimiter(&txt, Some(Delimiter::Comma)).unwrap();
    assert_eq!(delimiter, Delimiter::Comma);
    assert_eq!(loaded.shape(), (2, 1));
}

#[test]
fn test_import_rejects_binary_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let binary = dir.path().join("blob.csv");
    fs::write(&binary, [0x41, 0x00, 0x42]).unwrap();
    assert!(matches!(
        import(&binary, None),
        Err(ImportError::Source(SourceError::Binary { offset: 1 }))
    ));

    let missing = dir.path().join("missing.csv");
    assert!(matches!(
        import(&missing, None),
        Err(ImportError::Source(SourceError::NotFound))
    ));

    let invalid = dir.path().join("latin1.csv");
    fs::write(&invalid, [0x61, 0x0A, 0x62, 0xE9, 0x0A]).unwrap();
    let err = import(&invalid, None).unwrap_err();
    assert!(matches!(
        err,
        ImportError::Source(SourceError::InvalidUtf8 { line: 2 })
    ));
    assert_eq!(
        err.user_message(&invalid),
        "latin1.csv is not UTF-8 text (line 2)"
    );
}

#[test]
fn test_failed_export_leaves_no_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.csv");
    assert!(export(&table(&[&["a"]]), &path, Delimiter::Comma).is_err());
    assert!(!path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

// ========================================================================
// Through the runtime
// ========================================================================

#[test]
fn test_save_then_open_through_app() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.csv");

    let mut app = App::new(test_model(&[&["a", "b"], &["c", "d"]]));
    app.dispatch(Msg::set_cell(1, 1, "changed"));
    assert!(app.model.document.is_modified);

    app.dispatch(Msg::App(AppMsg::SaveFile(Some(path.clone()))));
    assert!(!app.model.document.is_modified);
    assert_eq!(app.model.document.file_path, Some(path.clone()));
    assert!(!app.model.ui.is_saving);
    assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\nc,changed\n");

    let mut other = App::new(common::blank_model(2, 2));
    other.dispatch(Msg::App(AppMsg::LoadFile {
        path: path.clone(),
        delimiter: None,
    }));
    assert_eq!(other.model.table, app.model.table);
    assert!(!other.model.history.can_undo());
    assert!(!other.model.ui.is_loading);
    common::assert_in_sync(&other.model);
}

#[test]
fn test_failed_open_keeps_current_table_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(test_model(&[&["keep"]]));
    app.dispatch(Msg::set_cell(0, 0, "edited"));

    app.dispatch(Msg::App(AppMsg::LoadFile {
        path: dir.path().join("absent.csv"),
        delimiter: None,
    }));

    assert_eq!(app.model.table.get(0, 0), Ok("edited"));
    assert!(app.model.history.can_undo());
    assert!(app.model.ui.status_message.starts_with("Error"));
    assert_eq!(app.model.document.file_path, None);
}

#[test]
fn test_save_as_tsv_uses_tab() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.tsv");
    let mut app = App::new(test_model(&[&["a", "b"]]));

    app.dispatch(Msg::App(AppMsg::SaveFile(Some(path.clone()))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "a\tb\n");
    assert_eq!(app.model.document.delimiter, Delimiter::Tab);
}
