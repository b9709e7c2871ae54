use calamine::{open_workbook, Data, Reader, Xlsx};
use hash_to_excel::{convert, convert_with, ConvertOptions, ErrorKind, RowNumbering};
use std::fs;
use std::path::{Path, PathBuf};

const HASH: &str = "a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8a9b0c1d2e3f4a5b6c7d8e9f0a1b2";

fn csv_line(name: &str, hash: &str, size: &str) -> String {
    let filler = vec!["x"; 9].join(",");
    format!("{},{},{},{}", name, hash, filler, size)
}

fn options_in(dir: &Path, input: Option<PathBuf>) -> ConvertOptions {
    ConvertOptions {
        input,
        search_dir: dir.to_path_buf(),
        output: dir.join("formatted_hash.xlsx"),
        report: Some(dir.join("formatted_hash.txt")),
        ..ConvertOptions::default()
    }
}

fn read_rows(path: &Path) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("open workbook");
    let range = workbook.worksheet_range("Sheet1").expect("Sheet1");
    range.rows().map(|row| row.to_vec()).collect()
}

fn text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => panic!("expected string cell, got {:?}", other),
    }
}

#[test]
fn test_single_record_scenario() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("hashes.csv");
    fs::write(&input, csv_line("report_2024_01_15_final", HASH, "1024")).unwrap();

    let summary = convert(&options_in(dir.path(), Some(input.clone()))).unwrap();
    assert_eq!(summary.input, input);
    assert_eq!(summary.rows_written, 1);
    assert!(summary.skipped.is_empty());

    let rows = read_rows(&summary.output);
    assert_eq!(rows.len(), 2);

    let header: Vec<String> = rows[0].iter().map(text).collect();
    assert_eq!(header, ["ลำดับ", "File name", "SHA-256", "File size"]);

    assert_eq!(rows[1][0], Data::Float(1.0));
    assert_eq!(text(&rows[1][1]), "report_2024_01\n_15_final");
    let hash_cell = text(&rows[1][2]);
    assert!(hash_cell.starts_with(&HASH[..32]));
    assert!(hash_cell.ends_with(&HASH[32..]));
    assert!(hash_cell.contains('\n'));
    assert_eq!(text(&rows[1][3]), "1024");

    let report = fs::read_to_string(summary.report.unwrap()).unwrap();
    assert_eq!(
        report,
        format!(
            "รายละเอียดปรากฏตามไฟล์ประกอบรายงาน ชื่อไฟล์ report_2024_01_15_final ค่า Hash SHA256: {}",
            HASH
        )
    );
}

#[test]
fn test_short_record_is_skipped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("hashes.csv");
    let content = [
        csv_line("first_file_name_a", "aaaa", "10"),
        "1,2,3,4,5".to_string(),
        csv_line("second_file_name_b", "bbbb", "20"),
    ]
    .join("\n");
    fs::write(&input, content).unwrap();

    let summary = convert(&options_in(dir.path(), Some(input))).unwrap();
    assert_eq!(summary.records, 3);
    assert_eq!(summary.rows_written, 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].fields, ["1", "2", "3", "4", "5"]);

    let rows = read_rows(&summary.output);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], Data::Float(1.0));
    assert_eq!(rows[2][0], Data::Float(2.0));
    assert_eq!(text(&rows[2][3]), "20");

    let report = fs::read_to_string(summary.report.unwrap()).unwrap();
    assert_eq!(report.lines().count(), 2);
    assert!(!report.contains("1,2,3"));
}

#[test]
fn test_keep_gaps_leaves_blank_row() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("hashes.csv");
    let content = [
        csv_line("a", "aaaa", "10"),
        "short".to_string(),
        csv_line("b", "bbbb", "20"),
    ]
    .join("\n");
    fs::write(&input, content).unwrap();

    let options = ConvertOptions {
        numbering: RowNumbering::SourcePosition,
        ..options_in(dir.path(), Some(input))
    };
    let summary = convert(&options).unwrap();
    let rows = read_rows(&summary.output);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2][0], Data::Empty);
    assert_eq!(rows[3][0], Data::Float(3.0));
}

#[test]
fn test_discovers_csv_in_search_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("notes.txt"), "not a csv").unwrap();
    fs::create_dir(dir.path().join("folder.csv")).unwrap();
    let input = dir.path().join("listing.csv");
    fs::write(&input, csv_line("a_b_c_d", "abcd", "1")).unwrap();

    let summary = convert(&options_in(dir.path(), None)).unwrap();
    assert_eq!(summary.input, input);
    assert_eq!(summary.rows_written, 1);
}

#[test]
fn test_no_csv_found_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("notes.txt"), "not a csv").unwrap();

    let options = options_in(dir.path(), None);
    let err = convert(&options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!options.output.exists());
    assert!(!options.report.unwrap().exists());
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let options = options_in(dir.path(), Some(dir.path().join("missing.csv")));
    let err = convert(&options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!options.output.exists());
}

#[test]
fn test_malformed_csv_is_parse_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("bad.csv");
    fs::write(&input, b"name,\xff\xfe,hash\n").unwrap();

    let options = options_in(dir.path(), Some(input));
    let err = convert(&options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(!options.output.exists());
}

#[test]
fn test_empty_csv_writes_header_only() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("empty.csv");
    fs::write(&input, "").unwrap();

    let summary = convert(&options_in(dir.path(), Some(input))).unwrap();
    assert_eq!(summary.records, 0);
    let rows = read_rows(&summary.output);
    assert_eq!(rows.len(), 1);
    assert_eq!(fs::read_to_string(summary.report.unwrap()).unwrap(), "");
}

#[test]
fn test_report_disabled() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("hashes.csv");
    fs::write(&input, csv_line("a", "abcd", "1")).unwrap();

    let options = ConvertOptions {
        report: None,
        ..options_in(dir.path(), Some(input))
    };
    let summary = convert(&options).unwrap();
    assert!(summary.report.is_none());
    assert!(!dir.path().join("formatted_hash.txt").exists());
}

#[test]
fn test_existing_output_is_overwritten() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("hashes.csv");
    fs::write(&input, csv_line("a", "abcd", "1")).unwrap();
    let options = options_in(dir.path(), Some(input));
    fs::write(&options.output, "stale").unwrap();

    convert(&options).unwrap();
    assert_eq!(read_rows(&options.output).len(), 2);
}

#[test]
fn test_unreadable_search_dir_is_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let options = ConvertOptions {
        search_dir: dir.path().join("no-such-dir"),
        ..options_in(dir.path(), None)
    };
    let err = convert(&options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!options.output.exists());
    assert!(!options.report.unwrap().exists());
}

#[test]
fn test_skips_reported_when_save_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("hashes.csv");
    let content = [csv_line("a", "aaaa", "10"), "1,2,3".to_string()].join("\n");
    fs::write(&input, content).unwrap();

    let options = ConvertOptions {
        output: dir.path().join("missing").join("out.xlsx"),
        ..options_in(dir.path(), Some(input))
    };
    let mut skipped = Vec::new();
    let result = convert_with(&options, |s| skipped.push(s.fields.clone()));
    assert!(result.is_err());
    assert!(!options.output.exists());
    assert_eq!(skipped, [vec!["1", "2", "3"]]);
}

#[test]
fn test_three_segment_name_gets_break() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("hashes.csv");
    fs::write(&input, csv_line("case_01_disk", "abcd", "1")).unwrap();

    let summary = convert(&options_in(dir.path(), Some(input))).unwrap();
    let rows = read_rows(&summary.output);
    assert_eq!(text(&rows[1][1]), "case_01_disk\n");
}
