use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::DateTime;
use parquet::column::writer::ColumnWriter;
use parquet::data_type::ByteArray;
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::parser::parse_message_type;

use service_utils::UtilsError;
use service_utils::logging::{LogContext, LogSink, Severity};
use service_utils::rows::{NormalizeOptions, ParquetRowSource, RowSource, normalize, normalize_path};
use service_utils::types::Value;

const SEEN_MS: i64 = 1_700_000_000_000;

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("service-utils-{name}-{nanos}.parquet"))
}

#[derive(Default)]
struct RecordingSink {
    failures: Mutex<Vec<Severity>>,
}

impl LogSink for RecordingSink {
    fn on_failure(&self, _ctx: &LogContext, severity: Severity, _error: &UtilsError) {
        self.failures.lock().unwrap().push(severity);
    }
}

/// Two rows; `name` is null in row 2 and `score` is null in row 1.
fn write_people_parquet(path: &PathBuf) {
    let schema_str = r#"
    message schema {
      REQUIRED INT64 id;
      OPTIONAL BINARY name (UTF8);
      OPTIONAL DOUBLE score;
      REQUIRED BOOLEAN active;
      REQUIRED INT64 seen (TIMESTAMP_MILLIS);
      REQUIRED BINARY blob;
    }
    "#;

    let schema = Arc::new(parse_message_type(schema_str).unwrap());
    let props = Arc::new(WriterProperties::builder().build());
    let file = File::create(path).unwrap();
    let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();

    let mut rg = writer.next_row_group().unwrap();
    let mut col_idx: usize = 0;
    while let Some(mut col) = rg.next_column().unwrap() {
        match col.untyped() {
            ColumnWriter::Int64ColumnWriter(w) if col_idx == 0 => {
                w.write_batch(&[1_i64, 2_i64], None, None).unwrap();
            }
            ColumnWriter::Int64ColumnWriter(w) => {
                w.write_batch(&[SEEN_MS, SEEN_MS + 1_000], None, None).unwrap();
            }
            ColumnWriter::ByteArrayColumnWriter(w) if col_idx == 1 => {
                w.write_batch(&[ByteArray::from("Ada")], Some(&[1, 0]), None)
                    .unwrap();
            }
            ColumnWriter::ByteArrayColumnWriter(w) => {
                let b1 = ByteArray::from("raw-1");
                let b2 = ByteArray::from("raw-2");
                w.write_batch(&[b1, b2], None, None).unwrap();
            }
            ColumnWriter::DoubleColumnWriter(w) => {
                w.write_batch(&[87.25_f64], Some(&[0, 1]), None).unwrap();
            }
            ColumnWriter::BoolColumnWriter(w) => {
                w.write_batch(&[true, false], None, None).unwrap();
            }
            _ => panic!("unexpected column writer in test"),
        }
        col.close().unwrap();
        col_idx += 1;
    }
    rg.close().unwrap();
    writer.close().unwrap();
}

#[test]
fn parquet_rows_normalize_with_types_and_nulls() {
    let path = tmp_file("people");
    write_people_parquet(&path);

    let mut src = ParquetRowSource::from_path(&path).unwrap();
    assert_eq!(
        src.columns().unwrap(),
        vec!["id", "name", "score", "active", "seen", "blob"]
    );

    let sink = RecordingSink::default();
    let records = normalize(&mut src, &sink);
    let _ = std::fs::remove_file(&path);

    assert_eq!(records.len(), 2);
    assert!(sink.failures.lock().unwrap().is_empty());

    let r1 = &records[0];
    assert_eq!(r1["id"], Value::Int64(1));
    assert_eq!(r1["name"], Value::Text("Ada".to_string()));
    assert!(!r1.contains_key("score"));
    assert_eq!(r1["active"], Value::Bool(true));
    assert_eq!(
        r1["seen"],
        Value::Timestamp(DateTime::from_timestamp_millis(SEEN_MS).unwrap())
    );
    // Plain BINARY decodes to text.
    assert_eq!(r1["blob"], Value::Text("raw-1".to_string()));

    let r2 = &records[1];
    assert!(!r2.contains_key("name"));
    assert_eq!(r2["score"], Value::Float64(87.25));
    assert_eq!(r2["active"], Value::Bool(false));
}

#[test]
fn parquet_by_extension() {
    let path = tmp_file("unified");
    write_people_parquet(&path);

    let sink = Arc::new(RecordingSink::default());
    let opts = NormalizeOptions {
        sink: sink.clone(),
        ..Default::default()
    };
    let records = normalize_path(&path, &opts);
    let _ = std::fs::remove_file(&path);

    assert_eq!(records.len(), 2);
    assert!(sink.failures.lock().unwrap().is_empty());
}

#[test]
fn corrupt_parquet_file_is_logged() {
    let path = tmp_file("corrupt");
    std::fs::write(&path, b"not parquet at all").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let opts = NormalizeOptions {
        sink: sink.clone(),
        ..Default::default()
    };
    let records = normalize_path(&path, &opts);
    let _ = std::fs::remove_file(&path);

    assert!(records.is_empty());
    assert_eq!(sink.failures.lock().unwrap().len(), 1);
}

#[test]
fn corrupt_page_header_is_reported_once_and_scan_ends() {
    let path = tmp_file("bad-page");
    write_people_parquet(&path);
    // Footer stays valid; the first column chunk's page header is garbage.
    let mut bytes = std::fs::read(&path).unwrap();
    bytes[4..24].fill(0xFF);
    std::fs::write(&path, &bytes).unwrap();

    let (tx, rx) = mpsc::channel();
    let worker_path = path.clone();
    thread::spawn(move || {
        let sink = RecordingSink::default();
        let mut src = ParquetRowSource::from_path(&worker_path).unwrap();
        let records = normalize(&mut src, &sink);
        let failures = sink.failures.into_inner().unwrap();
        let _ = tx.send((records.len(), failures));
    });

    let outcome = rx.recv_timeout(Duration::from_secs(10));
    let _ = std::fs::remove_file(&path);
    let (record_count, failures) = outcome.expect("normalize did not return");

    assert_eq!(record_count, 0);
    assert_eq!(failures, vec![Severity::Warning]);
}
