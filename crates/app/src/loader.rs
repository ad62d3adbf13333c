//! CSV ingestion of raw bench measurements

use std::fs::File;
use std::io::Read;
use std::path::Path;

use electrical::MeasurementRecord;
use log::{debug, info};

use crate::config::ColumnNames;
use crate::error::{AppError, Result};

/// Positions of the configured columns within the CSV header
struct ColumnIndex {
    time: usize,
    speed: usize,
    torque: usize,
    voltage_d: usize,
    voltage_q: usize,
    current_d: usize,
    current_q: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, names: &ColumnNames) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| AppError::MissingColumn(name.to_string()))
        };
        Ok(ColumnIndex {
            time: find(&names.time)?,
            speed: find(&names.speed)?,
            torque: find(&names.torque)?,
            voltage_d: find(&names.voltage_d)?,
            voltage_q: find(&names.voltage_q)?,
            current_d: find(&names.current_d)?,
            current_q: find(&names.current_q)?,
        })
    }
}

fn field(record: &csv::StringRecord, index: usize, row: usize, column: &str) -> Result<f64> {
    let raw = record.get(index).unwrap_or("").trim();
    raw.parse::<f64>().map_err(|_| AppError::Parse {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Read measurement records, mapping the configured header names onto the
/// standard record fields. Extra columns are ignored.
pub fn read_records<R: Read>(reader: R, names: &ColumnNames) -> Result<Vec<MeasurementRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let index = ColumnIndex::resolve(csv_reader.headers()?, names)?;

    let mut records = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let record = result?;
        // 1-based data row, header excluded
        let row = i + 1;
        records.push(MeasurementRecord {
            time_s: field(&record, index.time, row, &names.time)?,
            speed_rpm: field(&record, index.speed, row, &names.speed)?,
            torque_nm: field(&record, index.torque, row, &names.torque)?,
            voltage_d: field(&record, index.voltage_d, row, &names.voltage_d)?,
            voltage_q: field(&record, index.voltage_q, row, &names.voltage_q)?,
            current_d: field(&record, index.current_d, row, &names.current_d)?,
            current_q: field(&record, index.current_q, row, &names.current_q)?,
        });
    }
    debug!("read {} rows", records.len());
    Ok(records)
}

pub fn load_records<P: AsRef<Path>>(path: P, names: &ColumnNames) -> Result<Vec<MeasurementRecord>> {
    let path = path.as_ref();
    let records = read_records(File::open(path)?, names)?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BENCH: &str = "\
time_s,speed_rpm,torque_nm,ud,uq,id,iq,temperature
0.0,1000,1.5,-5.0,20.0,-10.0,10.0,40
0.1, 1500 ,2.0,-6.5,30.0,-20.0,15.0,41
";

    #[test]
    fn test_reads_default_columns() {
        let records = read_records(BENCH.as_bytes(), &ColumnNames::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1],
            MeasurementRecord {
                time_s: 0.1,
                speed_rpm: 1500.0,
                torque_nm: 2.0,
                voltage_d: -6.5,
                voltage_q: 30.0,
                current_d: -20.0,
                current_q: 15.0,
            }
        );
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "Iq,Id,Vq,Vd,T,n,t\n10,-10,20,-5,1.5,1000,0\n";
        let names = ColumnNames {
            time: "t".into(),
            speed: "n".into(),
            torque: "T".into(),
            voltage_d: "Vd".into(),
            voltage_q: "Vq".into(),
            current_d: "Id".into(),
            current_q: "Iq".into(),
        };
        let records = read_records(csv.as_bytes(), &names).unwrap();
        assert_eq!(records[0].current_d, -10.0);
        assert_eq!(records[0].current_q, 10.0);
        assert_eq!(records[0].speed_rpm, 1000.0);
    }

    #[test]
    fn test_missing_column_is_named() {
        let csv = "time_s,speed_rpm,torque_nm,ud,uq,id\n0,1000,1,1,1,1\n";
        let err = read_records(csv.as_bytes(), &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, AppError::MissingColumn(ref c) if c == "iq"));
    }

    #[test]
    fn test_parse_error_names_row_and_column() {
        let csv = "time_s,speed_rpm,torque_nm,ud,uq,id,iq\n0,1000,1,1,1,1,1\n0.1,fast,1,1,1,1,1\n";
        let err = read_records(csv.as_bytes(), &ColumnNames::default()).unwrap_err();
        match err {
            AppError::Parse { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "speed_rpm");
                assert_eq!(value, "fast");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let csv = "time_s,speed_rpm,torque_nm,ud,uq,id,iq\n";
        assert!(read_records(csv.as_bytes(), &ColumnNames::default()).unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("tablegen_no_such_file.csv");
        assert!(matches!(load_records(&path, &ColumnNames::default()), Err(AppError::Io(_))));
    }
}
