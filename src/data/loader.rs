use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrow::json::LineDelimitedWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{BikeDataset, DayRecord, HourRecord};

/// Extensions tried, in order, when resolving a table inside a directory.
const TABLE_EXTENSIONS: [&str; 4] = ["csv", "parquet", "pq", "json"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the hourly and daily tables and validate them together.
pub fn load_dataset(hour_path: &Path, day_path: &Path) -> Result<BikeDataset> {
    let hours: Vec<HourRecord> = load_table(hour_path)
        .with_context(|| format!("loading hourly table {}", hour_path.display()))?;
    let days: Vec<DayRecord> = load_table(day_path)
        .with_context(|| format!("loading daily table {}", day_path.display()))?;

    log::info!(
        "Loaded {} hourly rows from {} and {} daily rows from {}",
        hours.len(),
        hour_path.display(),
        days.len(),
        day_path.display()
    );

    Ok(BikeDataset::new(hours, days)?)
}

/// Find `hour.*` and `day.*` inside `dir`, preferring csv, then parquet, then json.
pub fn resolve_paths(dir: &Path) -> Result<(PathBuf, PathBuf), DataError> {
    Ok((find_table(dir, "hour")?, find_table(dir, "day")?))
}

fn find_table(dir: &Path, stem: &'static str) -> Result<PathBuf, DataError> {
    TABLE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
        .ok_or_else(|| DataError::TableNotFound {
            stem,
            dir: dir.to_path_buf(),
        })
}

/// Load one table of rows from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, columns matched by name
/// * `.json`    – `[{ "dteday": "2011-01-01", "cnt": 16, ... }, ...]`
/// * `.parquet` – one column per field, any row-group layout
pub fn load_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    reader
        .deserialize::<T>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the layout of `df.to_json(orient='records')`.
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let JsonValue::Array(records) = root else {
        bail!("Expected top-level JSON array");
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| {
            serde_json::from_value(rec).with_context(|| format!("JSON record {i}"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Each record batch is rendered to line-delimited JSON by Arrow and the
/// rows are deserialised from there, so parquet files written by **Pandas**
/// (`df.to_parquet()`) or **Polars** share one typed path with the other
/// formats. Date32 and timestamp columns render as ISO-8601 text.
fn load_parquet<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for (batch_no, batch_result) in reader.enumerate() {
        let batch = batch_result.context("reading parquet record batch")?;

        let mut writer = LineDelimitedWriter::new(Vec::new());
        writer
            .write(&batch)
            .with_context(|| format!("converting record batch {batch_no}"))?;
        writer.finish()?;
        let buf = writer.into_inner();

        for (i, row) in serde_json::Deserializer::from_slice(&buf)
            .into_iter::<T>()
            .enumerate()
        {
            rows.push(row.with_context(|| format!("batch {batch_no}, row {i}"))?);
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use arrow::array::{Array, Date32Array, Float64Array, Int64Array};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::tests::date;

    const HOUR_HEADER: &str = "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";
    const DAY_HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    fn write_fixture(dir: &Path) -> (PathBuf, PathBuf) {
        let hour = dir.join("hour.csv");
        let day = dir.join("day.csv");
        fs::write(
            &hour,
            format!(
                "{HOUR_HEADER}\n\
                 1,2011-01-01,1,0,1,0,0,6,0,1,0.24,0.2879,0.81,0,3,13,16\n\
                 2,2011-01-01,1,0,1,1,0,6,0,1,0.22,0.2727,0.8,0,8,32,40\n\
                 3,2011-01-02,1,0,1,0,0,0,0,2,0.46,0.4545,0.88,0.2985,4,13,17\n"
            ),
        )
        .unwrap();
        fs::write(
            &day,
            format!(
                "{DAY_HEADER}\n\
                 1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985\n\
                 2,2011-01-02,1,0,1,0,0,0,2,0.363478,0.353739,0.696087,0.248539,131,670,801\n"
            ),
        )
        .unwrap();
        (hour, day)
    }

    #[test]
    fn loads_csv_pair() {
        let dir = tempfile::tempdir().unwrap();
        let (hour, day) = write_fixture(dir.path());

        let ds = load_dataset(&hour, &day).unwrap();
        assert_eq!(ds.hours.len(), 3);
        assert_eq!(ds.days.len(), 2);
        assert_eq!(ds.hours[1].hr, 1);
        assert_eq!(ds.hours[1].cnt, 40);
        assert_eq!(ds.days[0].cnt, 985);
        assert_eq!(ds.date_range(), (date(2011, 1, 1), date(2011, 1, 2)));
    }

    #[test]
    fn csv_error_names_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hour.csv");
        fs::write(
            &path,
            format!("{HOUR_HEADER}\n1,not-a-date,1,0,1,0,0,6,0,1,0.24,0.2879,0.81,0,3,13,16\n"),
        )
        .unwrap();

        let err = load_table::<HourRecord>(&path).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"), "{err:#}");
    }

    #[test]
    fn loads_json_records_with_epoch_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day.json");
        // 1293840000000 ms = 2011-01-01T00:00:00Z
        fs::write(
            &path,
            r#"[
                {"instant":1,"dteday":1293840000000,"season":1,"yr":0,"mnth":1,"holiday":0,
                 "weekday":6,"workingday":0,"weathersit":2,"temp":0.344167,"atemp":0.363625,
                 "hum":0.805833,"windspeed":0.160446,"casual":331,"registered":654,"cnt":985},
                {"instant":2,"dteday":"2011-01-02","season":1,"yr":0,"mnth":1,"holiday":0,
                 "weekday":0,"workingday":0,"weathersit":2,"temp":0.363478,"atemp":0.353739,
                 "hum":0.696087,"windspeed":0.248539,"casual":131,"registered":670,"cnt":801}
            ]"#,
        )
        .unwrap();

        let days: Vec<DayRecord> = load_table(&path).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].dteday, date(2011, 1, 1));
        assert_eq!(days[1].dteday, date(2011, 1, 2));
    }

    #[test]
    fn json_must_be_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day.json");
        fs::write(&path, r#"{"cnt": 1}"#).unwrap();
        assert!(load_table::<DayRecord>(&path).is_err());
    }

    #[test]
    fn loads_parquet_with_date32_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day.parquet");

        let int_cols = [
            "instant", "season", "yr", "mnth", "holiday", "weekday", "workingday", "weathersit",
            "casual", "registered", "cnt",
        ];
        let float_cols = ["temp", "atemp", "hum", "windspeed"];

        let mut fields = vec![Field::new("dteday", DataType::Date32, false)];
        fields.extend(int_cols.iter().map(|c| Field::new(*c, DataType::Int64, false)));
        fields.extend(float_cols.iter().map(|c| Field::new(*c, DataType::Float64, false)));
        let schema = Arc::new(Schema::new(fields));

        // 14975 days after the epoch = 2011-01-01
        let mut columns: Vec<Arc<dyn Array>> =
            vec![Arc::new(Date32Array::from(vec![14975, 14976]))];
        for c in int_cols {
            let v = if c == "cnt" { vec![985, 801] } else { vec![1, 1] };
            columns.push(Arc::new(Int64Array::from(v)));
        }
        for _ in float_cols {
            columns.push(Arc::new(Float64Array::from(vec![0.5, 0.25])));
        }
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let days: Vec<DayRecord> = load_table(&path).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].dteday, date(2011, 1, 1));
        assert_eq!(days[1].cnt, 801);
        assert_eq!(days[1].hum, 0.25);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_table::<DayRecord>(Path::new("day.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn resolves_tables_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hour.json"), "[]").unwrap();
        fs::write(dir.path().join("hour.csv"), "").unwrap();
        fs::write(dir.path().join("day.parquet"), "").unwrap();

        let (hour, day) = resolve_paths(dir.path()).unwrap();
        assert_eq!(hour, dir.path().join("hour.csv"));
        assert_eq!(day, dir.path().join("day.parquet"));

        fs::remove_file(dir.path().join("day.parquet")).unwrap();
        assert!(matches!(
            resolve_paths(dir.path()),
            Err(DataError::TableNotFound { stem: "day", .. })
        ));
    }
}
