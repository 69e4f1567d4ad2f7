use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, Schema,
    UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::model::{format_number, parse_finite, AccessLevel, VenueRecord, VenueTable};
use crate::error::{DataError, DataResult};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Source column names. Defaults follow the festival's combined export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub venue: String,
    pub level: String,
    pub year: String,
    pub latitude: String,
    pub longitude: String,
    pub performances: String,
    pub detail: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            venue: "Venue address".to_string(),
            level: "Accessibility level".to_string(),
            year: "Year".to_string(),
            latitude: "Latitude".to_string(),
            longitude: "Longitude".to_string(),
            performances: "Performances #".to_string(),
            detail: "Venue accessibility".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a venue table.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the configured column names
/// * `.json`    – `[{ "Venue address": "...", "Year": 2022, ... }, ...]`
/// * `.parquet` – one column per field, any of Utf8 / Int / Float / Bool
/// * `.xlsx`    – first worksheet, header in the first row (also `.xls`,
///   `.xlsm`, `.xlsb`, `.ods`)
///
/// Rows missing latitude, longitude or year are dropped.
pub fn load_file(path: &Path, columns: &ColumnNames) -> DataResult<VenueTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let builder = match ext.as_str() {
        "csv" => load_csv(path, columns)?,
        "json" => load_json(path, columns)?,
        "parquet" | "pq" => load_parquet(path, columns)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_excel(path, columns)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    if builder.dropped > 0 {
        log::info!(
            "Dropped {} rows without coordinates or year from {}",
            builder.dropped,
            path.display()
        );
    }
    log::info!(
        "Loaded {} venue records from {}",
        builder.records.len(),
        path.display()
    );
    Ok(VenueTable::from_records(builder.records))
}

// ---------------------------------------------------------------------------
// Cell – format-independent view of one source value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Number(f64),
    Text(String),
    Null,
}

impl Cell {
    /// Untyped CSV text: numbers are inferred here and nowhere else.
    fn from_text(s: &str) -> Cell {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Cell::Null;
        }
        match parse_finite(trimmed) {
            Some(v) => Cell::Number(v),
            None => Cell::Text(s.to_string()),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => parse_finite(s.trim()),
            Cell::Null => None,
        }
    }

    fn as_coordinate(&self) -> Option<f64> {
        self.as_f64().filter(|v| v.is_finite())
    }

    /// Numeric coercion of the year; blanks, text, and fractional values
    /// count as missing.
    fn as_year(&self) -> Option<i32> {
        let v = self.as_f64()?;
        if v.is_finite() && v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
            Some(v as i32)
        } else {
            None
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Cell::Number(v) => Some(format_number(v)),
            Cell::Text(s) if s.trim().is_empty() => None,
            Cell::Text(s) => Some(s),
            Cell::Null => None,
        }
    }

    fn into_level(self) -> AccessLevel {
        match self {
            Cell::Number(v) => AccessLevel::Numeric(v),
            Cell::Text(s) if s.trim().is_empty() => AccessLevel::Missing,
            Cell::Text(s) => AccessLevel::Text(s),
            Cell::Null => AccessLevel::Missing,
        }
    }
}

/// One source row, already split into the fields we care about.
struct RowCells {
    venue: Cell,
    level: Cell,
    year: Cell,
    latitude: Cell,
    longitude: Cell,
    performances: Cell,
    detail: Cell,
}

#[derive(Default)]
struct TableBuilder {
    records: Vec<VenueRecord>,
    dropped: usize,
}

impl TableBuilder {
    fn push(&mut self, row: RowCells) {
        let (Some(latitude), Some(longitude), Some(year)) = (
            row.latitude.as_coordinate(),
            row.longitude.as_coordinate(),
            row.year.as_year(),
        ) else {
            self.dropped += 1;
            return;
        };

        self.records.push(VenueRecord::new(
            row.venue.into_text().unwrap_or_default(),
            latitude,
            longitude,
            year,
            row.level.into_level(),
            row.performances.as_f64(),
            row.detail.into_text(),
        ));
    }
}

/// Positions of the configured columns within a header row.
struct ColumnIndex {
    venue: usize,
    level: usize,
    year: usize,
    latitude: usize,
    longitude: usize,
    performances: Option<usize>,
    detail: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &[String], columns: &ColumnNames) -> DataResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| find(name).ok_or_else(|| DataError::MissingColumn(name.to_string()));

        Ok(ColumnIndex {
            venue: require(&columns.venue)?,
            level: require(&columns.level)?,
            year: require(&columns.year)?,
            latitude: require(&columns.latitude)?,
            longitude: require(&columns.longitude)?,
            performances: find(&columns.performances),
            detail: find(&columns.detail),
        })
    }

    fn positions(&self) -> impl Iterator<Item = usize> {
        [self.venue, self.level, self.year, self.latitude, self.longitude]
            .into_iter()
            .chain(self.performances)
            .chain(self.detail)
    }

    fn row(&self, cell: impl Fn(usize) -> Cell) -> RowCells {
        RowCells {
            venue: cell(self.venue),
            level: cell(self.level),
            year: cell(self.year),
            latitude: cell(self.latitude),
            longitude: cell(self.longitude),
            performances: self.performances.map(&cell).unwrap_or(Cell::Null),
            detail: self.detail.map(&cell).unwrap_or(Cell::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, columns: &ColumnNames) -> DataResult<TableBuilder> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let index = ColumnIndex::resolve(&headers, columns)?;

    let mut builder = TableBuilder::default();
    for result in reader.records() {
        let record = result?;
        builder.push(index.row(|i| Cell::from_text(record.get(i).unwrap_or(""))));
    }
    Ok(builder)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path, columns: &ColumnNames) -> DataResult<TableBuilder> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let records = root
        .as_array()
        .ok_or_else(|| DataError::InvalidShape("expected a top-level JSON array".to_string()))?;

    let objects = records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.as_object()
                .ok_or_else(|| DataError::InvalidShape(format!("row {i} is not a JSON object")))
        })
        .collect::<DataResult<Vec<_>>>()?;

    if !objects.is_empty() {
        for name in [
            &columns.venue,
            &columns.level,
            &columns.year,
            &columns.latitude,
            &columns.longitude,
        ] {
            if !objects.iter().any(|obj| obj.contains_key(name)) {
                return Err(DataError::MissingColumn(name.clone()));
            }
        }
    }

    let mut builder = TableBuilder::default();
    for obj in objects {
        let cell = |name: &str| obj.get(name).map(json_cell).unwrap_or(Cell::Null);
        builder.push(RowCells {
            venue: cell(&columns.venue),
            level: cell(&columns.level),
            year: cell(&columns.year),
            latitude: cell(&columns.latitude),
            longitude: cell(&columns.longitude),
            performances: cell(&columns.performances),
            detail: cell(&columns.detail),
        });
    }
    Ok(builder)
}

fn json_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) if s.trim().is_empty() => Cell::Null,
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Null),
        JsonValue::Bool(b) => Cell::Text(b.to_string()),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path, columns: &ColumnNames) -> DataResult<TableBuilder> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader_builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    // Validate against the file schema so a file without row groups still fails.
    let schema = reader_builder.schema().clone();
    let headers: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
    let index = ColumnIndex::resolve(&headers, columns)?;
    warn_unsupported_columns(&schema, &index);

    let reader = reader_builder.build()?;
    let mut builder = TableBuilder::default();
    for batch_result in reader {
        let batch = batch_result?;
        let decoded: Vec<ArrayRef> = batch
            .columns()
            .iter()
            .map(decode_dictionary)
            .collect::<DataResult<_>>()?;

        for row in 0..batch.num_rows() {
            builder.push(index.row(|i| arrow_cell(&decoded[i], row)));
        }
    }
    Ok(builder)
}

fn is_supported(data_type: &DataType) -> bool {
    match data_type {
        DataType::Dictionary(_, value) => is_supported(value),
        DataType::Utf8
        | DataType::LargeUtf8
        | DataType::Boolean
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => true,
        _ => false,
    }
}

/// Warn once per mapped column whose values would all read as missing.
fn warn_unsupported_columns(schema: &Schema, index: &ColumnIndex) {
    for i in index.positions() {
        let field = schema.field(i);
        if !is_supported(field.data_type()) {
            log::warn!(
                "Parquet column '{}' has unsupported type {:?}; its values are treated as missing",
                field.name(),
                field.data_type()
            );
        }
    }
}

/// Categorical (dictionary-encoded) columns are unpacked to their value type.
fn decode_dictionary(col: &ArrayRef) -> DataResult<ArrayRef> {
    match col.data_type() {
        DataType::Dictionary(_, value) => Ok(cast(col, value)?),
        _ => Ok(col.clone()),
    }
}

/// Extract a single value from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|a| Cell::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|a| Cell::Text(a.value(row).to_string())),
        DataType::Int8 => col
            .as_primitive_opt::<Int8Type>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::Int16 => col
            .as_primitive_opt::<Int16Type>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::UInt8 => col
            .as_primitive_opt::<UInt8Type>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::UInt16 => col
            .as_primitive_opt::<UInt16Type>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::UInt32 => col
            .as_primitive_opt::<UInt32Type>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::UInt64 => col
            .as_primitive_opt::<UInt64Type>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| Cell::Number(a.value(row))),
        DataType::Boolean => col
            .as_boolean_opt()
            .map(|a| Cell::Text(a.value(row).to_string())),
        // Reported once per column by `warn_unsupported_columns`.
        _ => None,
    };
    cell.unwrap_or(Cell::Null)
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// First worksheet of a workbook; the first row holds the column names.
fn load_excel(path: &Path, columns: &ColumnNames) -> DataResult<TableBuilder> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::InvalidShape("workbook has no worksheets".to_string()))??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    let index = ColumnIndex::resolve(&headers, columns)?;

    let mut builder = TableBuilder::default();
    for row in rows {
        builder.push(index.row(|i| row.get(i).map(excel_cell).unwrap_or(Cell::Null)));
    }
    Ok(builder)
}

/// Excel cells carry their own type, so text that looks numeric stays text.
fn excel_cell(data: &Data) -> Cell {
    match data {
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::String(s) if s.trim().is_empty() => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => {
            log::debug!("Excel cell error {e:?}, treating as missing");
            Cell::Null
        }
        Data::Empty => Cell::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{DictionaryArray, Float64Array, Int16Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, SchemaRef};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use crate::data::model::Category;

    const HEADER: &str =
        "Venue address,Accessibility level,Year,Latitude,Longitude,Performances #,Venue accessibility";

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn write_parquet(path: &Path, schema: SchemaRef, batches: &[RecordBatch]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        for batch in batches {
            writer.write(batch).unwrap();
        }
        writer.close().unwrap();
    }

    fn venue_schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("Venue address", DataType::Utf8, false),
            Field::new("Accessibility level", DataType::Utf8, true),
            Field::new("Year", DataType::Int64, true),
            Field::new("Latitude", DataType::Float64, true),
            Field::new("Longitude", DataType::Float64, true),
        ]))
    }

    #[test]
    fn csv_drops_rows_missing_coordinates_or_year() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{HEADER}\n\
             Venue A,1,2022,55.95,-3.19,12,Step-free entrance\n\
             Venue B,Partial,not a year,55.94,-3.20,3,\n\
             Venue C,3,2023,,-3.18,1,\n\
             Venue D,Fully accessible,2023.0,55.96,-3.17,,Lift to all floors\n"
        );
        let path = write_file(&dir, "venues.csv", &body);

        let table = load_file(&path, &ColumnNames::default()).unwrap();
        assert_eq!(table.len(), 2);

        let a = &table.records()[0];
        assert_eq!(a.venue, "Venue A");
        assert_eq!(a.year, 2022);
        assert_eq!(a.level, AccessLevel::Numeric(1.0));
        assert_eq!(a.category(), Category::Low);
        assert_eq!(a.performances, Some(12.0));
        assert_eq!(a.detail.as_deref(), Some("Step-free entrance"));

        let d = &table.records()[1];
        assert_eq!(d.year, 2023);
        assert_eq!(d.category(), Category::High);
        assert_eq!(d.performances, None);
    }

    #[test]
    fn csv_without_optional_columns_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let body = "Venue address,Accessibility level,Year,Latitude,Longitude\n\
                    Venue A,2,2022,55.95,-3.19\n";
        let path = write_file(&dir, "minimal.csv", body);

        let table = load_file(&path, &ColumnNames::default()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].category(), Category::Medium);
        assert_eq!(table.records()[0].detail, None);
    }

    #[test]
    fn csv_missing_required_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.csv", "Venue address,Year,Latitude\nA,2022,55.9\n");
        let err = load_file(&path, &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "Accessibility level"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        assert!(load_file(&path, &ColumnNames::default()).is_err());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "venues.txt", "");
        let err = load_file(&path, &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFormat(ref e) if e == "txt"));
    }

    #[test]
    fn csv_non_finite_spellings_stay_text() {
        let dir = tempfile::tempdir().unwrap();
        let body = "Venue address,Accessibility level,Year,Latitude,Longitude\n\
                    Venue A,-inf,2022,55.95,-3.19\n\
                    Venue B,nan,2022,inf,-3.19\n";
        let path = write_file(&dir, "venues.csv", body);

        let table = load_file(&path, &ColumnNames::default()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].level, AccessLevel::Text("-inf".into()));
        assert_eq!(table.records()[0].category(), Category::High);
    }

    #[test]
    fn json_records_keep_numeric_and_text_levels() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"[
            {"Venue address": "Venue A", "Accessibility level": 2, "Year": "2022",
             "Latitude": 55.95, "Longitude": -3.19, "Performances #": 4},
            {"Venue address": "Venue B", "Accessibility level": "Poor", "Year": 2023.0,
             "Latitude": 55.94, "Longitude": -3.2, "Venue accessibility": null},
            {"Venue address": "Venue C", "Accessibility level": null, "Year": null,
             "Latitude": 55.94, "Longitude": -3.2}
        ]"#;
        let path = write_file(&dir, "venues.json", body);

        let table = load_file(&path, &ColumnNames::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].level, AccessLevel::Numeric(2.0));
        assert_eq!(table.records()[0].year, 2022);
        assert_eq!(table.records()[1].level, AccessLevel::Text("Poor".into()));
        assert_eq!(table.records()[1].category(), Category::Low);
    }

    #[test]
    fn json_string_levels_stay_text() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"[
            {"Venue address": "A", "Accessibility level": "10", "Year": 2022,
             "Latitude": 55.95, "Longitude": -3.19},
            {"Venue address": "B", "Accessibility level": "0.5", "Year": 2022,
             "Latitude": 55.95, "Longitude": -3.19},
            {"Venue address": "C", "Accessibility level": 2, "Year": 2022,
             "Latitude": 55.95, "Longitude": -3.19},
            {"Venue address": "D", "Accessibility level": "2", "Year": 2022,
             "Latitude": 55.95, "Longitude": -3.19}
        ]"#;
        let path = write_file(&dir, "venues.json", body);

        let table = load_file(&path, &ColumnNames::default()).unwrap();
        let records = table.records();
        assert_eq!(records[0].level, AccessLevel::Text("10".into()));
        assert_eq!(records[0].category(), Category::Low);
        assert_eq!(records[1].level, AccessLevel::Text("0.5".into()));
        assert_eq!(records[1].category(), Category::High);
        assert_eq!(records[2].level, AccessLevel::Numeric(2.0));
        assert_eq!(records[3].level, AccessLevel::Text("2".into()));
        assert_eq!(records[3].category(), Category::Medium);

        let levels = table.filter_options().levels;
        assert_eq!(levels.len(), 4);
        assert!(levels.contains(&AccessLevel::Numeric(2.0)));
        assert!(levels.contains(&AccessLevel::Text("2".into())));
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "object.json", r#"{"Year": 2022}"#);
        let err = load_file(&path, &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, DataError::InvalidShape(_)));
    }

    #[test]
    fn parquet_columns_are_read_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("venues.parquet");

        let schema = venue_schema();
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Venue A", "Venue B", "Venue C"])),
                Arc::new(StringArray::from(vec![Some("medium"), None, Some("10")])),
                Arc::new(Int64Array::from(vec![Some(2022), None, Some(2023)])),
                Arc::new(Float64Array::from(vec![55.95, 55.94, 55.93])),
                Arc::new(Float64Array::from(vec![-3.19, -3.2, -3.21])),
            ],
        )
        .unwrap();
        write_parquet(&path, schema, &[batch]);

        let table = load_file(&path, &ColumnNames::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].venue, "Venue A");
        assert_eq!(table.records()[0].category(), Category::Medium);
        // Utf8 "10" is text containing "1", not the number ten.
        assert_eq!(table.records()[1].level, AccessLevel::Text("10".into()));
        assert_eq!(table.records()[1].category(), Category::Low);
    }

    #[test]
    fn parquet_without_rows_still_checks_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("Venue address", DataType::Utf8, false),
            Field::new("Accessibility level", DataType::Utf8, true),
            Field::new("Latitude", DataType::Float64, true),
            Field::new("Longitude", DataType::Float64, true),
        ]));
        write_parquet(&path, schema, &[]);

        let err = load_file(&path, &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "Year"));
    }

    #[test]
    fn parquet_reads_dictionary_and_small_integer_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categorical.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new(
                "Venue address",
                DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8)),
                false,
            ),
            Field::new("Accessibility level", DataType::Utf8, true),
            Field::new("Year", DataType::Int16, true),
            Field::new("Latitude", DataType::Float64, true),
            Field::new("Longitude", DataType::Float64, true),
        ]));
        let venues: DictionaryArray<Int32Type> = vec!["Venue A", "Venue B", "Venue A"]
            .into_iter()
            .collect();
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(venues),
                Arc::new(StringArray::from(vec!["Poor", "Medium", "Fully accessible"])),
                Arc::new(Int16Array::from(vec![2022, 2022, 2023])),
                Arc::new(Float64Array::from(vec![55.95, 55.94, 55.95])),
                Arc::new(Float64Array::from(vec![-3.19, -3.2, -3.19])),
            ],
        )
        .unwrap();
        write_parquet(&path, schema, &[batch]);

        let table = load_file(&path, &ColumnNames::default()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.records()[1].venue, "Venue B");
        assert_eq!(table.records()[2].year, 2023);
        assert_eq!(table.filter_options().venues, vec!["Venue A", "Venue B"]);
    }

    #[test]
    fn excel_cells_keep_their_type() {
        assert_eq!(excel_cell(&Data::Float(2.0)), Cell::Number(2.0));
        assert_eq!(excel_cell(&Data::Int(2022)), Cell::Number(2022.0));
        assert_eq!(excel_cell(&Data::String("10".into())), Cell::Text("10".into()));
        assert_eq!(excel_cell(&Data::String("  ".into())), Cell::Null);
        assert_eq!(excel_cell(&Data::Empty), Cell::Null);

        assert_eq!(
            excel_cell(&Data::String("10".into())).into_level(),
            AccessLevel::Text("10".into())
        );
        assert_eq!(excel_cell(&Data::Float(10.0)).into_level(), AccessLevel::Numeric(10.0));
    }

    #[test]
    fn corrupt_workbook_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "venues.xlsx", "not a zip archive");
        let err = load_file(&path, &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, DataError::Excel(_)));
    }

    #[test]
    fn year_coercion_rejects_fractions_and_text() {
        assert_eq!(Cell::Number(2022.0).as_year(), Some(2022));
        assert_eq!(Cell::Text(" 2021 ".into()).as_year(), Some(2021));
        assert_eq!(Cell::Number(2022.5).as_year(), None);
        assert_eq!(Cell::Text("twenty".into()).as_year(), None);
        assert_eq!(Cell::Null.as_year(), None);
    }
}
