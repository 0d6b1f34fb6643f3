use super::{Cell, Dataset};
use crate::app::DashboardError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::{fmt::Display, path::Path};

/// file formats accepted for dataset uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Spreadsheet,
}

impl Display for DatasetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetFormat::Csv => write!(f, "csv"),
            DatasetFormat::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

impl TryFrom<&Path> for DatasetFormat {
    type Error = DashboardError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(DatasetFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(DatasetFormat::Spreadsheet),
            _ => Err(DashboardError::UploadParseError {
                filepath: path.display().to_string(),
                message: String::from("unsupported file type, expected .csv or a spreadsheet"),
            }),
        }
    }
}

/// reads an uploaded dataset, choosing the parser by file extension.
/// spreadsheets are read from their first worksheet.
pub fn read_dataset(path: &Path) -> Result<Dataset, DashboardError> {
    let format = DatasetFormat::try_from(path)?;
    log::info!("reading {format} upload {}", path.display());
    let result = match format {
        DatasetFormat::Csv => std::fs::File::open(path)
            .map_err(|e| e.to_string())
            .and_then(read_csv),
        DatasetFormat::Spreadsheet => read_spreadsheet(path),
    };
    result.map_err(|message| DashboardError::UploadParseError {
        filepath: path.display().to_string(),
        message,
    })
}

/// reads CSV data with a header row
pub fn read_csv<R: std::io::Read>(reader: R) -> Result<Dataset, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(String::from)
        .collect::<Vec<_>>();
    let rows = csv_reader
        .records()
        .map(|r| {
            let record = r.map_err(|e| e.to_string())?;
            Ok(record.iter().map(Cell::parse).collect::<Vec<_>>())
        })
        .collect::<Result<Vec<_>, String>>()?;
    Dataset::new(headers, rows)
}

fn read_spreadsheet(path: &Path) -> Result<Dataset, String> {
    let mut workbook = open_workbook_auto(path).map_err(|e| e.to_string())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| String::from("workbook has no worksheets"))?
        .map_err(|e| e.to_string())?;
    dataset_from_range(&range)
}

/// builds a dataset from a worksheet whose first row holds the headers
fn dataset_from_range(range: &Range<Data>) -> Result<Dataset, String> {
    let mut rows = range.rows();
    let headers = rows
        .next()
        .ok_or_else(|| String::from("no columns to parse from file"))?
        .iter()
        .map(|d| match d {
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>();
    let body = rows
        .map(|row| row.iter().map(spreadsheet_cell).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    Dataset::new(headers, body)
}

fn spreadsheet_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) if f.is_nan() => Cell::Empty,
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => Cell::parse(s),
        Data::Error(_) => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() {
        let src = "City,PM10 (μg/m3),NO2 (μg/m3)\nDelhi,120,40\nParis,,25\n";
        let ds = read_csv(src.as_bytes()).unwrap();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.headers(), &["City", "PM10 (μg/m3)", "NO2 (μg/m3)"]);
        assert_eq!(ds.rows()[1][1], Cell::Empty);
    }

    #[test]
    fn test_ragged_csv_fails() {
        let src = "a,b\n1,2\n3\n";
        assert!(read_csv(src.as_bytes()).is_err());
    }

    #[test]
    fn test_empty_csv_fails() {
        assert!(read_csv("".as_bytes()).is_err());
    }

    #[test]
    fn test_format_by_extension() {
        assert_eq!(
            DatasetFormat::try_from(Path::new("data.CSV")).unwrap(),
            DatasetFormat::Csv
        );
        assert_eq!(
            DatasetFormat::try_from(Path::new("data.xlsx")).unwrap(),
            DatasetFormat::Spreadsheet
        );
        let err = DatasetFormat::try_from(Path::new("data.parquet")).unwrap_err();
        assert_eq!(err.code(), "upload_parse_error");
    }

    #[test]
    fn test_spreadsheet_cells() {
        assert_eq!(spreadsheet_cell(&Data::Empty), Cell::Empty);
        assert_eq!(spreadsheet_cell(&Data::Int(42)), Cell::Number(42.0));
        assert_eq!(spreadsheet_cell(&Data::Float(12.5)), Cell::Number(12.5));
        assert_eq!(spreadsheet_cell(&Data::Float(f64::NAN)), Cell::Empty);
        assert_eq!(spreadsheet_cell(&Data::Bool(true)), Cell::Bool(true));
        assert_eq!(
            spreadsheet_cell(&Data::Error(calamine::CellErrorType::Div0)),
            Cell::Empty
        );
        assert_eq!(
            spreadsheet_cell(&Data::String(String::from("Delhi"))),
            Cell::Text(String::from("Delhi"))
        );
        assert_eq!(
            spreadsheet_cell(&Data::String(String::from("33.1"))),
            Cell::Number(33.1)
        );
        for marker in ["NA", "#N/A", "null", ""] {
            assert_eq!(spreadsheet_cell(&Data::String(String::from(marker))), Cell::Empty);
        }
    }

    #[test]
    fn test_dataset_from_worksheet() {
        let mut range: Range<Data> = Range::new((0, 0), (3, 2));
        range.set_value((0, 0), Data::String(String::from("City or Locality")));
        range.set_value((0, 1), Data::String(String::from("PM10 (μg/m3)")));
        // (0, 2) is an unnamed header cell
        range.set_value((1, 0), Data::String(String::from("Delhi")));
        range.set_value((1, 1), Data::Float(210.0));
        range.set_value((1, 2), Data::Int(1));
        range.set_value((2, 0), Data::String(String::from("Paris")));
        range.set_value((2, 1), Data::String(String::from("NA")));
        range.set_value((2, 2), Data::Bool(false));
        range.set_value((3, 0), Data::String(String::from("Lima")));
        range.set_value((3, 1), Data::Int(48));
        let ds = dataset_from_range(&range).unwrap();
        assert_eq!(ds.headers(), &["City or Locality", "PM10 (μg/m3)", ""]);
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(
            ds.missing_counts(),
            vec![
                (String::from("City or Locality"), 0),
                (String::from("PM10 (μg/m3)"), 1),
                (String::new(), 1)
            ]
        );
        assert_eq!(ds.numeric_values("PM10 (μg/m3)"), Some(vec![210.0, 48.0]));
    }

    #[test]
    fn test_empty_worksheet_fails() {
        let range: Range<Data> = Range::empty();
        assert!(dataset_from_range(&range).is_err());
    }

    #[test]
    fn test_unreadable_spreadsheet_is_upload_error() {
        let path = std::env::temp_dir().join(format!("airq-{}-broken.xlsx", std::process::id()));
        std::fs::write(&path, "not a zip archive").unwrap();
        let err = read_dataset(&path).unwrap_err();
        assert_eq!(err.code(), "upload_parse_error");
        let _ = std::fs::remove_file(path);
    }
}
