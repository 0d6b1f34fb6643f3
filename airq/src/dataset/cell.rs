use serde::Serialize;
use std::fmt::Display;

/// string values read as missing, in addition to empty cells
pub const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// one value of an uploaded dataset
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Number(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    /// interprets a raw text field, recognizing missing markers, booleans
    /// and numbers before falling back to text.
    pub fn parse(raw: &str) -> Cell {
        if NA_VALUES.contains(&raw) {
            return Cell::Empty;
        }
        match raw {
            "True" | "TRUE" | "true" => return Cell::Bool(true),
            "False" | "FALSE" | "false" => return Cell::Bool(false),
            _ => {}
        }
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_nan() => Cell::Empty,
            Ok(n) => Cell::Number(n),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// numeric view of the cell; booleans count as 1 and 0
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if !n.is_nan() => Some(*n),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => write!(f, "NaN"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cell;

    #[test]
    fn test_parse_cells() {
        assert_eq!(Cell::parse("12.5"), Cell::Number(12.5));
        assert_eq!(Cell::parse(" 7"), Cell::Number(7.0));
        assert_eq!(Cell::parse("TRUE"), Cell::Bool(true));
        assert_eq!(Cell::parse("Delhi"), Cell::Text(String::from("Delhi")));
        for missing in ["", "NA", "NaN", "null", "#N/A", "None", "<NA>"] {
            assert!(Cell::parse(missing).is_missing(), "'{missing}' should be missing");
        }
    }

    #[test]
    fn test_numeric_view() {
        assert_eq!(Cell::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Cell::Text(String::from("x")).as_f64(), None);
        assert_eq!(Cell::Empty.as_f64(), None);
    }
}
