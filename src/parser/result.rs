//! Prediction result table decoding
//!
//! flexfringe writes one row per predicted trace into a `;` delimited table:
//!
//! ```text
//! row nr; abbadingo trace; state sequence; score sequence; sum scores; mean scores; min score
//! 0; "1 3 a b c"; [0,1,2]; [-0.5,-0.2,-0.1]; -0.8; -0.26; -0.5
//! ```

use super::list::{parse_float_list, parse_list};
use crate::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const ROW_NR: &str = "row nr";
pub const ABBADINGO_TRACE: &str = "abbadingo trace";
pub const ABBADINGO_TYPE: &str = "abbadingo type";
pub const ABBADINGO_LENGTH: &str = "abbadingo length";
pub const STATE_SEQUENCE: &str = "state sequence";
pub const SCORE_SEQUENCE: &str = "score sequence";
pub const SUM_SCORES: &str = "sum scores";
pub const MEAN_SCORES: &str = "mean scores";
pub const MIN_SCORE: &str = "min score";

/// A trace line in abbadingo format: `<type> <length> <symbol>...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbbadingoTrace {
    pub trace_type: String,
    /// Kept as written by flexfringe
    pub length: String,
    pub symbols: Vec<String>,
    /// The whole trace with whitespace and surrounding quotes removed
    pub text: String,
}

impl AbbadingoTrace {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
        let text = trimmed.strip_suffix('"').unwrap_or(trimmed);

        let mut parts = text.split(' ');
        let (Some(trace_type), Some(length)) = (parts.next(), parts.next()) else {
            return Err(Error::parser(format!(
                "abbadingo trace {:?} needs a type and a length",
                raw
            )));
        };

        Ok(Self {
            trace_type: trace_type.to_string(),
            length: length.to_string(),
            symbols: parts.map(str::to_string).collect(),
            text: text.to_string(),
        })
    }
}

/// One predicted trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub row_nr: u64,
    pub trace_type: String,
    pub trace_length: String,
    /// This row's own trace text
    pub trace: String,
    pub symbols: Vec<String>,
    pub state_sequence: Vec<String>,
    pub score_sequence: Vec<f64>,
    pub sum_scores: f64,
    pub mean_scores: f64,
    pub min_score: f64,
    /// Columns this crate does not interpret, in file order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

/// The decoded result file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    /// Header names as found in the file, trimmed
    pub headers: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Column order after decoding, excluding the `row nr` key
    ///
    /// The three abbadingo columns come first, followed by the remaining
    /// file columns in order.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec![
            ABBADINGO_TYPE.to_string(),
            ABBADINGO_LENGTH.to_string(),
            ABBADINGO_TRACE.to_string(),
        ];
        columns.extend(
            self.headers
                .iter()
                .filter(|h| h.as_str() != ROW_NR && h.as_str() != ABBADINGO_TRACE)
                .cloned(),
        );
        columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a row by its `row nr` key
    pub fn row(&self, row_nr: u64) -> Option<&ResultRow> {
        self.rows.iter().find(|row| row.row_nr == row_nr)
    }
}

/// Column positions of the interpreted columns
struct Layout {
    row_nr: usize,
    trace: usize,
    states: usize,
    scores: usize,
    sum: usize,
    mean: usize,
    min: usize,
}

impl Layout {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::parser(format!("result file has no {:?} column", name)))
        };

        Ok(Self {
            row_nr: find(ROW_NR)?,
            trace: find(ABBADINGO_TRACE)?,
            states: find(STATE_SEQUENCE)?,
            scores: find(SCORE_SEQUENCE)?,
            sum: find(SUM_SCORES)?,
            mean: find(MEAN_SCORES)?,
            min: find(MIN_SCORE)?,
        })
    }

    fn is_interpreted(&self, idx: usize) -> bool {
        [
            self.row_nr,
            self.trace,
            self.states,
            self.scores,
            self.sum,
            self.mean,
            self.min,
        ]
        .contains(&idx)
    }
}

/// Parse the result file written by `flexfringe --mode=predict`
pub fn parse_result_file(path: impl AsRef<Path>) -> Result<ResultTable> {
    let path = path.as_ref();
    tracing::debug!("Parsing result file {:?}", path);
    let file = File::open(path)?;
    parse_result_reader(file)
}

/// Parse a result table from any reader
pub fn parse_result_reader<R: Read>(reader: R) -> Result<ResultTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let layout = Layout::from_headers(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let row_nr = field(layout.row_nr)
            .trim()
            .parse::<u64>()
            .map_err(|_| Error::parser(format!("invalid row nr {:?}", field(layout.row_nr))))?;
        let at = |column: &str, err: Error| {
            Error::parser(format!("row {} column {:?}: {}", row_nr, column, err))
        };

        let trace =
            AbbadingoTrace::parse(field(layout.trace)).map_err(|e| at(ABBADINGO_TRACE, e))?;
        let state_sequence = parse_list(field(layout.states))
            .map_err(|e| at(STATE_SEQUENCE, e))?
            .into_iter()
            .map(str::to_string)
            .collect();
        let score_sequence =
            parse_float_list(field(layout.scores)).map_err(|e| at(SCORE_SEQUENCE, e))?;

        let float = |idx: usize, column: &str| {
            let raw = field(idx);
            raw.trim().parse::<f64>().map_err(|_| {
                Error::parser(format!(
                    "row {} column {:?}: invalid number {:?}",
                    row_nr, column, raw
                ))
            })
        };

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| !layout.is_interpreted(*idx))
            .map(|(idx, name)| (name.clone(), field(idx).trim().to_string()))
            .collect();

        rows.push(ResultRow {
            row_nr,
            trace_type: trace.trace_type,
            trace_length: trace.length,
            trace: trace.text,
            symbols: trace.symbols,
            state_sequence,
            score_sequence,
            sum_scores: float(layout.sum, SUM_SCORES)?,
            mean_scores: float(layout.mean, MEAN_SCORES)?,
            min_score: float(layout.min, MIN_SCORE)?,
            extra,
        });
    }

    tracing::debug!("Parsed {} result rows", rows.len());
    Ok(ResultTable { headers, rows })
}
