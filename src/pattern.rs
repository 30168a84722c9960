use crate::pos::Pos2;
use regex::Regex;
use std::{fmt, path::Path, sync::OnceLock};

/// The character marking a live cell in plaintext patterns
pub const ALIVE: char = 'O';

/// The most live cells a run length encoded pattern may expand to
pub const MAX_RLE_CELLS: usize = 1 << 24;

/// The offsets of every [`ALIVE`] marker in `text`, by line and character
///
/// Every other character is skipped, lines may be ragged.
pub fn plaintext_cells(text: &str) -> impl Iterator<Item = Pos2> + '_ {
    text.lines().enumerate().flat_map(|(row, line)| {
        line.chars()
            .enumerate()
            .filter(|&(_, c)| c == ALIVE)
            .map(move |(col, _)| Pos2::new(col as i32, row as i32))
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A run count that is not a usable number
    InvalidRun { line: usize, run: String },
    /// A rule other than B3/S23 in an RLE header
    UnsupportedRule(String),
    /// A pattern expanding to more than [`MAX_RLE_CELLS`] live cells
    TooManyCells { line: usize },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRun { line, run } => write!(f, "invalid run count {run:?} on line {line}"),
            Self::UnsupportedRule(rule) => write!(f, "unsupported rule {rule:?}, only B3/S23 is simulated"),
            Self::TooManyCells { line } => {
                write!(f, "pattern exceeds {MAX_RLE_CELLS} live cells on line {line}")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// Decodes a pattern file into live cell offsets from its top-left corner
pub trait PatternDecoder {
    fn decode(&self, text: &str) -> Result<Vec<Pos2>, PatternError>;
}

/// The plaintext `.cells` format
///
/// Lines starting with `!` are comments, the rest are read like
/// [`GameOfLife::parse_pattern`](crate::GameOfLife::parse_pattern) reads them.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plaintext;

impl PatternDecoder for Plaintext {
    fn decode(&self, text: &str) -> Result<Vec<Pos2>, PatternError> {
        let body = text
            .lines()
            .filter(|line| !line.starts_with('!'))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(plaintext_cells(&body).collect())
    }
}

/// The run length encoded `.rle` format
#[derive(Debug, Default, Clone, Copy)]
pub struct RunLengthEncoded;

impl RunLengthEncoded {
    fn token_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"(\d*)([bo$!])").expect("valid token regex"))
    }
    fn rule_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"rule\s*=\s*([^\s,]+)").expect("valid rule regex"))
    }

    fn check_header(header: &str) -> Result<(), PatternError> {
        let Some(caps) = Self::rule_regex().captures(header) else {
            return Ok(());
        };
        let rule = &caps[1];
        match rule.to_ascii_uppercase().as_str() {
            "B3/S23" | "23/3" => Ok(()),
            _ => Err(PatternError::UnsupportedRule(rule.to_owned())),
        }
    }
}

impl PatternDecoder for RunLengthEncoded {
    fn decode(&self, text: &str) -> Result<Vec<Pos2>, PatternError> {
        let mut alive = Vec::new();
        let mut cursor = Pos2::zero();
        'lines: for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if line.starts_with('x') {
                Self::check_header(line)?;
                continue;
            }

            let line_no = line_no + 1;
            let invalid_run = |run: &str| PatternError::InvalidRun {
                line: line_no,
                run: run.to_owned(),
            };
            for (_, [run_str, tag]) in Self::token_regex().captures_iter(line).map(|c| c.extract()) {
                let run = match run_str {
                    "" => 1,
                    s => s.parse::<i32>().map_err(|_| invalid_run(s))?,
                };
                // the cursor has to stay addressable after the run
                let advance = |from: i32| from.checked_add(run).ok_or_else(|| invalid_run(run_str));
                match tag {
                    "!" => break 'lines,
                    "o" => {
                        let end = advance(cursor.x)?;
                        if alive.len() + run as usize > MAX_RLE_CELLS {
                            return Err(PatternError::TooManyCells { line: line_no });
                        }
                        alive.extend((cursor.x..end).map(|x| Pos2::new(x, cursor.y)));
                        cursor.x = end;
                    }
                    "b" => cursor.x = advance(cursor.x)?,
                    "$" => {
                        cursor.x = 0;
                        cursor.y = advance(cursor.y)?;
                    }
                    _ => unreachable!("regex only matches b, o, $ and !"),
                }
            }
        }

        Ok(alive)
    }
}

/// Picks a decoder from the file extension, `.rle` or plaintext otherwise
pub fn decoder_for_path(path: &Path) -> Box<dyn PatternDecoder> {
    let is_rle = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("rle"));
    if is_rle {
        Box::new(RunLengthEncoded)
    } else {
        Box::new(Plaintext)
    }
}
