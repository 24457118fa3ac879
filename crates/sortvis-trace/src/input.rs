//! Input ingestion: raw numbers in, identified elements out.

use crate::error::{Error, Result};
use crate::step::Element;

/// Longest input accepted. Every step snapshots the whole array, so trace
/// size grows roughly with the cube of the input length.
pub const MAX_INPUT_LEN: usize = 100;

/// Assign positional identities to `values`, rejecting anything that cannot
/// be ordered and inputs longer than [`MAX_INPUT_LEN`].
pub fn ingest(values: &[f64]) -> Result<Vec<Element>> {
    if values.len() > MAX_INPUT_LEN {
        return Err(Error::TooLong {
            len: values.len(),
            max: MAX_INPUT_LEN,
        });
    }

    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value.is_finite() {
                Ok(Element::new(index, value))
            } else {
                Err(Error::InvalidValue { index, value })
            }
        })
        .collect()
}

/// Parse a comma and/or whitespace separated list of numbers.
pub fn parse_values(text: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|_| Error::Parse {
                token: token.to_string(),
            })
        })
        .collect()
}
