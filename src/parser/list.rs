//! Bracketed list grammar
//!
//! ```text
//! list := ws '[' ws ( item ( ws ',' ws item )* )? ws ']' ws
//! item := one or more chars other than ',', '[' and ']' (trimmed)
//! ```

use crate::{Error, Result};

/// Split a bracketed, comma separated list into its trimmed items
pub fn parse_list(input: &str) -> Result<Vec<&str>> {
    let trimmed = input.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| Error::parser(format!("expected a bracketed list, got {:?}", input)))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            if item.is_empty() {
                Err(Error::parser(format!("empty item in list {:?}", input)))
            } else if item.contains(['[', ']']) {
                Err(Error::parser(format!("nested brackets in list {:?}", input)))
            } else {
                Ok(item)
            }
        })
        .collect()
}

/// Parse a bracketed list of floating point numbers
pub fn parse_float_list(input: &str) -> Result<Vec<f64>> {
    parse_list(input)?
        .into_iter()
        .map(|item| {
            item.parse::<f64>()
                .map_err(|_| Error::parser(format!("invalid number {:?} in list {:?}", item, input)))
        })
        .collect()
}
