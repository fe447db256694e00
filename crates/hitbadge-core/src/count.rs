//! Counter value interpretation.

use serde::Serialize;

use crate::error::{HitError, Result};
use crate::key::CounterKey;

/// JSON body for `type=json` responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountBody {
    pub count: u64,
}

/// Interpret the text read from the store.
///
/// Absent means the path was never counted and reads as zero. Present text
/// must be a plain decimal `u64`; anything else is reported, not defaulted.
pub fn parse_stored(key: &CounterKey, stored: Option<&str>) -> Result<u64> {
    match stored {
        None => Ok(0),
        Some(text) => text.trim().parse::<u64>().map_err(|_| HitError::CorruptCounterValue {
            key: key.to_string(),
            value: text.to_string(),
        }),
    }
}

/// Next value after `current`.
pub fn increment(key: &CounterKey, current: u64) -> Result<u64> {
    current.checked_add(1).ok_or_else(|| HitError::CorruptCounterValue {
        key: key.to_string(),
        value: current.to_string(),
    })
}

/// Decimal digits, most significant first. `0` yields `[0]`.
pub fn decimal_digits(mut n: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(20);
    loop {
        out.push((n % 10) as u8);
        n /= 10;
        if n == 0 {
            break;
        }
    }
    out.reverse();
    out
}
