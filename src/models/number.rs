//! Lenient counters. Feed documents may carry any JSON number where the
//! dashboard shows a whole count (an average MTTR is often fractional).

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Whole(u64),
    Fractional(f64),
}

impl Number {
    fn rounded(self) -> u64 {
        match self {
            Number::Whole(n) => n,
            // Float-to-int `as` saturates: negatives and NaN land on 0.
            Number::Fractional(f) => f.round() as u64,
        }
    }
}

/// Any JSON number, rounded to the nearest non-negative integer.
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Number::deserialize(deserializer).map(Number::rounded)
}

/// Like [`count`], with `null` mapping to `None`.
pub fn optional_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    Ok(Option::<Number>::deserialize(deserializer)?.map(Number::rounded))
}
