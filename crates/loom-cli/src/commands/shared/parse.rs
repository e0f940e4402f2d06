use std::str::FromStr;

use anyhow::Context;
use loom_core::errors::CoreError;

/// Parse a snake_case enum flag, ignoring case, surrounding whitespace and
/// `-` versus `_`.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: FromStr<Err = CoreError>,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    normalized
        .parse()
        .with_context(|| format!("invalid {field} '{raw}'"))
}
