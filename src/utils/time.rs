use chrono::{DateTime, FixedOffset, NaiveDate};

/// hh.ru publishes timestamps with an offset lacking the colon (`+0300`).
const HH_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

pub fn parse_api_timestamp(s: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    match DateTime::parse_from_str(s, HH_TIMESTAMP_FORMAT) {
        Ok(dt) => Ok(dt),
        Err(_) => Ok(DateTime::parse_from_rfc3339(s)?),
    }
}

/// Calendar date of a published timestamp, in the offset it was published with.
pub fn publication_date(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(parse_api_timestamp(s)?.date_naive())
}
