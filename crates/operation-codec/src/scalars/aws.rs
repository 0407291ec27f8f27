use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use wire::WireValue;

use super::ScalarCodec;
use crate::error::ScalarError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `AWSDate`: an extended ISO 8601 date, `YYYY-MM-DD`, optionally followed by `Z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateScalar;

impl ScalarCodec for DateScalar {
    type Value = NaiveDate;

    fn decode(&self, value: &WireValue) -> Result<NaiveDate, ScalarError> {
        let text = value.as_str().ok_or_else(|| ScalarError::unexpected("a date string", value))?;
        let text = text.strip_suffix('Z').unwrap_or(text);
        NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map_err(|err| ScalarError::new(format!("invalid date '{text}': {err}")))
    }

    fn encode(&self, value: &NaiveDate) -> WireValue {
        WireValue::String(value.format(DATE_FORMAT).to_string())
    }
}

/// `AWSDateTime`: an RFC 3339 date time with offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeScalar;

impl ScalarCodec for DateTimeScalar {
    type Value = DateTime<FixedOffset>;

    fn decode(&self, value: &WireValue) -> Result<DateTime<FixedOffset>, ScalarError> {
        let text = value
            .as_str()
            .ok_or_else(|| ScalarError::unexpected("a date time string", value))?;
        DateTime::parse_from_rfc3339(text).map_err(|err| ScalarError::new(format!("invalid date time '{text}': {err}")))
    }

    fn encode(&self, value: &DateTime<FixedOffset>) -> WireValue {
        WireValue::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// `AWSTimestamp`: seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampScalar;

impl ScalarCodec for TimestampScalar {
    type Value = i64;

    fn decode(&self, value: &WireValue) -> Result<i64, ScalarError> {
        value
            .as_i64()
            .ok_or_else(|| ScalarError::unexpected("an integer timestamp", value))
    }

    fn encode(&self, value: &i64) -> WireValue {
        WireValue::from(*value)
    }
}

/// `AWSJSON`: a JSON document sent as a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonScalar;

impl ScalarCodec for JsonScalar {
    type Value = WireValue;

    fn decode(&self, value: &WireValue) -> Result<WireValue, ScalarError> {
        let text = value.as_str().ok_or_else(|| ScalarError::unexpected("a JSON string", value))?;
        serde_json::from_str(text).map_err(|err| ScalarError::new(format!("invalid JSON: {err}")))
    }

    fn encode(&self, value: &WireValue) -> WireValue {
        WireValue::String(value.to_string())
    }
}
