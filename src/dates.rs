//! Canonical wire format for calendar dates.
//!
//! Order, asset and trade dates cross the API as `DD/MM/YYYY` strings and are stored
//! as SQL `DATE` columns; conversion happens at the serialization boundary.

use chrono::NaiveDate;

pub const WIRE_DATE_FORMAT: &str = "%d/%m/%Y";

pub fn parse_wire_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, WIRE_DATE_FORMAT)
}

pub fn format_wire_date(date: &NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// Serde adapter for required `NaiveDate` fields.
pub mod wire_date {
    use super::{format_wire_date, parse_wire_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_wire_date(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_wire_date(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional `NaiveDate` fields (patch payloads).
pub mod wire_date_opt {
    use super::{format_wire_date, parse_wire_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_some(&format_wire_date(d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => parse_wire_date(&s).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_first_dates() {
        let date = parse_wire_date("06/07/2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 6).unwrap());
    }

    #[test]
    fn round_trips_through_wire_format() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(parse_wire_date(&format_wire_date(&date)).unwrap(), date);
    }

    #[test]
    fn rejects_iso_and_garbage() {
        assert!(parse_wire_date("2025-07-06").is_err());
        assert!(parse_wire_date("31/13/2025").is_err());
        assert!(parse_wire_date("not a date").is_err());
    }
}
