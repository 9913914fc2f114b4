//! Serde helpers for calendar dates, formatted `[year]-[month]-[day]`.
//!
//! `time` ships `time::serde::rfc3339` for timestamps but nothing for plain
//! dates, so the certificate payload uses this module via `#[serde(with)]`.

use serde::{de, Deserialize, Deserializer, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = date.format(ISO_DATE).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Date::parse(&raw, ISO_DATE).map_err(de::Error::custom)
}

/// `Option<Date>` variant, for `#[serde(with = "serde_date::option")]`.
pub mod option {
    use super::ISO_DATE;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => {
                let formatted = date.format(ISO_DATE).map_err(serde::ser::Error::custom)?;
                serializer.serialize_some(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| Date::parse(&s, ISO_DATE).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use time::macros::date;
    use time::Date;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Carrier {
        #[serde(with = "crate::serde_date")]
        dato: Date,
        #[serde(default, with = "crate::serde_date::option")]
        valgfri: Option<Date>,
    }

    #[test]
    fn serializes_as_iso_string() {
        let carrier = Carrier {
            dato: date!(2026 - 02 - 10),
            valgfri: None,
        };
        let json = serde_json::to_value(&carrier).unwrap();
        assert_eq!(json["dato"], "2026-02-10");
        assert_eq!(json["valgfri"], serde_json::Value::Null);
    }

    #[test]
    fn parses_iso_string() {
        let carrier: Carrier =
            serde_json::from_str(r#"{"dato":"2024-02-29","valgfri":"2020-01-01"}"#).unwrap();
        assert_eq!(carrier.dato, date!(2024 - 02 - 29));
        assert_eq!(carrier.valgfri, Some(date!(2020 - 01 - 01)));
    }

    #[test]
    fn rejects_garbage() {
        let parsed: Result<Carrier, _> = serde_json::from_str(r#"{"dato":"10.02.2026"}"#);
        assert!(parsed.is_err());
    }
}
