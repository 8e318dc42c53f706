//! Deserialisation helpers for backend payloads.

use serde::Deserialize;

/// Accepts either a JSON string or number and yields a `String`. The backend
/// emits integer primary keys while locally created records use string ids.
pub fn string_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> serde::de::Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

/// Primary or foreign key as the backend may send it.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(value) => value,
            RawId::Signed(value) => value.to_string(),
            RawId::Unsigned(value) => value.to_string(),
        }
    }
}

/// Nullable key: `null`, a number or a string.
pub fn option_string_from_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// List of keys, e.g. a many-to-many relation.
pub fn vec_string_from_json<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Vec::<RawId>::deserialize(deserializer)?
        .into_iter()
        .map(String::from)
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Decimal fields arrive as strings (`"19.00"`); float fields as numbers.
pub fn f64_from_json<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    RawAmount::deserialize(deserializer)?.parse()
}

pub fn option_f64_from_json<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<RawAmount>::deserialize(deserializer)?
        .map(RawAmount::parse)
        .transpose()
}

impl RawAmount {
    fn parse<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid decimal: {value:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::string_from_json")]
        id: String,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let numeric: Row = serde_json::from_str(r#"{"id": 17}"#).expect("numeric id");
        let text: Row = serde_json::from_str(r#"{"id": "SHP-3"}"#).expect("string id");
        assert_eq!(numeric.id, "17");
        assert_eq!(text.id, "SHP-3");
        assert!(serde_json::from_str::<Row>(r#"{"id": null}"#).is_err());
    }

    #[derive(Deserialize)]
    struct Amounts {
        #[serde(deserialize_with = "super::f64_from_json")]
        price: f64,
        #[serde(default, deserialize_with = "super::option_string_from_json")]
        route: Option<String>,
        #[serde(default, deserialize_with = "super::vec_string_from_json")]
        shipments: Vec<String>,
        #[serde(default, deserialize_with = "super::option_f64_from_json")]
        paid: Option<f64>,
    }

    #[test]
    fn decimals_and_nullable_keys() {
        let row: Amounts =
            serde_json::from_str(r#"{"price": "27.50", "route": 4, "shipments": [1, "2"]}"#)
                .expect("drf row");
        assert_eq!(row.price, 27.5);
        assert_eq!(row.route.as_deref(), Some("4"));
        assert_eq!(row.shipments, vec!["1", "2"]);
        assert!(row.paid.is_none());

        let bare: Amounts =
            serde_json::from_str(r#"{"price": 12, "route": null, "paid": "0.00"}"#)
                .expect("bare row");
        assert_eq!(bare.price, 12.0);
        assert!(bare.route.is_none());
        assert!(bare.shipments.is_empty());
        assert_eq!(bare.paid, Some(0.0));

        assert!(serde_json::from_str::<Amounts>(r#"{"price": "n/a"}"#).is_err());
    }
}
