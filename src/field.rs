//! Presence-aware optional values.
//!
//! The collection format tells apart a key that is missing, a key that is
//! explicitly `null`, and a key that carries a value. `Field<T>` keeps that
//! distinction through a decode/encode cycle so that re-exported files contain
//! exactly the keys the source had. Every optional field is declared as
//!
//! ```ignore
//! #[serde(default, skip_serializing_if = "Field::is_absent")]
//! pub hash: Field<String>,
//! ```
//!
//! so a missing key decodes as `Absent` and is never written back, while a
//! `null` decodes as `Null` and is written back as `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Absent,
    Null,
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    /// Borrow the value, treating `Absent` and `Null` alike.
    pub fn get(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent | Field::Null => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent | Field::Null => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent | Field::Null => None,
        }
    }

    /// `None` maps to `Absent`: a value that was never set is not emitted.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Present(value),
            None => Field::Absent,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Present(value) => Field::Present(f(value)),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Present(value)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(value) => serializer.serialize_some(value),
            Field::Absent | Field::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // a missing key never reaches this point, `#[serde(default)]` yields Absent
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Present(value),
            None => Field::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        hash: Field<String>,
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        port: Field<String>,
    }

    #[test]
    fn test_missing_null_and_present_are_distinct() {
        let sample: Sample = serde_json::from_value(json!({
            "name": "n",
            "hash": null,
        }))
        .unwrap();

        assert_eq!(sample.hash, Field::Null);
        assert_eq!(sample.port, Field::Absent);

        let encoded = serde_json::to_value(&sample).unwrap();
        assert_eq!(encoded, json!({ "name": "n", "hash": null }));
    }

    #[test]
    fn test_present_value_survives_even_if_it_looks_like_a_default() {
        // an empty string set on purpose is still emitted
        let sample = Sample {
            name: "n".to_string(),
            hash: Field::Present(String::new()),
            port: Field::Absent,
        };

        let encoded = serde_json::to_value(&sample).unwrap();
        assert_eq!(encoded, json!({ "name": "n", "hash": "" }));
    }

    #[test]
    fn test_option_conversion() {
        let absent: Field<u16> = Field::from_option(None);
        let present = Field::from_option(Some(8080u16));

        assert!(absent.is_absent());
        assert_eq!(present.get(), Some(&8080));
        assert_eq!(present.map(|port| port + 1).into_option(), Some(8081));
    }
}
