//! Gold entities - the entity kinds the remote service recognizes natively.
//!
//! Every kind in a response payload is either one of the [`GoldKind`]s below
//! or a custom kind defined by the bot owner. Gold occurrences can be
//! projected into the typed records of this module through [`GoldEntity`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DecodeError;

/// Returns true iff `kind` names a built-in entity kind.
///
/// Membership is an exact, case-sensitive match.
pub fn is_gold(kind: &str) -> bool {
    GoldKind::from_str(kind).is_ok()
}

/// Built-in entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoldKind {
    Cardinal,
    Color,
    Datetime,
    Distance,
    Duration,
    Email,
    Emoji,
    Ip,
    Interval,
    Job,
    Language,
    Location,
    Mass,
    Money,
    Nationality,
    Number,
    Ordinal,
    Organization,
    Percent,
    Person,
    Phone,
    Pronoun,
    Set,
    Sort,
    Speed,
    Temperature,
}

impl GoldKind {
    /// All gold kinds, in wire-name order.
    pub const ALL: [GoldKind; 26] = [
        GoldKind::Cardinal,
        GoldKind::Color,
        GoldKind::Datetime,
        GoldKind::Distance,
        GoldKind::Duration,
        GoldKind::Email,
        GoldKind::Emoji,
        GoldKind::Ip,
        GoldKind::Interval,
        GoldKind::Job,
        GoldKind::Language,
        GoldKind::Location,
        GoldKind::Mass,
        GoldKind::Money,
        GoldKind::Nationality,
        GoldKind::Number,
        GoldKind::Ordinal,
        GoldKind::Organization,
        GoldKind::Percent,
        GoldKind::Person,
        GoldKind::Phone,
        GoldKind::Pronoun,
        GoldKind::Set,
        GoldKind::Sort,
        GoldKind::Speed,
        GoldKind::Temperature,
    ];

    /// The identifier used in response payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoldKind::Cardinal => "cardinal",
            GoldKind::Color => "color",
            GoldKind::Datetime => "datetime",
            GoldKind::Distance => "distance",
            GoldKind::Duration => "duration",
            GoldKind::Email => "email",
            GoldKind::Emoji => "emoji",
            GoldKind::Ip => "ip",
            GoldKind::Interval => "interval",
            GoldKind::Job => "job",
            GoldKind::Language => "language",
            GoldKind::Location => "location",
            GoldKind::Mass => "mass",
            GoldKind::Money => "money",
            GoldKind::Nationality => "nationality",
            GoldKind::Number => "number",
            GoldKind::Ordinal => "ordinal",
            GoldKind::Organization => "organization",
            GoldKind::Percent => "percent",
            GoldKind::Person => "person",
            GoldKind::Phone => "phone",
            GoldKind::Pronoun => "pronoun",
            GoldKind::Set => "set",
            GoldKind::Sort => "sort",
            GoldKind::Speed => "speed",
            GoldKind::Temperature => "temperature",
        }
    }
}

impl fmt::Display for GoldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a kind name is not a gold kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotGold(pub String);

impl fmt::Display for NotGold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a built-in entity kind", self.0)
    }
}

impl std::error::Error for NotGold {}

impl FromStr for GoldKind {
    type Err = NotGold;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoldKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| NotGold(s.to_string()))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Typed records
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cardinal {
    pub bearing: f64,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub rgb: String,
    pub hex: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Datetime {
    pub formatted: String,
    pub iso: String,
    pub accuracy: String,
    pub chronology: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Distance {
    pub scalar: f64,
    pub unit: String,
    pub meters: f64,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Duration {
    pub chrono: String,
    pub years: f64,
    pub months: f64,
    pub days: f64,
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    pub local: String,
    pub tag: String,
    pub domain: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Emoji {
    pub formatted: String,
    pub feeling: String,
    pub tags: Vec<String>,
    pub unicode: String,
    pub description: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ip {
    pub formatted: String,
    pub lat: f64,
    pub lng: f64,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interval {
    pub begin: String,
    pub end: String,
    pub begin_accuracy: String,
    pub end_accuracy: String,
    pub begin_chronology: String,
    pub end_chronology: String,
    pub timespan: f64,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub value: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub short: String,
    pub long: String,
    pub raw: String,
    pub confidence: f64,
}

/// A place. The API spells the display name `formated` in older payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(alias = "formated")]
    pub formatted: String,
    pub lat: f64,
    pub lng: f64,
    pub place: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub country: String,
    pub city: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mass {
    pub value: f64,
    pub unit: String,
    pub grams: f64,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
    pub dollars: f64,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nationality {
    pub short: String,
    pub long: String,
    pub country: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Number {
    pub scalar: f64,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ordinal {
    pub rank: i64,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub value: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Percent {
    pub scalar: f64,
    pub unit: String,
    pub percent: f64,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub fullname: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phone {
    pub number: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pronoun {
    pub person: i64,
    pub number: String,
    pub gender: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Set {
    pub next: String,
    pub frequency: String,
    pub interval: String,
    pub rrule: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sort {
    pub order: String,
    pub criterion: String,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Speed {
    pub scalar: f64,
    pub unit: String,
    pub mps: f64,
    pub raw: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Temperature {
    pub scalar: f64,
    pub unit: String,
    pub celsius: f64,
    pub raw: String,
    pub confidence: f64,
}

/// A gold entity occurrence decoded into the record of its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GoldEntity {
    Cardinal(Cardinal),
    Color(Color),
    Datetime(Datetime),
    Distance(Distance),
    Duration(Duration),
    Email(Email),
    Emoji(Emoji),
    Ip(Ip),
    Interval(Interval),
    Job(Job),
    Language(Language),
    Location(Location),
    Mass(Mass),
    Money(Money),
    Nationality(Nationality),
    Number(Number),
    Ordinal(Ordinal),
    Organization(Organization),
    Percent(Percent),
    Person(Person),
    Phone(Phone),
    Pronoun(Pronoun),
    Set(Set),
    Sort(Sort),
    Speed(Speed),
    Temperature(Temperature),
}

impl GoldEntity {
    /// Decodes one occurrence object as the record for `kind`.
    pub fn decode(kind: GoldKind, fields: &Map<String, Value>) -> Result<Self, DecodeError> {
        let value = Value::Object(fields.clone());
        let entity = match kind {
            GoldKind::Cardinal => GoldEntity::Cardinal(serde_json::from_value(value)?),
            GoldKind::Color => GoldEntity::Color(serde_json::from_value(value)?),
            GoldKind::Datetime => GoldEntity::Datetime(serde_json::from_value(value)?),
            GoldKind::Distance => GoldEntity::Distance(serde_json::from_value(value)?),
            GoldKind::Duration => GoldEntity::Duration(serde_json::from_value(value)?),
            GoldKind::Email => GoldEntity::Email(serde_json::from_value(value)?),
            GoldKind::Emoji => GoldEntity::Emoji(serde_json::from_value(value)?),
            GoldKind::Ip => GoldEntity::Ip(serde_json::from_value(value)?),
            GoldKind::Interval => GoldEntity::Interval(serde_json::from_value(value)?),
            GoldKind::Job => GoldEntity::Job(serde_json::from_value(value)?),
            GoldKind::Language => GoldEntity::Language(serde_json::from_value(value)?),
            GoldKind::Location => GoldEntity::Location(serde_json::from_value(value)?),
            GoldKind::Mass => GoldEntity::Mass(serde_json::from_value(value)?),
            GoldKind::Money => GoldEntity::Money(serde_json::from_value(value)?),
            GoldKind::Nationality => GoldEntity::Nationality(serde_json::from_value(value)?),
            GoldKind::Number => GoldEntity::Number(serde_json::from_value(value)?),
            GoldKind::Ordinal => GoldEntity::Ordinal(serde_json::from_value(value)?),
            GoldKind::Organization => GoldEntity::Organization(serde_json::from_value(value)?),
            GoldKind::Percent => GoldEntity::Percent(serde_json::from_value(value)?),
            GoldKind::Person => GoldEntity::Person(serde_json::from_value(value)?),
            GoldKind::Phone => GoldEntity::Phone(serde_json::from_value(value)?),
            GoldKind::Pronoun => GoldEntity::Pronoun(serde_json::from_value(value)?),
            GoldKind::Set => GoldEntity::Set(serde_json::from_value(value)?),
            GoldKind::Sort => GoldEntity::Sort(serde_json::from_value(value)?),
            GoldKind::Speed => GoldEntity::Speed(serde_json::from_value(value)?),
            GoldKind::Temperature => GoldEntity::Temperature(serde_json::from_value(value)?),
        };
        Ok(entity)
    }

    /// The kind this record belongs to.
    pub fn kind(&self) -> GoldKind {
        match self {
            GoldEntity::Cardinal(_) => GoldKind::Cardinal,
            GoldEntity::Color(_) => GoldKind::Color,
            GoldEntity::Datetime(_) => GoldKind::Datetime,
            GoldEntity::Distance(_) => GoldKind::Distance,
            GoldEntity::Duration(_) => GoldKind::Duration,
            GoldEntity::Email(_) => GoldKind::Email,
            GoldEntity::Emoji(_) => GoldKind::Emoji,
            GoldEntity::Ip(_) => GoldKind::Ip,
            GoldEntity::Interval(_) => GoldKind::Interval,
            GoldEntity::Job(_) => GoldKind::Job,
            GoldEntity::Language(_) => GoldKind::Language,
            GoldEntity::Location(_) => GoldKind::Location,
            GoldEntity::Mass(_) => GoldKind::Mass,
            GoldEntity::Money(_) => GoldKind::Money,
            GoldEntity::Nationality(_) => GoldKind::Nationality,
            GoldEntity::Number(_) => GoldKind::Number,
            GoldEntity::Ordinal(_) => GoldKind::Ordinal,
            GoldEntity::Organization(_) => GoldKind::Organization,
            GoldEntity::Percent(_) => GoldKind::Percent,
            GoldEntity::Person(_) => GoldKind::Person,
            GoldEntity::Phone(_) => GoldKind::Phone,
            GoldEntity::Pronoun(_) => GoldKind::Pronoun,
            GoldEntity::Set(_) => GoldKind::Set,
            GoldEntity::Sort(_) => GoldKind::Sort,
            GoldEntity::Speed(_) => GoldKind::Speed,
            GoldEntity::Temperature(_) => GoldKind::Temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn gold_set_has_twenty_six_members() {
        assert_eq!(GoldKind::ALL.len(), 26);
        for kind in GoldKind::ALL {
            assert!(is_gold(kind.as_str()), "{} should be gold", kind);
        }
    }

    #[test]
    fn known_kinds_are_classified() {
        assert!(is_gold("location"));
        assert!(is_gold("temperature"));
        assert!(!is_gold("problem"));
        assert!(!is_gold("action"));
        assert!(!is_gold(""));
    }

    #[test]
    fn membership_is_case_sensitive() {
        assert!(!is_gold("Location"));
        assert!(!is_gold("LOCATION"));
        assert!(!is_gold(" location"));
    }

    #[test]
    fn from_str_round_trips_as_str() {
        for kind in GoldKind::ALL {
            assert_eq!(kind.as_str().parse::<GoldKind>(), Ok(kind));
        }
        assert_eq!(
            "puisage".parse::<GoldKind>(),
            Err(NotGold("puisage".to_string()))
        );
    }

    #[test]
    fn decodes_location_with_legacy_spelling() {
        let fields = json!({
            "formated": "London, London, Greater London, England, United Kingdom",
            "lat": 51.5073509,
            "lng": -0.1277583,
            "raw": "London",
            "confidence": 0.97
        });
        let entity =
            GoldEntity::decode(GoldKind::Location, fields.as_object().unwrap()).unwrap();

        match entity {
            GoldEntity::Location(location) => {
                assert_eq!(location.raw, "London");
                assert_eq!(location.lat, 51.5073509);
                assert!(location.formatted.starts_with("London"));
                assert_eq!(location.confidence, 0.97);
            }
            other => panic!("expected location, got {:?}", other),
        }
    }

    #[test]
    fn decodes_money_with_missing_fields_defaulted() {
        let fields = json!({"amount": 20.0, "currency": "EUR", "raw": "20 euros"});
        let entity = GoldEntity::decode(GoldKind::Money, fields.as_object().unwrap()).unwrap();

        assert_eq!(entity.kind(), GoldKind::Money);
        match entity {
            GoldEntity::Money(money) => {
                assert_eq!(money.currency, "EUR");
                assert_eq!(money.dollars, 0.0);
                assert_eq!(money.confidence, 0.0);
            }
            other => panic!("expected money, got {:?}", other),
        }
    }

    #[test]
    fn wrong_field_type_is_a_decode_error() {
        let fields = json!({"scalar": "not a number"});
        let result = GoldEntity::decode(GoldKind::Number, fields.as_object().unwrap());
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    proptest! {
        #[test]
        fn is_gold_agrees_with_fixed_list(kind in "[a-z_]{1,14}") {
            let listed = GoldKind::ALL.iter().any(|k| k.as_str() == kind);
            prop_assert_eq!(is_gold(&kind), listed);
        }
    }
}
