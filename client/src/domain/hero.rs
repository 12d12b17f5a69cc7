//! Superhero records exchanged with the heroes collection resource.
//!
//! [`Superhero`] mirrors what the server returns. [`HeroDraft`] is the only
//! shape the client ever sends: it has no identifier or timestamp fields, so
//! server-assigned values cannot leak into create or update requests.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Domain error returned when a hero identifier cannot address one hero.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeroIdError {
    /// Identifier was empty or whitespace only.
    #[error("hero id must not be blank")]
    Blank,
    /// Identifier was `.` or `..`, which would address the collection or
    /// its parent instead of a member.
    #[error("hero id '{0}' is a relative path segment")]
    DotSegment(String),
}

/// Server-assigned hero identifier.
///
/// ## Invariants
/// - Not blank, and neither `.` nor `..`. Any other text is allowed; the
///   transport sends it as a single percent-encoded path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HeroId(String);

impl HeroId {
    /// Validate an identifier received from the server or typed by a user.
    ///
    /// # Errors
    ///
    /// Returns [`HeroIdError`] when `raw` is blank or a dot segment.
    pub fn new(raw: impl Into<String>) -> Result<Self, HeroIdError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(HeroIdError::Blank);
        }
        if matches!(raw.as_str(), "." | "..") {
            return Err(HeroIdError::DotSegment(raw));
        }
        Ok(Self(raw))
    }

    /// Identifier text, unencoded.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HeroId {
    type Err = HeroIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for HeroId {
    type Error = HeroIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HeroId> for String {
    fn from(id: HeroId) -> Self {
        id.0
    }
}

/// The five pentathlon stats carried by every hero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeroAttributes {
    /// Agility score.
    pub agility: f64,
    /// Strength score.
    pub strength: f64,
    /// Weight score.
    pub weight: f64,
    /// Endurance score.
    pub endurance: f64,
    /// Charisma score.
    pub charisma: f64,
}

/// Hero record as stored by the server.
///
/// Serialised with camelCase field names (`createdAt`, `updatedAt`). The
/// timestamps are kept as the server sent them, and may be absent, so one
/// oddly stamped record never fails a whole listing. Use
/// [`Superhero::created_at_utc`] and [`Superhero::updated_at_utc`] for
/// parsed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Superhero {
    /// Opaque identifier assigned on creation.
    pub id: HeroId,
    /// Display name.
    pub name: String,
    /// Image reference.
    pub picture: String,
    /// Pentathlon stats.
    pub attributes: HeroAttributes,
    /// Creation timestamp, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Timestamp of the last successful update, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Superhero {
    /// Editable part of this hero, suitable for an update request.
    #[must_use]
    pub fn to_draft(&self) -> HeroDraft {
        HeroDraft {
            name: self.name.clone(),
            picture: self.picture.clone(),
            attributes: self.attributes,
        }
    }

    /// Creation time, when present and readable.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Last update time, when present and readable.
    #[must_use]
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }
}

/// RFC 3339 instants, or bare `YYYY-MM-DD` dates read as midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Client-writable hero fields sent on create and update.
///
/// # Examples
/// ```
/// use pentathlon_client::HeroDraft;
/// use pentathlon_client::domain::HeroAttributes;
///
/// let draft = HeroDraft {
///     name: "Storm".to_owned(),
///     picture: "https://img.example/storm.png".to_owned(),
///     attributes: HeroAttributes::default(),
/// };
/// let body = serde_json::to_value(&draft).unwrap();
/// assert!(body.get("id").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroDraft {
    /// Display name.
    pub name: String,
    /// Image reference.
    pub picture: String,
    /// Pentathlon stats.
    pub attributes: HeroAttributes,
}

impl From<Superhero> for HeroDraft {
    fn from(hero: Superhero) -> Self {
        Self {
            name: hero.name,
            picture: hero.picture,
            attributes: hero.attributes,
        }
    }
}

impl From<&Superhero> for HeroDraft {
    fn from(hero: &Superhero) -> Self {
        hero.to_draft()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn server_hero() -> serde_json::Value {
        json!({
            "id": "hero-1",
            "name": "Storm",
            "picture": "https://img.example/storm.png",
            "attributes": {
                "agility": 8,
                "strength": 6,
                "weight": 5.5,
                "endurance": 7,
                "charisma": 9
            },
            "createdAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-02T11:30:00.000Z"
        })
    }

    #[rstest]
    fn decodes_server_payload(server_hero: serde_json::Value) {
        let hero: Superhero = serde_json::from_value(server_hero).expect("hero should decode");
        assert_eq!(hero.id.as_str(), "hero-1");
        assert_eq!(hero.attributes.weight, 5.5);
        assert_eq!(hero.attributes.charisma, 9.0);
        assert!(hero.updated_at_utc() > hero.created_at_utc());
    }

    #[rstest]
    #[case::date_only(json!("2024-03-01"), Some("2024-03-01T00:00:00Z"))]
    #[case::free_text(json!("yesterday"), None)]
    #[case::null(serde_json::Value::Null, None)]
    fn unusual_timestamps_still_decode(
        server_hero: serde_json::Value,
        #[case] created_at: serde_json::Value,
        #[case] parsed: Option<&str>,
    ) {
        let mut payload = server_hero;
        payload["createdAt"] = created_at;
        let hero: Superhero = serde_json::from_value(payload).expect("hero should decode");
        assert_eq!(
            hero.created_at_utc().map(|instant| instant.to_rfc3339_opts(
                chrono::SecondsFormat::Secs,
                true
            )),
            parsed.map(str::to_owned)
        );
    }

    #[rstest]
    fn missing_timestamps_decode_as_absent(server_hero: serde_json::Value) {
        let mut payload = server_hero;
        let object = payload.as_object_mut().expect("fixture is an object");
        object.remove("createdAt");
        object.remove("updatedAt");
        let hero: Superhero = serde_json::from_value(payload).expect("hero should decode");
        assert_eq!(hero.created_at, None);
        assert_eq!(hero.updated_at_utc(), None);
    }

    #[rstest]
    fn drafts_drop_server_assigned_fields(server_hero: serde_json::Value) {
        let hero: Superhero = serde_json::from_value(server_hero).expect("hero should decode");
        let body = serde_json::to_value(HeroDraft::from(&hero)).expect("draft should encode");
        let object = body.as_object().expect("draft encodes as an object");

        for forbidden in ["id", "createdAt", "updatedAt", "created_at", "updated_at"] {
            assert!(!object.contains_key(forbidden), "{forbidden} must not be sent");
        }
        assert_eq!(object.get("name"), Some(&json!("Storm")));
        assert_eq!(object.len(), 3);
    }

    #[rstest]
    fn owned_and_borrowed_conversions_agree(server_hero: serde_json::Value) {
        let hero: Superhero = serde_json::from_value(server_hero).expect("hero should decode");
        assert_eq!(HeroDraft::from(&hero), HeroDraft::from(hero.clone()));
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("  ")]
    fn blank_ids_are_rejected(#[case] raw: &str) {
        assert_eq!(HeroId::new(raw), Err(HeroIdError::Blank));
    }

    #[rstest]
    #[case::current(".")]
    #[case::parent("..")]
    fn dot_segment_ids_are_rejected(#[case] raw: &str) {
        assert_eq!(
            HeroId::new(raw),
            Err(HeroIdError::DotSegment(raw.to_owned()))
        );
    }

    #[rstest]
    #[case::traversal("../../api-keys/")]
    #[case::query("x?y=1")]
    #[case::plain("hero-1")]
    fn other_ids_are_kept_verbatim(#[case] raw: &str) {
        let id: HeroId = raw.parse().expect("id is accepted");
        assert_eq!(id.as_str(), raw);
    }

    #[rstest]
    fn blank_ids_fail_deserialisation(server_hero: serde_json::Value) {
        let mut payload = server_hero;
        payload["id"] = json!("");
        assert!(serde_json::from_value::<Superhero>(payload).is_err());
    }
}
