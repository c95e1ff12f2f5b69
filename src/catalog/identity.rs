use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Versioned key for a catalog manifest (e.g., `resources_v1`).
///
/// Stored alongside feed entries so consumers can resolve item ids against the
/// correct catalog snapshot.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Stable identifier for an individual catalog item.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

/// Category id declared in a manifest's scope (e.g., `guides`).
///
/// Categories are open per catalog rather than a fixed enum; each manifest
/// declares its own set with display labels, and the index rejects items that
/// reference undeclared ids.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

/// Whether an item is live or staged ahead of its payload.
///
/// Known variants keep serialization consistent; `Other` preserves forward
/// compatibility with manifests that introduce new availability states.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Availability {
    Live,
    ComingSoon,
    Other(String),
}

impl Availability {
    pub fn as_str(&self) -> &str {
        match self {
            Availability::Live => "live",
            Availability::ComingSoon => "coming_soon",
            Availability::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "live" => Availability::Live,
            "coming_soon" => Availability::ComingSoon,
            other => Availability::Other(other.to_string()),
        }
    }

    /// True only for `coming_soon`; unknown states count as actionable so new
    /// manifests degrade to showing items rather than hiding them.
    pub fn is_coming_soon(&self) -> bool {
        matches!(self, Availability::ComingSoon)
    }
}

impl Default for Availability {
    fn default() -> Self {
        Availability::Live
    }
}

impl Serialize for Availability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_round_trips_known_and_unknown() {
        let known = Availability::ComingSoon;
        let json = serde_json::to_string(&known).unwrap();
        assert_eq!(json.trim_matches('"'), "coming_soon");
        let back: Availability = serde_json::from_str(&json).unwrap();
        assert_eq!(back, known);

        let custom_json = "\"archived\"";
        let parsed: Availability = serde_json::from_str(custom_json).unwrap();
        assert_eq!(parsed, Availability::Other("archived".to_string()));
        let serialized = serde_json::to_string(&parsed).unwrap();
        assert_eq!(serialized, custom_json);
    }

    #[test]
    fn only_coming_soon_suppresses_actions() {
        assert!(Availability::ComingSoon.is_coming_soon());
        assert!(!Availability::Live.is_coming_soon());
        assert!(!Availability::Other("archived".to_string()).is_coming_soon());
        assert!(!Availability::default().is_coming_soon());
    }

    #[test]
    fn catalog_key_and_ids_round_trip() {
        let key = CatalogKey("resources_v1".to_string());
        let serialized = serde_json::to_string(&key).unwrap();
        assert_eq!(serialized, "\"resources_v1\"");
        let parsed: CatalogKey = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, key);

        let id = ItemId("cv-template".to_string());
        let serialized_id = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized_id, "\"cv-template\"");
        let parsed_id: ItemId = serde_json::from_str(&serialized_id).unwrap();
        assert_eq!(parsed_id, id);

        let category = CategoryId("templates".to_string());
        let serialized_category = serde_json::to_string(&category).unwrap();
        assert_eq!(serialized_category, "\"templates\"");
        let parsed_category: CategoryId = serde_json::from_str(&serialized_category).unwrap();
        assert_eq!(parsed_category, category);
    }
}
