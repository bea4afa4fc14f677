//! Data models for Dnevnik
//!
//! Defines the core data structures: Entry, Draft, and BodyZone.
//! Entries serialize as camelCase JSON so blobs written by earlier
//! versions of the app round-trip unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body regions selectable in the sensations step
///
/// The set is fixed; the serialized form is the Russian display label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BodyZone {
    #[serde(rename = "Голова")]
    Head,
    #[serde(rename = "Грудь")]
    Chest,
    #[serde(rename = "Живот")]
    Stomach,
    #[serde(rename = "Плечи")]
    Shoulders,
    #[serde(rename = "Руки")]
    Arms,
    #[serde(rename = "Ноги")]
    Legs,
    #[serde(rename = "Спина")]
    Back,
    #[serde(rename = "Горло")]
    Throat,
}

impl BodyZone {
    /// All zones, in the order they are offered in the wizard
    pub const ALL: [BodyZone; 8] = [
        BodyZone::Head,
        BodyZone::Chest,
        BodyZone::Stomach,
        BodyZone::Shoulders,
        BodyZone::Arms,
        BodyZone::Legs,
        BodyZone::Back,
        BodyZone::Throat,
    ];

    /// Display label (also the serialized form)
    pub fn label(&self) -> &'static str {
        match self {
            BodyZone::Head => "Голова",
            BodyZone::Chest => "Грудь",
            BodyZone::Stomach => "Живот",
            BodyZone::Shoulders => "Плечи",
            BodyZone::Arms => "Руки",
            BodyZone::Legs => "Ноги",
            BodyZone::Back => "Спина",
            BodyZone::Throat => "Горло",
        }
    }
}

impl std::fmt::Display for BodyZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for BodyZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyZone::ALL
            .into_iter()
            .find(|zone| zone.label() == s)
            .ok_or_else(|| format!("Unknown body zone: {}", s))
    }
}

/// Display metadata derived from entry text at save time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    /// Short display title
    pub title: String,
    /// Sentiment emoji
    pub emoji: String,
    /// Topical tags, at most three
    pub tags: Vec<String>,
}

/// A persisted journal record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique identifier, assigned at creation
    pub id: String,
    /// What happened
    pub situation: String,
    /// Thoughts that came up
    pub thoughts: String,
    /// Bodily sensations, free text
    pub body_feelings: String,
    /// Selected body regions, no duplicates
    pub body_zones: Vec<BodyZone>,
    /// Consequences of the situation
    pub consequences: String,
    /// How life would look without the problem
    pub without_problem: String,
    /// Derived display title
    pub title: String,
    /// Derived sentiment emoji
    pub emoji: String,
    /// Derived topical tags
    pub tags: Vec<String>,
    /// When this entry was created
    pub created_at: DateTime<Utc>,
    /// When this entry was last updated
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Create a new entry from draft content and derived metadata
    pub fn new(id: impl Into<String>, draft: Draft, meta: EntryMeta, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            situation: draft.situation,
            thoughts: draft.thoughts,
            body_feelings: draft.body_feelings,
            body_zones: draft.body_zones,
            consequences: draft.consequences,
            without_problem: draft.without_problem,
            title: meta.title,
            emoji: meta.emoji,
            tags: meta.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields from a draft
    ///
    /// `id` and `created_at` are immutable; `updated_at` is set to the
    /// supplied timestamp.
    pub fn apply_draft(&mut self, draft: Draft, meta: EntryMeta, updated_at: DateTime<Utc>) {
        self.situation = draft.situation;
        self.thoughts = draft.thoughts;
        self.body_feelings = draft.body_feelings;
        self.body_zones = draft.body_zones;
        self.consequences = draft.consequences;
        self.without_problem = draft.without_problem;
        self.title = meta.title;
        self.emoji = meta.emoji;
        self.tags = meta.tags;
        self.updated_at = updated_at;
    }
}

/// An unsaved, in-progress entry held during the wizard flow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub situation: String,
    pub thoughts: String,
    pub body_feelings: String,
    pub body_zones: Vec<BodyZone>,
    pub consequences: String,
    pub without_problem: String,
}

impl Draft {
    /// Copy the content fields of an existing entry (for editing)
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            situation: entry.situation.clone(),
            thoughts: entry.thoughts.clone(),
            body_feelings: entry.body_feelings.clone(),
            body_zones: entry.body_zones.clone(),
            consequences: entry.consequences.clone(),
            without_problem: entry.without_problem.clone(),
        }
    }

    /// Apply a single field update
    ///
    /// Body zones are de-duplicated, preserving first occurrence order.
    pub fn apply(&mut self, field: DraftField) {
        match field {
            DraftField::Situation(value) => self.situation = value,
            DraftField::Thoughts(value) => self.thoughts = value,
            DraftField::BodyFeelings(value) => self.body_feelings = value,
            DraftField::BodyZones(zones) => {
                let mut deduped = Vec::with_capacity(zones.len());
                for zone in zones {
                    if !deduped.contains(&zone) {
                        deduped.push(zone);
                    }
                }
                self.body_zones = deduped;
            }
            DraftField::Consequences(value) => self.consequences = value,
            DraftField::WithoutProblem(value) => self.without_problem = value,
        }
    }

    /// Whether any content has been entered
    pub fn is_empty(&self) -> bool {
        self.situation.is_empty()
            && self.thoughts.is_empty()
            && self.body_feelings.is_empty()
            && self.body_zones.is_empty()
            && self.consequences.is_empty()
            && self.without_problem.is_empty()
    }

    /// The text fed to emoji and tag derivation
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {}",
            self.situation, self.thoughts, self.consequences
        )
    }
}

/// One field update, one variant per draft field
///
/// A closed set instead of a stringly-keyed record update, so a typo in
/// a field name is a compile error.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftField {
    Situation(String),
    Thoughts(String),
    BodyFeelings(String),
    BodyZones(Vec<BodyZone>),
    Consequences(String),
    WithoutProblem(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> Draft {
        Draft {
            situation: "Разговор с начальником".to_string(),
            thoughts: "Я всё испортил".to_string(),
            body_feelings: "Ком в горле".to_string(),
            body_zones: vec![BodyZone::Throat, BodyZone::Chest],
            consequences: "Не мог уснуть".to_string(),
            without_problem: "Спокойно занимался бы делами".to_string(),
        }
    }

    fn sample_meta() -> EntryMeta {
        EntryMeta {
            title: "Разговор с начальником".to_string(),
            emoji: "😰".to_string(),
            tags: vec!["Работа".to_string()],
        }
    }

    #[test]
    fn test_entry_new() {
        let now = Utc::now();
        let entry = Entry::new("1-abc", sample_draft(), sample_meta(), now);
        assert_eq!(entry.id, "1-abc");
        assert_eq!(entry.situation, "Разговор с начальником");
        assert_eq!(entry.body_zones, vec![BodyZone::Throat, BodyZone::Chest]);
        assert_eq!(entry.created_at, now);
        assert_eq!(entry.updated_at, now);
    }

    #[test]
    fn test_apply_draft_keeps_id_and_created_at() {
        let created = Utc::now();
        let mut entry = Entry::new("1-abc", sample_draft(), sample_meta(), created);

        let mut draft = sample_draft();
        draft.situation = "Другая ситуация".to_string();
        let later = created + chrono::Duration::seconds(60);
        entry.apply_draft(draft, sample_meta(), later);

        assert_eq!(entry.id, "1-abc");
        assert_eq!(entry.created_at, created);
        assert_eq!(entry.updated_at, later);
        assert_eq!(entry.situation, "Другая ситуация");
    }

    #[test]
    fn test_draft_apply_fields() {
        let mut draft = Draft::default();
        draft.apply(DraftField::Situation("Опоздал на встречу".to_string()));
        draft.apply(DraftField::Thoughts("Все подумают плохо".to_string()));
        assert_eq!(draft.situation, "Опоздал на встречу");
        assert_eq!(draft.thoughts, "Все подумают плохо");
        assert!(draft.body_feelings.is_empty());
    }

    #[test]
    fn test_draft_apply_body_zones_dedup() {
        let mut draft = Draft::default();
        draft.apply(DraftField::BodyZones(vec![
            BodyZone::Head,
            BodyZone::Chest,
            BodyZone::Head,
        ]));
        assert_eq!(draft.body_zones, vec![BodyZone::Head, BodyZone::Chest]);
    }

    #[test]
    fn test_draft_is_empty() {
        let mut draft = Draft::default();
        assert!(draft.is_empty());
        draft.apply(DraftField::BodyZones(vec![BodyZone::Back]));
        assert!(!draft.is_empty());
    }

    #[test]
    fn test_draft_from_entry_round_trip() {
        let entry = Entry::new("1-abc", sample_draft(), sample_meta(), Utc::now());
        let draft = Draft::from_entry(&entry);
        assert_eq!(draft, sample_draft());
    }

    #[test]
    fn test_combined_text_order() {
        let draft = sample_draft();
        assert_eq!(
            draft.combined_text(),
            "Разговор с начальником Я всё испортил Не мог уснуть"
        );
    }

    #[test]
    fn test_body_zone_labels() {
        assert_eq!(BodyZone::Head.label(), "Голова");
        assert_eq!(BodyZone::Throat.to_string(), "Горло");
        assert_eq!("Спина".parse::<BodyZone>().unwrap(), BodyZone::Back);
        assert!("Хвост".parse::<BodyZone>().is_err());
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = Entry::new("1-abc", sample_draft(), sample_meta(), Utc::now());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"bodyFeelings\""));
        assert!(json.contains("\"bodyZones\""));
        assert!(json.contains("\"withoutProblem\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"Горло\""));
    }

    #[test]
    fn test_entry_serialization_round_trip() {
        let entry = Entry::new("1-abc", sample_draft(), sample_meta(), Utc::now());
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
