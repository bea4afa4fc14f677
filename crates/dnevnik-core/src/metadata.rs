//! Derived-metadata heuristics
//!
//! Pure functions computing a display title, a sentiment emoji, and up
//! to three topical tags from entry text. These are deliberately simple
//! keyword heuristics, not NLP: matching is substring containment over
//! lower-cased text, and table order decides the winner. The tables are
//! contracts; tests pin them.

use crate::models::{Draft, EntryMeta};

/// Title shown when the situation text is empty
pub const TITLE_PLACEHOLDER: &str = "Новая запись";

/// Emoji used when no sentiment group matches
pub const DEFAULT_EMOJI: &str = "😌";

/// First lines longer than this are truncated
const TITLE_MAX_CHARS: usize = 50;

/// Kept prefix of a truncated title, before the "..." marker
const TITLE_TRUNCATED_CHARS: usize = 47;

/// Maximum number of derived tags
const MAX_TAGS: usize = 3;

/// Sentiment keyword groups, in priority order: the first group with any
/// keyword present in the text wins.
const EMOJI_GROUPS: &[(&[&str], &str)] = &[
    (&["радост", "счастл", "удач"], "😊"),
    (&["страх", "боюсь", "испуг"], "😨"),
    (&["тревог", "беспоко", "волну"], "😰"),
    (&["грус", "печаль", "плач"], "😢"),
    (&["злость", "раздраж", "бесит"], "😤"),
    (&["устал", "скуч", "апати"], "😔"),
    (&["думаю", "размышл"], "🤔"),
];

/// Keyword stem → tag label, in declaration order. Several stems map to
/// the same tag; duplicates are dropped, first occurrence wins.
const TAG_KEYWORDS: &[(&str, &str)] = &[
    ("работ", "Работа"),
    ("начальник", "Работа"),
    ("коллег", "Работа"),
    ("семь", "Семья"),
    ("родител", "Семья"),
    ("дети", "Семья"),
    ("муж", "Семья"),
    ("жен", "Семья"),
    ("тревог", "Тревога"),
    ("беспоко", "Тревога"),
    ("страх", "Страх"),
    ("боюсь", "Страх"),
    ("грус", "Грусть"),
    ("печаль", "Грусть"),
    ("злость", "Злость"),
    ("раздраж", "Злость"),
    ("радост", "Радость"),
    ("счастл", "Радость"),
    ("успех", "Успех"),
    ("удач", "Успех"),
    ("здоров", "Здоровье"),
    ("болезн", "Здоровье"),
    ("друз", "Друзья"),
    ("личн", "Личное"),
];

/// Derive all display metadata for a draft
pub fn derive(draft: &Draft) -> EntryMeta {
    let combined = draft.combined_text();
    EntryMeta {
        title: derive_title(&draft.situation),
        emoji: derive_emoji(&combined),
        tags: derive_tags(&combined),
    }
}

/// Derive a short title from the situation text
///
/// Empty text gets a fixed placeholder. Otherwise the first line is
/// used verbatim when it is at most 50 characters, else the first 47
/// characters plus an ellipsis marker. Counts are characters, not
/// bytes; the text is usually Cyrillic.
pub fn derive_title(situation: &str) -> String {
    if situation.is_empty() {
        return TITLE_PLACEHOLDER.to_string();
    }

    let first_line = situation.lines().next().unwrap_or("");
    if first_line.chars().count() <= TITLE_MAX_CHARS {
        first_line.to_string()
    } else {
        let kept: String = first_line.chars().take(TITLE_TRUNCATED_CHARS).collect();
        format!("{}...", kept)
    }
}

/// Derive a sentiment emoji from combined entry text
pub fn derive_emoji(text: &str) -> String {
    let lower = text.to_lowercase();

    for (keywords, emoji) in EMOJI_GROUPS {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return (*emoji).to_string();
        }
    }

    DEFAULT_EMOJI.to_string()
}

/// Derive up to three topical tags from combined entry text
///
/// Scans the keyword table in order, appending each matched tag once;
/// collection stops after three distinct tags.
pub fn derive_tags(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut tags: Vec<String> = Vec::new();

    for (keyword, tag) in TAG_KEYWORDS {
        if lower.contains(keyword) && !tags.iter().any(|t| t == tag) {
            tags.push((*tag).to_string());
            if tags.len() == MAX_TAGS {
                break;
            }
        }
    }

    tags
}
