//! Entry list queries
//!
//! Search and date-bucketed grouping for the list view, plus tag
//! counting. All functions borrow from the caller's list and preserve
//! its order; nothing here touches storage.

use chrono::{Datelike, NaiveDate, TimeZone};

use crate::models::Entry;

/// Russian month names in genitive case, as used after a day number
const RU_MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Entries sharing one date bucket, in list order
#[derive(Debug, PartialEq)]
pub struct EntryGroup<'a> {
    /// Display label: "Сегодня", "Вчера", or "<day> <month>"
    pub label: String,
    pub entries: Vec<&'a Entry>,
}

/// Filter entries by a case-insensitive substring query
///
/// Matches against title, situation, thoughts, and tags. A blank query
/// returns everything.
pub fn search<'a>(entries: &'a [Entry], query: &str) -> Vec<&'a Entry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.iter().collect();
    }

    entries
        .iter()
        .filter(|entry| {
            entry.title.to_lowercase().contains(&query)
                || entry.situation.to_lowercase().contains(&query)
                || entry.thoughts.to_lowercase().contains(&query)
                || entry
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&query))
        })
        .collect()
}

/// Bucket entries by creation day in the given timezone
///
/// Group order follows the order of each label's first entry, so a
/// most-recent-first list yields groups newest-first.
pub fn group_by_day<'a, Tz: TimeZone>(
    entries: &[&'a Entry],
    tz: &Tz,
    today: NaiveDate,
) -> Vec<EntryGroup<'a>> {
    let mut groups: Vec<EntryGroup<'a>> = Vec::new();

    for &entry in entries {
        let date = entry.created_at.with_timezone(tz).date_naive();
        let label = day_label(date, today);

        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.entries.push(entry),
            None => groups.push(EntryGroup {
                label,
                entries: vec![entry],
            }),
        }
    }

    groups
}

/// Display label for a date relative to today
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Сегодня".to_string();
    }
    if Some(date) == today.pred_opt() {
        return "Вчера".to_string();
    }

    format!("{} {}", date.day(), RU_MONTHS[date.month0() as usize])
}

/// Distinct tags with usage counts, ordered by count descending then
/// alphabetically
pub fn tags_with_counts(entries: &[Entry]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for entry in entries {
        for tag in &entry.tags {
            match counts.iter_mut().find(|(name, _)| name == tag) {
                Some((_, count)) => *count += 1,
                None => counts.push((tag.clone(), 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Draft, EntryMeta};
    use chrono::{DateTime, Utc};

    fn entry_at(id: &str, situation: &str, tags: &[&str], created_at: &str) -> Entry {
        let draft = Draft {
            situation: situation.to_string(),
            thoughts: format!("мысли про {}", situation),
            ..Draft::default()
        };
        let meta = EntryMeta {
            title: situation.to_string(),
            emoji: "😌".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        Entry::new(id, draft, meta, created_at.parse::<DateTime<Utc>>().unwrap())
    }

    #[test]
    fn test_search_blank_query_returns_all() {
        let entries = vec![
            entry_at("1", "Работа", &[], "2025-08-05T10:00:00Z"),
            entry_at("2", "Отдых", &[], "2025-08-05T11:00:00Z"),
        ];
        assert_eq!(search(&entries, "").len(), 2);
        assert_eq!(search(&entries, "   ").len(), 2);
    }

    #[test]
    fn test_search_matches_fields_case_insensitive() {
        let entries = vec![
            entry_at("1", "Ссора на работе", &["Работа"], "2025-08-05T10:00:00Z"),
            entry_at("2", "Прогулка в парке", &[], "2025-08-05T11:00:00Z"),
        ];

        // situation
        assert_eq!(search(&entries, "ССОРА").len(), 1);
        // thoughts ("мысли про ...")
        assert_eq!(search(&entries, "мысли").len(), 2);
        // tags
        assert_eq!(search(&entries, "работа").len(), 1);
        // no match
        assert!(search(&entries, "начальник").is_empty());
    }

    #[test]
    fn test_group_by_day_labels() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
        let entries = vec![
            entry_at("1", "Сегодняшняя", &[], "2025-08-06T09:00:00Z"),
            entry_at("2", "Вчерашняя", &[], "2025-08-05T21:00:00Z"),
            entry_at("3", "Старая", &[], "2025-07-31T12:00:00Z"),
        ];
        let refs: Vec<&Entry> = entries.iter().collect();

        let groups = group_by_day(&refs, &Utc, today);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Сегодня", "Вчера", "31 июля"]);
    }

    #[test]
    fn test_group_by_day_keeps_list_order() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
        let entries = vec![
            entry_at("b", "Вторая сегодня", &[], "2025-08-06T12:00:00Z"),
            entry_at("a", "Первая сегодня", &[], "2025-08-06T09:00:00Z"),
            entry_at("old", "Старая", &[], "2025-08-01T09:00:00Z"),
        ];
        let refs: Vec<&Entry> = entries.iter().collect();

        let groups = group_by_day(&refs, &Utc, today);
        assert_eq!(groups.len(), 2);
        let ids: Vec<&str> = groups[0].entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_day_label_month_names() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
        let jan = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        let dec = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(day_label(jan, today), "9 января");
        assert_eq!(day_label(dec, today), "31 декабря");
    }

    #[test]
    fn test_tags_with_counts_ordering() {
        let entries = vec![
            entry_at("1", "a", &["Работа", "Тревога"], "2025-08-05T10:00:00Z"),
            entry_at("2", "b", &["Работа"], "2025-08-05T11:00:00Z"),
            entry_at("3", "c", &["Семья"], "2025-08-05T12:00:00Z"),
        ];

        let counts = tags_with_counts(&entries);
        assert_eq!(
            counts,
            vec![
                ("Работа".to_string(), 2),
                ("Семья".to_string(), 1),
                ("Тревога".to_string(), 1),
            ]
        );
    }
}
