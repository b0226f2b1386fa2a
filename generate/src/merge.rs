//! Combines the Wikidata and Wikipedia harvests into one deduplicated
//! dataset. Entries for the same woman are matched by Wikidata id where
//! both sides carry one, otherwise by name similarity backed by birth date.

use heroines_library::{HeroineRecord, Source};

// Name-similarity thresholds. The looser one requires matching birth
// dates; the stricter one stands on its own when a date is missing.
const NAME_MATCH_WITH_DATE: f64 = 0.85;
const NAME_MATCH_ALONE: f64 = 0.92;

// Below this, two biographies are considered genuinely different and are
// kept side by side instead of one replacing the other.
const BIOGRAPHY_OVERLAP: f64 = 0.7;

pub struct DatasetMerger {
    merged: Vec<HeroineRecord>,
    stamp: String,
}

impl DatasetMerger {
    pub fn new(stamp: String) -> Self {
        DatasetMerger {
            merged: Vec::new(),
            stamp,
        }
    }

    pub fn add_all(&mut self, records: Vec<HeroineRecord>) {
        for record in records {
            self.add(record);
        }
    }

    pub fn add(&mut self, record: HeroineRecord) {
        match self.find_match(&record) {
            Some(index) => {
                let stamp = self.stamp.clone();
                merge_into(&mut self.merged[index], record, &stamp);
            }
            None => self.merged.push(normalize(record, &self.stamp)),
        }
    }

    pub fn into_records(self) -> Vec<HeroineRecord> {
        self.merged
    }

    fn find_match(&self, record: &HeroineRecord) -> Option<usize> {
        let name = record.display_name().unwrap_or_default();

        self.merged.iter().position(|existing| {
            if let (Some(a), Some(b)) = (existing.wikidata_id.as_deref(), record.wikidata_id.as_deref()) {
                if a == b {
                    return true;
                }
            }

            let existing_name = existing.display_name().unwrap_or_default();
            let ratio = similarity(name, existing_name);
            if ratio > NAME_MATCH_WITH_DATE {
                match (record.birth(), existing.birth()) {
                    (Some(a), Some(b)) => a == b,
                    _ => ratio > NAME_MATCH_ALONE,
                }
            } else {
                false
            }
        })
    }
}

fn normalize(record: HeroineRecord, stamp: &str) -> HeroineRecord {
    let name = record.display_name().map(|n| n.to_owned());
    let biography = first_present(&record).map(|b| b.to_owned());
    HeroineRecord {
        name,
        title: None,
        biography,
        extract: None,
        description: None,
        last_updated: Some(stamp.to_owned()),
        ..record
    }
}

fn merge_into(existing: &mut HeroineRecord, new: HeroineRecord, stamp: &str) {
    // Prefer the more complete name.
    if let Some(name) = new.display_name() {
        if name.len() > existing.display_name().unwrap_or_default().len() {
            existing.name = Some(name.to_owned());
        }
    }

    if existing.birth().is_none() {
        existing.birth_date = new.birth_date.clone();
    }
    if existing.death().is_none() {
        existing.death_date = new.death_date.clone();
    }

    let new_biography = first_present(&new).map(|b| b.to_owned());
    existing.biography = merge_biography(existing.biography.take(), new_biography);

    merge_string_lists(&mut existing.fields, new.fields);
    merge_string_lists(&mut existing.accomplishments, new.accomplishments);
    merge_sources(&mut existing.sources, new.sources);

    if existing.image.is_none() {
        existing.image = new.image;
        if existing.image.is_some() && existing.image_credit.is_none() {
            let source = existing
                .sources
                .last()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "Unknown".to_owned());
            existing.image_credit = Some(format!("Source: {source}"));
        }
    }

    if existing.wikidata_id.is_none() {
        existing.wikidata_id = new.wikidata_id;
    }

    existing.last_updated = Some(stamp.to_owned());
}

// First non-empty of biography, extract, description — same precedence the
// widget uses, but returning nothing when all are empty.
fn first_present(record: &HeroineRecord) -> Option<&str> {
    [
        record.biography.as_deref(),
        record.extract.as_deref(),
        record.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|s| !s.is_empty())
}

fn merge_biography(existing: Option<String>, new: Option<String>) -> Option<String> {
    match (existing, new) {
        (None, new) => new,
        (existing, None) => existing,
        (Some(existing), Some(new)) => {
            if new.len() as f64 > existing.len() as f64 * 1.5 {
                Some(new)
            } else if existing.len() as f64 > new.len() as f64 * 1.5 {
                Some(existing)
            } else if similarity(&existing, &new) < BIOGRAPHY_OVERLAP {
                Some(format!("{existing}\n\n{new}"))
            } else {
                Some(existing)
            }
        }
    }
}

fn merge_string_lists(existing: &mut Vec<String>, new: Vec<String>) {
    for item in new {
        if !existing.contains(&item) {
            existing.push(item);
        }
    }
}

fn merge_sources(existing: &mut Vec<Source>, new: Vec<Source>) {
    for source in new {
        if !existing.iter().any(|s| s.url == source.url) {
            existing.push(source);
        }
    }
}

/// Dice coefficient over lowercase character bigrams, in `[0, 1]`.
fn similarity(a: &str, b: &str) -> f64 {
    let a = bigrams(a);
    let b = bigrams(b);
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut b_pool = b.clone();
    let mut shared = 0usize;
    for pair in &a {
        if let Some(pos) = b_pool.iter().position(|p| p == pair) {
            b_pool.swap_remove(pos);
            shared += 1;
        }
    }

    (2 * shared) as f64 / (a.len() + b.len()) as f64
}

fn bigrams(s: &str) -> Vec<(char, char)> {
    let chars: Vec<char> = s.to_lowercase().chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}
