use serde::{Deserialize, Serialize};

/// One entry of the dataset. The data comes in two historical shapes:
/// the merged shape (`name`, `birth_date`, `sources`, ...) and the older
/// Wikipedia-only shape (`title`, `extract`, `full_url`). Every field is
/// optional so one struct covers both; empty strings count as absent,
/// matching how the data was produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HeroineRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_credit: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accomplishments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikidata_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Source {
    pub name: String,
    pub url: String,
    pub accessed: String,
}

pub const NO_BIOGRAPHY: &str = "No biography available.";

/// Biography precedence, first non-empty field wins. Kept as an explicit
/// ordered list so the rule is visible in one place.
const BIOGRAPHY_CHAIN: &[fn(&HeroineRecord) -> Option<&str>] = &[
    |r| r.biography.as_deref(),
    |r| r.extract.as_deref(),
    |r| r.description.as_deref(),
];

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

impl HeroineRecord {
    /// Name to feature, whichever shape the record uses.
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.name.as_deref()).or_else(|| non_empty(self.title.as_deref()))
    }

    pub fn biography_text(&self) -> &str {
        BIOGRAPHY_CHAIN
            .iter()
            .find_map(|get| non_empty(get(self)))
            .unwrap_or(NO_BIOGRAPHY)
    }

    pub fn image_url(&self) -> Option<&str> {
        non_empty(self.image.as_deref())
    }

    pub fn birth(&self) -> Option<&str> {
        non_empty(self.birth_date.as_deref())
    }

    pub fn death(&self) -> Option<&str> {
        non_empty(self.death_date.as_deref())
    }

    /// Attribution line for the image block.
    pub fn image_credit_line(&self) -> String {
        if let Some(credit) = non_empty(self.image_credit.as_deref()) {
            return credit.to_owned();
        }
        let source = self
            .sources
            .first()
            .map(|s| s.name.as_str())
            .unwrap_or("Unknown");
        format!("Image source: {source}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_name_over_title() {
        let record = HeroineRecord {
            name: Some("Lise Meitner".to_owned()),
            title: Some("Lise Meitner (physicist)".to_owned()),
            ..Default::default()
        };
        assert_eq!(record.display_name(), Some("Lise Meitner"));
    }

    #[test]
    fn display_name_falls_back_to_title_and_skips_empty() {
        let record = HeroineRecord {
            name: Some(String::new()),
            title: Some("Mary Anning".to_owned()),
            ..Default::default()
        };
        assert_eq!(record.display_name(), Some("Mary Anning"));

        let nameless = HeroineRecord::default();
        assert_eq!(nameless.display_name(), None);
    }

    #[test]
    fn biography_chain_order() {
        let mut record = HeroineRecord {
            biography: Some("bio".to_owned()),
            extract: Some("extract".to_owned()),
            description: Some("description".to_owned()),
            ..Default::default()
        };
        assert_eq!(record.biography_text(), "bio");

        record.biography = Some(String::new());
        assert_eq!(record.biography_text(), "extract");

        record.extract = None;
        assert_eq!(record.biography_text(), "description");

        record.description = None;
        assert_eq!(record.biography_text(), NO_BIOGRAPHY);
    }

    #[test]
    fn image_credit_fallback_chain() {
        let mut record = HeroineRecord {
            image: Some("https://example.org/a.jpg".to_owned()),
            image_credit: Some("Smithsonian Archives".to_owned()),
            sources: vec![Source {
                name: "Wikipedia".to_owned(),
                url: "https://en.wikipedia.org/wiki/X".to_owned(),
                accessed: "2026-08-01".to_owned(),
            }],
            ..Default::default()
        };
        assert_eq!(record.image_credit_line(), "Smithsonian Archives");

        record.image_credit = None;
        assert_eq!(record.image_credit_line(), "Image source: Wikipedia");

        record.sources.clear();
        assert_eq!(record.image_credit_line(), "Image source: Unknown");
    }

    #[test]
    fn parses_both_dataset_shapes() {
        let merged = r#"{
            "name": "Rosalind Franklin",
            "birth_date": "1920-07-25",
            "death_date": "1958-04-16",
            "fields": ["Chemistry", "X-ray crystallography"],
            "biography": "Chemist whose X-ray work was central to resolving the structure of DNA.",
            "sources": [{"name": "Wikidata", "url": "https://www.wikidata.org/wiki/Q174219", "accessed": "2026-08-01"}]
        }"#;
        let record: HeroineRecord = serde_json::from_str(merged).unwrap();
        assert_eq!(record.display_name(), Some("Rosalind Franklin"));
        assert_eq!(record.fields.len(), 2);

        let legacy = r#"{
            "title": "Cecilia Payne-Gaposchkin",
            "extract": "Astronomer who showed that stars are made mostly of hydrogen and helium.",
            "image": "https://example.org/cecilia.jpg",
            "full_url": "https://en.wikipedia.org/wiki/Cecilia_Payne-Gaposchkin"
        }"#;
        let record: HeroineRecord = serde_json::from_str(legacy).unwrap();
        assert_eq!(record.display_name(), Some("Cecilia Payne-Gaposchkin"));
        assert!(record.biography_text().starts_with("Astronomer"));
    }
}
