//! HTML fragment rendering for the featured-heroine widget.
//!
//! Deterministic: the same record always renders to identical bytes. All
//! text from the dataset is escaped; only the structural tags built here
//! reach the page.

use crate::record::HeroineRecord;

/// Shown when the selected record has no display name, when the dataset is
/// empty, and nowhere else.
pub const FALLBACK_HTML: &str = "<p>No featured heroine this week.</p>";

/// Shown when the dataset cannot be loaded or parsed.
pub const LOAD_ERROR_HTML: &str =
    "<p class=\"error\">Could not load featured heroine data.</p>";

// Minimal writer with deterministic push order.
struct Html {
    buf: String,
}

impl Html {
    fn new() -> Self {
        Html {
            buf: String::with_capacity(1024),
        }
    }

    fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn push_escaped(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '&' => self.buf.push_str("&amp;"),
                '<' => self.buf.push_str("&lt;"),
                '>' => self.buf.push_str("&gt;"),
                '"' => self.buf.push_str("&quot;"),
                '\'' => self.buf.push_str("&#39;"),
                _ => self.buf.push(c),
            }
        }
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// Render one record as the widget fragment, or the fallback literal when
/// the record has no display name.
pub fn render_featured(record: &HeroineRecord) -> String {
    let Some(name) = record.display_name() else {
        return FALLBACK_HTML.to_owned();
    };

    let mut w = Html::new();

    if let Some(image) = record.image_url() {
        w.push("<div class=\"heroine-image\"><img src=\"");
        w.push_escaped(image);
        w.push("\" alt=\"");
        w.push_escaped(name);
        w.push("\"><p class=\"image-credit\">");
        w.push_escaped(&record.image_credit_line());
        w.push("</p></div>");
    }

    w.push("<div class=\"heroine-info\"><h2>");
    w.push_escaped(name);
    w.push("</h2>");

    let birth = record.birth();
    let death = record.death();
    if birth.is_some() || death.is_some() {
        w.push("<p class=\"dates\">");
        w.push_escaped(birth.unwrap_or("?"));
        w.push(" - ");
        w.push_escaped(death.unwrap_or("present"));
        w.push("</p>");
    }

    if !record.fields.is_empty() {
        w.push("<p class=\"fields\"><strong>Fields:</strong> ");
        w.push_escaped(&record.fields.join(", "));
        w.push("</p>");
    }

    w.push("<p class=\"biography\">");
    w.push_escaped(record.biography_text());
    w.push("</p>");

    if !record.sources.is_empty() {
        w.push("<div class=\"sources\"><h3>Sources</h3><ul>");
        for source in &record.sources {
            w.push("<li><a href=\"");
            w.push_escaped(&source.url);
            w.push("\" target=\"_blank\" rel=\"noopener noreferrer\">");
            w.push_escaped(&source.name);
            w.push("</a> (accessed ");
            w.push_escaped(&source.accessed);
            w.push(")</li>");
        }
        w.push("</ul></div>");
    }

    w.push("</div>");
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{HeroineRecord, Source, NO_BIOGRAPHY};

    fn full_record() -> HeroineRecord {
        HeroineRecord {
            name: Some("Chien-Shiung Wu".to_owned()),
            birth_date: Some("1912-05-31".to_owned()),
            death_date: Some("1997-02-16".to_owned()),
            image: Some("https://example.org/wu.jpg".to_owned()),
            fields: vec!["Physics".to_owned(), "Chemistry".to_owned()],
            biography: Some("Experimental physicist who disproved parity conservation.".to_owned()),
            sources: vec![Source {
                name: "Wikipedia".to_owned(),
                url: "https://en.wikipedia.org/wiki/Chien-Shiung_Wu".to_owned(),
                accessed: "2026-08-01".to_owned(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn rendering_is_idempotent() {
        let record = full_record();
        assert_eq!(render_featured(&record), render_featured(&record));
    }

    #[test]
    fn full_record_renders_every_block() {
        let html = render_featured(&full_record());
        assert!(html.contains("<h2>Chien-Shiung Wu</h2>"));
        assert!(html.contains("<p class=\"dates\">1912-05-31 - 1997-02-16</p>"));
        assert!(html.contains("<p class=\"fields\"><strong>Fields:</strong> Physics, Chemistry</p>"));
        assert!(html.contains("class=\"heroine-image\""));
        assert!(html.contains("target=\"_blank\" rel=\"noopener noreferrer\""));
        assert!(html.contains("(accessed 2026-08-01)"));
    }

    #[test]
    fn nameless_record_renders_fallback() {
        let record = HeroineRecord::default();
        assert_eq!(render_featured(&record), FALLBACK_HTML);
    }

    #[test]
    fn no_image_means_no_image_block() {
        let mut record = full_record();
        record.image = None;
        let html = render_featured(&record);
        assert!(!html.contains("heroine-image"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn image_without_credit_or_sources_reads_unknown() {
        let mut record = full_record();
        record.image_credit = None;
        record.sources.clear();
        let html = render_featured(&record);
        assert!(html.contains("<p class=\"image-credit\">Image source: Unknown</p>"));
    }

    #[test]
    fn partial_dates_use_placeholders() {
        let mut record = full_record();
        record.birth_date = None;
        let html = render_featured(&record);
        assert!(html.contains("<p class=\"dates\">? - 1997-02-16</p>"));

        let mut record = full_record();
        record.death_date = None;
        let html = render_featured(&record);
        assert!(html.contains("<p class=\"dates\">1912-05-31 - present</p>"));
    }

    #[test]
    fn no_dates_means_no_dates_line() {
        let mut record = full_record();
        record.birth_date = None;
        record.death_date = None;
        assert!(!render_featured(&record).contains("class=\"dates\""));
    }

    #[test]
    fn empty_fields_means_no_fields_line() {
        let mut record = full_record();
        record.fields.clear();
        assert!(!render_featured(&record).contains("class=\"fields\""));
    }

    #[test]
    fn missing_biography_uses_fixed_fallback() {
        let mut record = full_record();
        record.biography = None;
        let html = render_featured(&record);
        assert!(html.contains(NO_BIOGRAPHY));
    }

    #[test]
    fn no_sources_means_no_sources_block() {
        let mut record = full_record();
        record.sources.clear();
        assert!(!render_featured(&record).contains("class=\"sources\""));
    }

    #[test]
    fn dataset_text_is_escaped() {
        let mut record = full_record();
        record.name = Some("Ada <script>alert(1)</script> Lovelace".to_owned());
        record.biography = Some("Math & \"analysis\"".to_owned());
        record.sources[0].url = "https://example.org/?a=1&b=2".to_owned();
        let html = render_featured(&record);
        assert!(!html.contains("<script>"));
        assert!(html.contains("Ada &lt;script&gt;alert(1)&lt;/script&gt; Lovelace"));
        assert!(html.contains("Math &amp; &quot;analysis&quot;"));
        assert!(html.contains("href=\"https://example.org/?a=1&amp;b=2\""));
    }
}
