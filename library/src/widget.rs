//! Entry point wiring the load → select → render pipeline to a page
//! container. The container is injected as a capability so the pipeline
//! runs the same against a real page and against an in-memory buffer.

use chrono::{DateTime, Utc};
use log::error;

use crate::error::DataError;
use crate::record::HeroineRecord;
use crate::render::{self, FALLBACK_HTML, LOAD_ERROR_HTML};
use crate::select;

/// Destination for the rendered fragment.
pub trait ContentRenderer {
    fn set_content(&mut self, html: &str);
}

/// In-memory container, used by tests and by the CLI's `--html` output.
#[derive(Debug, Default)]
pub struct BufferRenderer {
    pub html: Option<String>,
}

impl ContentRenderer for BufferRenderer {
    fn set_content(&mut self, html: &str) {
        self.html = Some(html.to_owned());
    }
}

/// Pure pipeline: pick this week's record and render it. An empty dataset
/// takes the fallback path instead of dividing by zero.
pub fn render_widget(records: &[HeroineRecord], now: DateTime<Utc>) -> String {
    match select::featured(records, now) {
        Some(record) => render::render_featured(record),
        None => FALLBACK_HTML.to_owned(),
    }
}

/// Run the widget once: load the dataset through `source`, sample the clock
/// once, and write the outcome into `container`. Load failures are logged
/// and surface as an explicit error state; nothing panics.
pub fn init_widget<R, F>(source: F, container: &mut R, now: DateTime<Utc>)
where
    R: ContentRenderer,
    F: FnOnce() -> Result<Vec<HeroineRecord>, DataError>,
{
    match source() {
        Ok(records) => container.set_content(&render_widget(&records, now)),
        Err(err) => {
            error!("Error loading data: {err}");
            container.set_content(LOAD_ERROR_HTML);
        }
    }
}
