use chrono::Utc;
use lambda_http::{
    http::{header::CONTENT_TYPE, Method, StatusCode},
    service_fn, Error, IntoResponse, Request, RequestExt, Response,
};
use once_cell::sync::Lazy;
use serde_json::json;

use heroines_library::{
    heroines_data_path, load_records, record::HeroineRecord, select, widget::render_widget,
};

// Parsed once per process. A broken dataset keeps the error around so every
// request answers 500 instead of panicking at startup.
static RECORDS: Lazy<Result<Vec<HeroineRecord>, heroines_library::DataError>> =
    Lazy::new(|| load_records(&heroines_data_path()));

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::run(service_fn(featured_heroine)).await?;

    Ok(())
}

async fn featured_heroine(request: Request) -> Result<impl IntoResponse, Error> {
    if request.method() != Method::GET {
        return Ok(Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .body("".to_owned())?);
    }

    let records = match &*RECORDS {
        Ok(records) => records,
        Err(err) => {
            log::error!("Error loading data: {err}");
            return Ok(Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body("".to_owned())?);
        }
    };

    let now = Utc::now();
    let params = request.query_string_parameters();

    Ok(match params.first("format") {
        Some("json") => {
            let week = select::week_number(now);
            Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, "application/json")
                .body(
                    json!({
                        "week": week,
                        "heroine": select::featured(records, now),
                    })
                    .to_string(),
                )?
        }
        _ => Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "text/html; charset=utf-8")
            .body(render_widget(records, now))?,
    })
}
