use anyhow::Result;
use chrono::{Datelike, Local};
use std::{collections::HashMap, fs::File, io::BufWriter, iter::FromFn, ops::Range, time::Instant};

use heroines_library::{heroines_data_path, HeroineRecord, Source};

mod merge;

use merge::DatasetMerger;

const WIKIDATA_API: &str = "https://www.wikidata.org/w/api.php";
const WIKIPEDIA_API: &str = "https://en.wikipedia.org/w/api.php";

const WIKIPEDIA_CATEGORIES: &[&str] = &[
    "Women scientists",
    "Women physicians",
    "Women mathematicians",
    "Women activists",
];

const PAGES_PER_CATEGORY: usize = 50;

// Pages inside the categories that describe no single person.
const SKIPPED_TITLE_PREFIXES: &[&str] =
    &["Category:", "List of", "Index of", "Timeline of", "Women in"];

#[tokio::main]
async fn main() -> Result<()> {
    println!("Fetching data...");

    let start = Instant::now();
    let mut harvested = Vec::new();
    // earliest curated heroine is Laura Bassi, born in 1711
    for years in count_down_birth_year_ranges(20, 1711) {
        let chunk = collect_wikidata_heroines(&years).await?;
        println!(
            "Fetched {count} heroines for birth years {years:?}",
            count = chunk.len()
        );
        harvested.extend(chunk);
    }
    println!("Received total {} heroines from Wikidata.", harvested.len());

    let wikipedia = collect_wikipedia_heroines(WIKIPEDIA_CATEGORIES).await?;
    println!("Received total {} heroines from Wikipedia.", wikipedia.len());

    let duration = start.elapsed();
    println!("Done fetching. Took: {duration:?}");

    let raw_total = harvested.len() + wikipedia.len();
    let mut merger = DatasetMerger::new(today());
    merger.add_all(harvested);
    merger.add_all(wikipedia);
    let merged = merger.into_records();
    println!(
        "Merged {raw_total} raw entries into {} unique heroines.",
        merged.len()
    );

    let target_file_path = heroines_data_path();
    println!("Writing to {target_file_path:?}...");
    let writer = BufWriter::new(File::create(&target_file_path)?);
    serde_json::to_writer_pretty(writer, &merged)?;

    Ok(())
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn count_down_birth_year_ranges(
    chunk_size: i32,
    last_year_to_be_included: i32,
) -> FromFn<impl FnMut() -> Option<Range<i32>>> {
    let mut year = Local::now().year() + 1;
    std::iter::from_fn(move || {
        year -= chunk_size;

        if year + chunk_size > last_year_to_be_included {
            Some(year..year + chunk_size)
        } else {
            None
        }
    })
}

async fn collect_wikidata_heroines(years: &Range<i32>) -> Result<Vec<HeroineRecord>> {
    let api = mediawiki::api::Api::new(WIKIDATA_API).await?; // Will determine the SPARQL API URL via site info data
    let query = format!(
        "SELECT
  DISTINCT ?person
  ?personLabel
  ?birthDate
  ?deathDate
  ?occupationLabel
  ?description
  ?image
WHERE
{{
  ?person wdt:P31 wd:Q5;
    wdt:P21 wd:Q6581072;
    wdt:P106 ?occupation;
    wdt:P569 ?born .
  VALUES ?occupation {{
    wd:Q901 wd:Q11063 wd:Q593644 wd:Q169470 wd:Q82955
    wd:Q1650915 wd:Q864503 wd:Q1622272 wd:Q205375
  }}
  OPTIONAL {{ ?person wdt:P569 ?birthDate . }}
  OPTIONAL {{ ?person wdt:P570 ?deathDate . }}
  OPTIONAL {{ ?person wdt:P18 ?image . }}
  OPTIONAL {{ ?person schema:description ?description . FILTER(LANG(?description) = \"en\") }}
  FILTER (?born >= \"{start_year}-01-01\"^^xsd:dateTime && ?born < \"{end_year}-01-01\"^^xsd:dateTime)
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language \"en\" . }}
}}
",
    start_year=years.start, end_year=years.end);

    let accessed = today();

    Ok(api
        .sparql_query(&query)
        .await?
        .as_object()
        .and_then(|root| {
            Some(
                root.get("results")?
                    .get("bindings")?
                    .as_array()?
                    .iter()
                    .flat_map(|binding| {
                        let maybe_get_string =
                            |key| Some(binding.get(key)?.get("value")?.as_str()?.to_owned());

                        let wikidata_id: Option<String> = maybe_get_string("person")
                            .as_deref()
                            .and_then(|uri| uri.strip_prefix("http://www.wikidata.org/entity/"))
                            .map(|id| id.to_owned());

                        Some(HeroineRecord {
                            id: wikidata_id.clone(),
                            name: Some(maybe_get_string("personLabel")?),
                            birth_date: maybe_get_string("birthDate").map(date_only),
                            death_date: maybe_get_string("deathDate").map(date_only),
                            description: maybe_get_string("description"),
                            fields: maybe_get_string("occupationLabel")
                                .into_iter()
                                .collect(),
                            image: maybe_get_string("image"),
                            sources: wikidata_id
                                .as_deref()
                                .map(|id| {
                                    vec![Source {
                                        name: "Wikidata".to_owned(),
                                        url: format!("https://www.wikidata.org/wiki/{id}"),
                                        accessed: accessed.clone(),
                                    }]
                                })
                                .unwrap_or_default(),
                            wikidata_id,
                            last_updated: Some(accessed.clone()),
                            ..Default::default()
                        })
                    })
                    .collect(),
            )
        })
        .unwrap_or_default())
}

// Wikidata dates come as full timestamps; the dataset keeps YYYY-MM-DD.
fn date_only(value: String) -> String {
    match value.split_once('T') {
        Some((date, _)) => date.to_owned(),
        None => value,
    }
}

async fn collect_wikipedia_heroines(categories: &[&str]) -> Result<Vec<HeroineRecord>> {
    let api = mediawiki::api::Api::new(WIKIPEDIA_API).await?;
    let mut heroines = Vec::new();

    for category in categories {
        println!("Processing category: {category}");
        let titles = collect_category_members(&api, category).await?;

        for title in titles.iter().take(PAGES_PER_CATEGORY) {
            if SKIPPED_TITLE_PREFIXES
                .iter()
                .any(|prefix| title.starts_with(prefix))
            {
                continue;
            }

            match collect_wikipedia_page(&api, title).await? {
                Some(record) => heroines.push(record),
                None => println!("Warning: Page '{title}' not found."),
            }

            // Respectful delay.
            tokio::time::sleep(std::time::Duration::from_secs(2)).await;
        }
    }

    Ok(heroines)
}

async fn collect_category_members(
    api: &mediawiki::api::Api,
    category: &str,
) -> Result<Vec<String>> {
    let params: HashMap<String, String> = [
        ("action", "query"),
        ("format", "json"),
        ("list", "categorymembers"),
        ("cmlimit", "500"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .chain(std::iter::once((
        "cmtitle".to_owned(),
        format!("Category:{category}"),
    )))
    .collect();

    let res = api.get_query_api_json(&params).await?;

    Ok(res
        .as_object()
        .and_then(|root| {
            Some(
                root.get("query")?
                    .get("categorymembers")?
                    .as_array()?
                    .iter()
                    .flat_map(|member| Some(member.get("title")?.as_str()?.to_owned()))
                    .collect(),
            )
        })
        .unwrap_or_default())
}

async fn collect_wikipedia_page(
    api: &mediawiki::api::Api,
    title: &str,
) -> Result<Option<HeroineRecord>> {
    let params: HashMap<String, String> = [
        ("action", "query"),
        ("format", "json"),
        ("prop", "extracts|pageimages|info|pageprops"),
        ("exintro", "true"),
        ("explaintext", "true"),
        ("pithumbsize", "300"),
        ("inprop", "url"),
        ("ppprop", "wikibase_item"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .chain(std::iter::once(("titles".to_owned(), title.to_owned())))
    .collect();

    let res = api.get_query_api_json(&params).await?;
    let accessed = today();

    Ok(res
        .get("query")
        .and_then(|query| query.get("pages"))
        .and_then(|pages| pages.as_object())
        .and_then(|pages| pages.values().next())
        .filter(|page| page.get("missing").is_none())
        .map(|page| {
            let get_string = |value: Option<&serde_json::Value>| {
                value.and_then(|v| v.as_str()).map(|s| s.to_owned())
            };

            let full_url = get_string(page.get("fullurl"));
            HeroineRecord {
                name: get_string(page.get("title")),
                biography: get_string(page.get("extract")),
                image: get_string(page.get("thumbnail").and_then(|t| t.get("source"))),
                sources: full_url
                    .map(|url| {
                        vec![Source {
                            name: "Wikipedia".to_owned(),
                            url,
                            accessed: accessed.clone(),
                        }]
                    })
                    .unwrap_or_default(),
                wikidata_id: get_string(
                    page.get("pageprops").and_then(|p| p.get("wikibase_item")),
                ),
                last_updated: Some(accessed.clone()),
                ..Default::default()
            }
        }))
}
