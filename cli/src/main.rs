use anyhow::{bail, Result};
use chrono::Utc;
use std::env;
use std::path::PathBuf;

use heroines_library::prefs::{FileStore, Font, Preferences, Theme};
use heroines_library::widget::render_widget;
use heroines_library::{heroines_data_path, load_records, preferences_path, select, HeroineRecord};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(|s| s.as_str()) {
        Some("toggle") => toggle_preference(args.get(1).map(|s| s.as_str())),
        Some("--html") => {
            let records = load(args.get(1))?;
            println!("{}", render_widget(&records, Utc::now()));
            Ok(())
        }
        path => {
            let records = load(path)?;
            print_featured(&records);
            Ok(())
        }
    }
}

fn load<S: AsRef<str>>(path: Option<S>) -> Result<Vec<HeroineRecord>> {
    let path = path
        .map(|p| PathBuf::from(p.as_ref()))
        .unwrap_or_else(heroines_data_path);
    Ok(load_records(&path)?)
}

fn print_featured(records: &[HeroineRecord]) {
    let now = Utc::now();
    println!("Epoch week {}", select::week_number(now));

    let Some(record) = select::featured(records, now).filter(|r| r.display_name().is_some())
    else {
        println!("No featured heroine this week.");
        return;
    };

    println!("Featured heroine: {}", record.display_name().unwrap_or("?"));
    if record.birth().is_some() || record.death().is_some() {
        println!(
            "  {} - {}",
            record.birth().unwrap_or("?"),
            record.death().unwrap_or("present")
        );
    }
    if !record.fields.is_empty() {
        println!("  Fields: {}", record.fields.join(", "));
    }
    println!("\n{}", record.biography_text());
    if !record.sources.is_empty() {
        println!("\nSources:");
        for source in &record.sources {
            println!("  - {}: {} (accessed {})", source.name, source.url, source.accessed);
        }
    }
}

fn toggle_preference(which: Option<&str>) -> Result<()> {
    let mut prefs = Preferences::load(FileStore::open(preferences_path()));

    match which {
        Some("theme") => {
            let theme = prefs.toggle_theme();
            println!(
                "Theme is now {}.",
                match theme {
                    Theme::Dark => "dark",
                    Theme::Light => "light",
                }
            );
        }
        Some("font") => {
            let font = prefs.toggle_font();
            println!(
                "Font is now {}.",
                match font {
                    Font::Dyslexic => "dyslexia-friendly",
                    Font::Default => "the default",
                }
            );
        }
        _ => bail!("usage: heroines toggle <theme|font>"),
    }

    let classes = prefs.class_list();
    if classes.is_empty() {
        println!("Body classes: (none)");
    } else {
        println!("Body classes: {}", classes.join(" "));
    }

    Ok(())
}
