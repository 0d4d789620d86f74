use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use dirlist::config::{default_config_path, CliOverrides, ConfigFile, Settings};
use dirlist::export::{export_json, export_text, ListingView, TextOptions, ViewOptions};
use dirlist::listing::build_listing;
use dirlist::logger::{init_logger, LogTarget};
use dirlist::table::{MODIFIED_COLUMN, NAME_COLUMN, SIZE_COLUMN};
use dirlist::tui::{self, App, ColorScheme};

#[derive(Parser, Debug)]
#[command(name = "dirlist")]
#[command(author = "Cassel")]
#[command(version = "0.1.0")]
#[command(about = "Directory listings as sortable, filterable tables", long_about = None)]
struct Args {
    /// Root directory to serve listings from (default: current directory)
    path: Option<PathBuf>,

    /// Directory to list, relative to the root
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Language for labels and links
    #[arg(short, long, env = "DEFAULT_LANG")]
    lang: Option<String>,

    /// Directory holding `<lang>.yml` translation files
    #[arg(long)]
    languages_dir: Option<PathBuf>,

    /// Names to leave out of listings (comma separated or repeated)
    #[arg(short = 'x', long = "ignore", env = "IGNORE_FILES", value_delimiter = ',', action = clap::ArgAction::Append)]
    ignore: Vec<String>,

    /// Header clicks to replay: a column number or name, size, modified (repeatable)
    #[arg(short, long, value_parser = parse_column, action = clap::ArgAction::Append)]
    sort: Vec<usize>,

    /// Only show entries whose name contains this text
    #[arg(short, long)]
    filter: Option<String>,

    /// Output JSON instead of a text table
    #[arg(long)]
    json: bool,

    /// Open the interactive terminal view
    #[arg(long)]
    tui: bool,

    /// strftime format for the last-modified column
    #[arg(long, env = "DIRLIST_TIME_FORMAT")]
    time_format: Option<String>,

    /// Config file (default: ~/.config/dirlist/config.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Use ASCII instead of Unicode
    #[arg(long)]
    ascii: bool,

    /// Color scheme: default, light, mono
    #[arg(long, default_value = "default")]
    color_scheme: String,
}

fn parse_column(value: &str) -> Result<usize, String> {
    match value.to_lowercase().as_str() {
        "name" => Ok(NAME_COLUMN),
        "size" => Ok(SIZE_COLUMN),
        "modified" | "date" | "last-modified" => Ok(MODIFIED_COLUMN),
        other => other
            .parse()
            .map_err(|_| format!("expected a column number or name, size, modified; got '{}'", value)),
    }
}

fn load_config_file(explicit: Option<&PathBuf>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return Ok(ConfigFile::load(path)?);
    }
    match default_config_path() {
        Some(path) if path.exists() => Ok(ConfigFile::load(&path)?),
        _ => Ok(ConfigFile::default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = load_config_file(args.config.as_ref())?;
    let cli = CliOverrides {
        root: args.path.clone(),
        dir: args.dir.clone(),
        lang: args.lang.clone(),
        languages_dir: args.languages_dir.clone(),
        ignore_files: args.ignore.clone(),
        time_format: args.time_format.clone(),
        log_file: args.log_file.clone(),
    };
    let settings = Settings::resolve(cli, file);

    // The terminal view owns the screen, so it only logs to a file.
    let log_target = match (&settings.log_file, args.tui) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::Off,
        (None, false) => LogTarget::Stderr,
    };
    init_logger(&log_target).context("cannot open log file")?;
    debug!(?settings, "resolved settings");
    settings.check_language()?;

    let labels = settings.translations();

    if args.tui {
        return run_tui_mode(settings, labels, &args);
    }

    let listing = build_listing(&settings.listing_options(&labels))?;
    info!(dir = %listing.dir.display(), entries = listing.entries.len(), "listing built");

    let view_options = ViewOptions {
        sort_clicks: args.sort.clone(),
        filter: args.filter.clone(),
        time_format: settings.time_format.clone(),
    };
    let view = ListingView::new(&listing, &view_options);

    let mut stdout = io::stdout().lock();
    if args.json {
        export_json(&view, &mut stdout)?;
        writeln!(stdout)?;
    } else {
        let text_options = TextOptions {
            labels,
            ascii: args.ascii,
            ..TextOptions::default()
        };
        export_text(&view, &text_options, &mut stdout)?;
    }
    stdout.flush()?;

    Ok(())
}

fn run_tui_mode(settings: Settings, labels: dirlist::i18n::Translations, args: &Args) -> Result<()> {
    let dir = settings.dir.clone();
    let mut app = App::new(settings, labels, ColorScheme::from_name(&args.color_scheme));
    app.load(dir);

    for &column in &args.sort {
        app.handle_command(tui::Command::Sort(column));
    }
    if let Some(filter) = &args.filter {
        for c in filter.chars() {
            app.handle_command(tui::Command::FilterInput(c));
        }
    }

    tui::run(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column("name"), Ok(NAME_COLUMN));
        assert_eq!(parse_column("Size"), Ok(SIZE_COLUMN));
        assert_eq!(parse_column("modified"), Ok(MODIFIED_COLUMN));
        assert_eq!(parse_column("0"), Ok(0));
        assert!(parse_column("colour").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "dirlist", "/srv/files", "--sort", "size", "--sort", "size", "--ignore", "a,b", "--json",
        ])
        .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("/srv/files")));
        assert_eq!(args.sort, vec![SIZE_COLUMN, SIZE_COLUMN]);
        assert_eq!(args.ignore, vec!["a", "b"]);
        assert!(args.json);
    }
}
