use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use reel::app::{App, AppEvent};
use reel::config::Config;
use reel::feed::{compute, CategoryFilter, FilterState, MediaTypeFilter, Post, PostSet, SortKey};
use reel::ui;
use reel::util::{format_count, strip_control_chars, truncate_to_width};

/// Get the config directory path (~/.config/reel/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("reel"))
}

#[derive(Parser, Debug)]
#[command(name = "reel", about = "Terminal social feed with search, filters and video playback")]
struct Args {
    /// Post file (JSON) to load instead of the built-in sample feed
    #[arg(long, value_name = "FILE")]
    posts: Option<PathBuf>,

    /// Config file (defaults to ~/.config/reel/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the filtered feed and exit instead of starting the TUI
    #[arg(long)]
    list: bool,

    /// Search text for --list
    #[arg(long, default_value = "")]
    search: String,

    /// Category for --list (all, news, art, sports, food, travel, tech, lifestyle)
    #[arg(long, default_value = "all")]
    category: CategoryFilter,

    /// Media type for --list (all, image, video)
    #[arg(long, default_value = "all")]
    media: MediaTypeFilter,

    /// Sort order for --list (date, views, name)
    #[arg(long, default_value = "date")]
    sort: SortKey,

    /// Print --list output as JSON
    #[arg(long)]
    json: bool,
}

/// Print the filtered feed to stdout.
fn print_feed(posts: &PostSet, filter: &FilterState, json: bool) -> Result<()> {
    let results = compute(&posts.posts, filter);

    if json {
        let plain: Vec<&Post> = results.iter().map(Arc::as_ref).collect();
        let out = serde_json::to_string_pretty(&plain).context("Failed to encode posts")?;
        println!("{}", out);
        return Ok(());
    }

    if results.is_empty() {
        println!("No posts found");
        return Ok(());
    }

    for post in &results {
        let name = strip_control_chars(&post.user_name);
        let caption = strip_control_chars(&post.caption);
        println!(
            "{:<8} {:<20} {:<6} {:<10} {:>8}  {}",
            truncate_to_width(&post.id, 8),
            truncate_to_width(&name, 20),
            post.media_type.name(),
            truncate_to_width(&post.date, 10),
            format_count(post.views),
            truncate_to_width(&caption, 40),
        );
    }
    println!("{} of {} posts", results.len(), posts.posts.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let posts = match args.posts.as_ref().or(config.posts_file.as_ref()) {
        Some(path) => PostSet::load(path)
            .with_context(|| format!("Failed to load posts from {}", path.display()))?,
        None => PostSet::sample().context("Failed to load the sample feed")?,
    };

    if args.list {
        let filter = FilterState {
            search_text: args.search,
            category: args.category,
            media_type: args.media,
            sort_key: args.sort,
        };
        return print_feed(&posts, &filter, args.json);
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    let mut app = App::new(posts, &config, event_tx);

    ui::run(&mut app, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
