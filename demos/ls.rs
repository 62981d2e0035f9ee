//! Example: List a folder
//!
//! Usage:
//!   cargo run --example ls -- [--path Folder/Sub] [--search TERM] [--api URL] [--proxy URL] [--store FILE]

mod cli;

use cli::{
    ArgParser, change_dir, config_from_parser, dashboard, fail, init_tracing, print_listing,
    signed_in, usage_and_exit,
};

const USAGE: &str =
    "Usage: cargo run --example ls -- [--path Folder/Sub] [--search TERM] [--api URL] [--proxy URL] [--store FILE]";

#[tokio::main]
async fn main() {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let path = parser.take_value(&["--path"]).unwrap_or_default();
    let search = parser.take_value(&["--search", "-s"]);
    let config = config_from_parser(&mut parser);
    if !parser.remaining().is_empty() {
        usage_and_exit(USAGE);
    }

    let (app, view) = signed_in(&config).await;
    println!("Signed in as {}\n", view.user.email);

    change_dir(&app, &path).await;
    if let Some(term) = search {
        if let Err(e) = app.search(&term).await {
            fail("Search failed", e);
        }
    }

    print_listing(&dashboard(&app).await);
}
