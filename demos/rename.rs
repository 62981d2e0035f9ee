//! Example: Rename a file or folder
//!
//! Usage:
//!   cargo run --example rename -- [--path Folder] NAME NEW_NAME [--api URL] [--proxy URL] [--store FILE]

mod cli;

use cli::{ArgParser, change_dir, config_from_parser, fail, init_tracing, signed_in, usage_and_exit};

const USAGE: &str =
    "Usage: cargo run --example rename -- [--path Folder] NAME NEW_NAME [--api URL] [--proxy URL] [--store FILE]";

#[tokio::main]
async fn main() {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let path = parser.take_value(&["--path"]).unwrap_or_default();
    let config = config_from_parser(&mut parser);
    let args = parser.remaining();
    if args.len() != 2 {
        usage_and_exit(USAGE);
    }

    let (app, _) = signed_in(&config).await;
    change_dir(&app, &path).await;

    match app.rename(&args[0], &args[1]).await {
        Ok(node) => println!("✅ Renamed {} to {}", args[0], node.name),
        Err(e) => fail("Failed to rename item", e),
    }
}
