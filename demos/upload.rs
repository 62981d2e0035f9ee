//! Example: Register a local file in a folder
//!
//! Usage:
//!   cargo run --example upload -- [--path Folder] LOCAL_FILE [--api URL] [--proxy URL] [--store FILE]

mod cli;

use cli::{ArgParser, change_dir, config_from_parser, fail, init_tracing, signed_in, usage_and_exit};

const USAGE: &str =
    "Usage: cargo run --example upload -- [--path Folder] LOCAL_FILE [--api URL] [--proxy URL] [--store FILE]";

#[tokio::main]
async fn main() {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let path = parser.take_value(&["--path"]).unwrap_or_default();
    let config = config_from_parser(&mut parser);
    let args = parser.remaining();
    if args.len() != 1 {
        usage_and_exit(USAGE);
    }

    let (app, _) = signed_in(&config).await;
    change_dir(&app, &path).await;

    match app.upload(&args[0]).await {
        Ok(node) => {
            println!("✅ Uploaded {}", node.name);
            println!("   id: {}", node.id);
            if let Some(mime) = &node.mime_type {
                println!("   type: {}", mime);
            }
        }
        Err(e) => fail("Failed to upload file", e),
    }
}
