//! Example: Share a file for a limited time
//!
//! Usage:
//!   cargo run --example share -- [--path Folder] NAME --to EMAIL [--duration 1h|24h|7d|30d]
//!     [--api URL] [--proxy URL] [--store FILE]

mod cli;

use cli::{ArgParser, change_dir, config_from_parser, fail, init_tracing, signed_in, usage_and_exit};
use healthrecords::AccessDuration;

const USAGE: &str = "Usage: cargo run --example share -- [--path Folder] NAME --to EMAIL [--duration 1h|24h|7d|30d] [--api URL] [--proxy URL] [--store FILE]";

#[tokio::main]
async fn main() {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let path = parser.take_value(&["--path"]).unwrap_or_default();
    let recipient = parser.require_value(&["--to"]);
    let duration: AccessDuration = match parser.take_value(&["--duration", "-d"]) {
        Some(value) => value.parse().unwrap_or_else(|_| usage_and_exit(USAGE)),
        None => AccessDuration::default(),
    };
    let config = config_from_parser(&mut parser);
    let args = parser.remaining();
    if args.len() != 1 {
        usage_and_exit(USAGE);
    }

    let (app, _) = signed_in(&config).await;
    change_dir(&app, &path).await;

    match app.share(&args[0], &recipient, duration).await {
        Ok(result) => {
            println!("✅ Shared {} with {} for {}", args[0], recipient, duration.label());
            if let Some(link) = &result.share_link {
                println!("   link: {}", link);
            }
            if let Some(expires) = &result.expires_at {
                println!("   expires: {}", expires);
            }
        }
        Err(e) => fail("Failed to share file", e),
    }
}
