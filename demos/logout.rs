//! Example: Forget the stored session
//!
//! Usage:
//!   cargo run --example logout -- [--store FILE]

mod cli;

use cli::{ArgParser, config_from_parser, fail, init_tracing, start_app, usage_and_exit};

const USAGE: &str = "Usage: cargo run --example logout -- [--store FILE]";

#[tokio::main]
async fn main() {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let config = config_from_parser(&mut parser);
    if !parser.remaining().is_empty() {
        usage_and_exit(USAGE);
    }

    let app = start_app(&config).await;
    if let Err(e) = app.logout().await {
        fail("Logout failed", e);
    }
    println!("👋 Signed out.");
}
