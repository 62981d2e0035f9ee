//! Example: Delete a file
//!
//! Usage:
//!   cargo run --example rm -- [--path Folder] NAME [--yes] [--api URL] [--proxy URL] [--store FILE]

mod cli;

use std::io::{self, BufRead, Write};

use cli::{ArgParser, change_dir, config_from_parser, fail, init_tracing, signed_in, usage_and_exit};

const USAGE: &str =
    "Usage: cargo run --example rm -- [--path Folder] NAME [--yes] [--api URL] [--proxy URL] [--store FILE]";

fn confirm(name: &str) -> bool {
    print!("Are you sure you want to delete {}? [y/N] ", name);
    let _ = io::stdout().flush();
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer).is_ok()
        && matches!(answer.trim(), "y" | "Y" | "yes")
}

#[tokio::main]
async fn main() {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let path = parser.take_value(&["--path"]).unwrap_or_default();
    let config = config_from_parser(&mut parser);
    let mut args = parser.remaining();
    let assume_yes = args.iter().any(|a| a == "--yes" || a == "-y");
    args.retain(|a| a != "--yes" && a != "-y");
    if args.len() != 1 {
        usage_and_exit(USAGE);
    }
    let name = &args[0];

    let (app, _) = signed_in(&config).await;
    change_dir(&app, &path).await;

    if !assume_yes && !confirm(name) {
        println!("Cancelled.");
        return;
    }
    match app.delete(name).await {
        Ok(_) => println!("🗑 Deleted {}", name),
        Err(e) => fail("Failed to delete file", e),
    }
}
