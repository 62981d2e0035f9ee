//! Example: Sign in and store the session
//!
//! Usage:
//!   cargo run --example login -- --email EMAIL --password PASSWORD [--api URL] [--proxy URL] [--store FILE]

mod cli;

use cli::{ArgParser, config_from_parser, fail, init_tracing, start_app, usage_and_exit};
use healthrecords::Screen;
use healthrecords::session::AuthOutcome;

const USAGE: &str = "Usage: cargo run --example login -- --email EMAIL --password PASSWORD [--api URL] [--proxy URL] [--store FILE]";

#[tokio::main]
async fn main() {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let email = parser.require_value(&["--email", "-e"]);
    let password = parser.require_value(&["--password", "-p"]);
    let config = config_from_parser(&mut parser);
    if !parser.remaining().is_empty() {
        usage_and_exit(USAGE);
    }

    println!("Signing in as: {}", email);
    println!();

    let app = start_app(&config).await;
    match app.login(&email, &password).await {
        Ok(AuthOutcome::Authenticated(session)) => {
            println!("✅ Login successful!");
            println!();
            println!("Email: {}", session.user.email);
            println!("Name: {}", session.user.full_name);
            if let Some(id) = &session.user.id {
                println!("User ID: {}", id);
            }
            println!("Session stored in {}", config.storage_path.display());
        }
        Ok(AuthOutcome::Message(message)) => fail("Login failed", message),
        Ok(AuthOutcome::Unrecognised) => fail("Login failed", "unexpected reply from server"),
        Err(e) => {
            if let Ok(Screen::Login { banner: Some(banner), .. }) = app.screen().await {
                fail("Login failed", banner);
            }
            fail("Login failed", e);
        }
    }
}
