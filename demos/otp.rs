//! Example: Sign in with a one-time passcode
//!
//! Sends the OTP, then reads it from stdin.
//!
//! Usage:
//!   cargo run --example otp -- --email EMAIL [--api URL] [--proxy URL] [--store FILE]

mod cli;

use std::io::{self, BufRead, Write};

use cli::{ArgParser, config_from_parser, fail, init_tracing, start_app, usage_and_exit};
use healthrecords::session::AuthOutcome;

const USAGE: &str = "Usage: cargo run --example otp -- --email EMAIL [--api URL] [--proxy URL] [--store FILE]";

#[tokio::main]
async fn main() {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let email = parser.require_value(&["--email", "-e"]);
    let config = config_from_parser(&mut parser);
    if !parser.remaining().is_empty() {
        usage_and_exit(USAGE);
    }

    let app = start_app(&config).await;
    match app.send_otp(&email).await {
        Ok(Some(AuthOutcome::Message(message))) => println!("📧 {}", message),
        Ok(Some(AuthOutcome::Authenticated(_))) => {
            println!("✅ Signed in.");
            return;
        }
        Ok(_) => println!("📧 OTP requested for {}", email),
        Err(e) => fail("Failed to send OTP", e),
    }

    print!("Enter OTP: ");
    let _ = io::stdout().flush();
    let mut otp = String::new();
    if io::stdin().lock().read_line(&mut otp).is_err() {
        fail("Failed to read OTP", "stdin closed");
    }

    match app.verify_otp(otp.trim()).await {
        Ok(AuthOutcome::Authenticated(session)) => {
            println!("✅ Signed in as {} ({})", session.user.full_name, session.user.email);
        }
        Ok(AuthOutcome::Message(message)) => fail("Verification failed", message),
        Ok(AuthOutcome::Unrecognised) => fail("Verification failed", "unexpected reply from server"),
        Err(e) => fail("Verification failed", e),
    }
}
