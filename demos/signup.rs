//! Example: Create an account
//!
//! Usage:
//!   cargo run --example signup -- --name NAME --email EMAIL --password PASSWORD \
//!     --dob YYYY-MM-DD --gender male|female|other [--api URL] [--proxy URL] [--store FILE]
//!
//! Passing the flags implies accepting the terms.

mod cli;

use cli::{ArgParser, config_from_parser, fail, init_tracing, start_app, usage_and_exit};
use healthrecords::HrError;
use healthrecords::forms::{Gender, SignupForm};
use healthrecords::session::AuthOutcome;

const USAGE: &str = "Usage: cargo run --example signup -- --name NAME --email EMAIL --password PASSWORD --dob YYYY-MM-DD --gender male|female|other [--api URL] [--proxy URL] [--store FILE]";

#[tokio::main]
async fn main() {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let full_name = parser.require_value(&["--name", "-n"]);
    let email = parser.require_value(&["--email", "-e"]);
    let password = parser.require_value(&["--password", "-p"]);
    let dob = parser.require_value(&["--dob"]);
    let gender: Gender = parser
        .require_value(&["--gender"])
        .parse()
        .unwrap_or_else(|_| usage_and_exit(USAGE));
    let config = config_from_parser(&mut parser);
    if !parser.remaining().is_empty() {
        usage_and_exit(USAGE);
    }

    let mut form = SignupForm::new();
    form.full_name = full_name;
    form.email = email;
    form.dob = dob;
    form.gender = Some(gender);
    form.confirm_password = password.clone();
    form.password = password;
    form.terms_accepted = true;

    let app = start_app(&config).await;
    match app.register(form).await {
        Ok(AuthOutcome::Authenticated(session)) => {
            println!("✅ Account created. Signed in as {}", session.user.email);
        }
        Ok(AuthOutcome::Message(message)) => println!("ℹ {}", message),
        Ok(AuthOutcome::Unrecognised) => fail("Registration failed", "unexpected reply from server"),
        Err(HrError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field.name(), message);
            }
            std::process::exit(1);
        }
        Err(e) => fail("Registration failed", e),
    }
}
