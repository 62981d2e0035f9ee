//! Example: Interactive shell over the application state
//!
//! Usage:
//!   cargo run --example shell -- [--api URL] [--proxy URL] [--store FILE]
//!
//! Type `help` at the prompt for commands.

mod cli;

use std::io::{self, BufRead, Write};

use cli::{ArgParser, config_from_parser, init_tracing, print_listing, start_app, usage_and_exit};
use healthrecords::dashboard::{OpenAction, View};
use healthrecords::session::AuthOutcome;
use healthrecords::{AccessDuration, AppHandle, HrError, Screen};

const USAGE: &str = "Usage: cargo run --example shell -- [--api URL] [--proxy URL] [--store FILE]";

const HELP: &str = "\
Signed out:
  login EMAIL PASSWORD      sign in
  otp EMAIL                 send a one-time passcode
  verify CODE               verify the passcode
Signed in:
  ls                        list the current folder
  cd NAME | cd .. | cd /    change folder
  find TERM                 filter the listing (empty TERM clears)
  open NAME                 open a folder or print a file URL
  mkdir NAME                create a folder
  rm NAME                   delete a file (asks first)
  mv NAME NEW_NAME          rename an item
  upload PATH               register a local file here
  share NAME EMAIL [1h|24h|7d|30d]
  view files|hospitals|shared|settings
  logout
Always:
  status, help, quit";

fn prompt(text: &str) -> Option<String> {
    print!("{}", text);
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn report<T>(result: healthrecords::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(HrError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                println!("  {}: {}", field.name(), message);
            }
            None
        }
        Err(e) => {
            println!("❌ {}", e);
            None
        }
    }
}

fn report_auth(result: healthrecords::Result<AuthOutcome>) {
    match report(result) {
        Some(AuthOutcome::Authenticated(session)) => {
            println!("✅ Signed in as {}", session.user.full_name)
        }
        Some(AuthOutcome::Message(message)) => println!("ℹ {}", message),
        Some(AuthOutcome::Unrecognised) => println!("⚠ Unexpected reply from server"),
        None => {}
    }
}

async fn status(app: &AppHandle) {
    match app.screen().await {
        Ok(Screen::Dashboard(view)) => {
            println!("{} <{}> | {}", view.user.full_name, view.user.email, view.view.label());
            if let Some(text) = view.view.description() {
                println!("  {}", text);
            } else {
                print_listing(&view);
            }
        }
        Ok(Screen::Login { otp_mode, banner }) => {
            println!(
                "Signed out ({})",
                if otp_mode { "awaiting OTP" } else { "login" }
            );
            if let Some(banner) = banner {
                println!("  ⚠ {}", banner);
            }
        }
        Ok(Screen::Signup { .. }) => println!("Signed out (signup)"),
        Ok(Screen::Loading) => println!("Loading..."),
        Err(e) => println!("❌ {}", e),
    }
}

fn parse_view(name: &str) -> Option<View> {
    View::ALL
        .into_iter()
        .find(|v| v.label().eq_ignore_ascii_case(name) || format!("{:?}", v).eq_ignore_ascii_case(name))
}

async fn cd(app: &AppHandle, target: &str) {
    match target {
        "/" => {
            report(app.go_home().await);
        }
        ".." => {
            if let Ok(Screen::Dashboard(view)) = app.screen().await {
                // breadcrumb[0] is Home; the parent of depth d sits at index d - 2.
                let depth = view.breadcrumb.len() - 1;
                match depth {
                    0 => {}
                    1 => {
                        report(app.go_home().await);
                    }
                    _ => {
                        report(app.navigate_to(depth - 2).await);
                    }
                }
            }
        }
        name => match report(app.open(name).await) {
            Some(OpenAction::Url(url)) => println!("🔗 {}", url),
            _ => {}
        },
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let config = config_from_parser(&mut parser);
    if !parser.remaining().is_empty() {
        usage_and_exit(USAGE);
    }

    let app = start_app(&config).await;
    status(&app).await;

    while let Some(line) = prompt("hr> ") {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = parts.split_first() else {
            continue;
        };

        match (cmd, args) {
            ("help", _) => println!("{}", HELP),
            ("quit" | "exit", _) => break,
            ("status", _) => status(&app).await,
            ("login", [email, password]) => report_auth(app.login(email, password).await),
            ("otp", [email]) => match report(app.send_otp(email).await) {
                Some(Some(AuthOutcome::Message(message))) => println!("📧 {}", message),
                Some(None) => println!("Email is required"),
                Some(_) => println!("📧 OTP requested"),
                None => {}
            },
            ("verify", [code]) => report_auth(app.verify_otp(code).await),
            ("logout", _) => {
                if report(app.logout().await).is_some() {
                    println!("👋 Signed out.");
                }
            }
            ("ls", _) => status(&app).await,
            ("cd", [target]) => {
                cd(&app, target).await;
                status(&app).await;
            }
            ("find", terms) => {
                if let Some(matches) = report(app.search(&terms.join(" ")).await) {
                    println!("{} match(es)", matches.len());
                }
            }
            ("open", [name]) => cd(&app, name).await,
            ("mkdir", [name]) => {
                if let Some(Some(node)) = report(app.create_folder(name).await) {
                    println!("✅ Created {}", node.name);
                }
            }
            ("rm", [name]) => {
                let answer = prompt(&format!("Are you sure you want to delete {}? [y/N] ", name))
                    .unwrap_or_default();
                if matches!(answer.as_str(), "y" | "Y" | "yes") {
                    if report(app.delete(name).await).is_some() {
                        println!("🗑 Deleted {}", name);
                    }
                }
            }
            ("mv", [name, new_name]) => {
                if let Some(node) = report(app.rename(name, new_name).await) {
                    println!("✅ Renamed to {}", node.name);
                }
            }
            ("upload", [path]) => {
                if let Some(node) = report(app.upload(*path).await) {
                    println!("✅ Uploaded {}", node.name);
                }
            }
            ("share", [name, email, rest @ ..]) if rest.len() <= 1 => {
                let duration = match rest.first() {
                    Some(value) => match value.parse::<AccessDuration>() {
                        Ok(duration) => duration,
                        Err(e) => {
                            println!("❌ {}", e);
                            continue;
                        }
                    },
                    None => AccessDuration::default(),
                };
                if let Some(result) = report(app.share(name, email, duration).await) {
                    println!("✅ Shared for {}", duration.label());
                    if let Some(link) = result.share_link {
                        println!("   link: {}", link);
                    }
                }
            }
            ("view", [name]) => match parse_view(name) {
                Some(view) => {
                    report(app.select_view(view).await);
                    status(&app).await;
                }
                None => println!("Unknown view: {}", name),
            },
            _ => println!("Unknown command. Type `help`."),
        }
    }

    app.shutdown().await;
}
