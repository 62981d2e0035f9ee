use std::env;
use std::process;

use healthrecords::{AppHandle, ClientConfig, RootController, Screen};
use healthrecords::app::DashboardView;
use tracing_subscriber::{EnvFilter, fmt};

pub fn usage_and_exit(usage: &str) -> ! {
    eprintln!("{usage}");
    process::exit(1);
}

pub fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("❌ {}: {}", context, err);
    process::exit(1);
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("healthrecords=info"));
    fmt().with_env_filter(filter).with_target(false).init();
}

pub struct ArgParser {
    args: Vec<String>,
    usage: &'static str,
}

impl ArgParser {
    pub fn new(usage: &'static str) -> Self {
        let args: Vec<String> = env::args().skip(1).collect();

        if args.iter().any(|a| a == "--help" || a == "-h") {
            println!("{usage}");
            process::exit(0);
        }

        Self { args, usage }
    }

    pub fn take_value(&mut self, names: &[&str]) -> Option<String> {
        let mut i = 0;
        while i < self.args.len() {
            if names.contains(&self.args[i].as_str()) {
                let value = self.args.get(i + 1).cloned();
                if value.is_none() {
                    usage_and_exit(self.usage);
                }
                self.args.drain(i..=i + 1);
                return value;
            }
            i += 1;
        }
        None
    }

    #[allow(dead_code)]
    pub fn require_value(&mut self, names: &[&str]) -> String {
        self.take_value(names)
            .unwrap_or_else(|| usage_and_exit(self.usage))
    }

    pub fn remaining(self) -> Vec<String> {
        self.args
    }
}

/// Config from the environment, overridden by `--api`, `--proxy` and `--store`.
pub fn config_from_parser(parser: &mut ArgParser) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(api) = parser.take_value(&["--api"]) {
        config.api_base = api.trim_end_matches('/').to_string();
    }
    if let Some(proxy) = parser.take_value(&["--proxy"]) {
        config = config.with_proxy(proxy);
    }
    if let Some(store) = parser.take_value(&["--store"]) {
        config = config.with_storage_path(store);
    }
    config
}

pub async fn start_app(config: &ClientConfig) -> AppHandle {
    let controller =
        RootController::from_config(config).unwrap_or_else(|e| fail("Failed to start", e));
    AppHandle::start(controller)
        .await
        .unwrap_or_else(|e| fail("Failed to start", e))
}

/// Start the app from the stored session; exit when nobody is signed in.
#[allow(dead_code)]
pub async fn signed_in(config: &ClientConfig) -> (AppHandle, DashboardView) {
    let app = start_app(config).await;
    match app.screen().await {
        Ok(Screen::Dashboard(view)) => (app, view),
        Ok(Screen::Login {
            banner: Some(banner),
            ..
        }) => fail("Not signed in", banner),
        Ok(_) => fail(
            "Not signed in",
            "run `cargo run --example login` first",
        ),
        Err(e) => fail("Failed to read state", e),
    }
}

/// Open each `/`-separated folder of `path` from the root.
#[allow(dead_code)]
pub async fn change_dir(app: &AppHandle, path: &str) {
    for name in path.split('/').filter(|s| !s.is_empty()) {
        if let Err(e) = app.open(name).await {
            fail(&format!("Cannot open {}", name), e);
        }
    }
}

#[allow(dead_code)]
pub async fn dashboard(app: &AppHandle) -> DashboardView {
    match app.screen().await {
        Ok(Screen::Dashboard(view)) => view,
        Ok(_) => fail("Signed out", "the session is no longer valid"),
        Err(e) => fail("Failed to read state", e),
    }
}

#[allow(dead_code)]
pub fn print_listing(view: &DashboardView) {
    println!("📁 {}\n", view.breadcrumb.join(" / "));
    if let Some(banner) = &view.banner {
        println!("  ⚠ {}", banner);
    }
    if view.files.is_empty() {
        println!("  (empty)");
        return;
    }
    for node in &view.files {
        let icon = if node.is_folder() { "📁" } else { "📄" };
        println!("  {} {:<40} {}", icon, node.name, node.summary());
    }
}
