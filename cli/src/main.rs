use std::env;
use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use product_cli::input::HELP;
use product_cli::{Args, TerminalView, UreqTransport};
use product_core::{PostsClient, ProductListClient};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();
    tracing::info!(base_url = %args.base_url, debounce_ms = args.debounce_ms, "starting");

    let mut client = ProductListClient::new(
        PostsClient::new(&args.base_url),
        UreqTransport::new(args.timeout()),
        TerminalView::new(io::stdout()),
    )
    .with_debounce(args.debounce());

    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("spawning stdin reader")?;

    client.view_mut().line(HELP);
    if args.load {
        // Reported through the view on failure.
        let _ = client.load_all();
    }

    product_cli::run(&mut client, &rx, io::stdout());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PRODUCTS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("product_core=warn,product_cli=warn"));

    let format = env::var("PRODUCTS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry.with(fmt::layer().compact().with_writer(io::stderr)).init();
        }
    }
}
