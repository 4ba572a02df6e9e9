//! Demo screens built from the reference views.
//!
//! `viewtree` opens a menu of every widget; `--demo executor` shows a single
//! executor whose outcome arrives from outside the tree after `--delay`
//! seconds; `--demo table` shows a scrollable table on its own.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ratatui::layout::Alignment;
use tokio::sync::mpsc;
use tracing::info;

use viewtree::app::Program;
use viewtree::config::Config;
use viewtree::ui::layout::VerticalAlignment;
use viewtree::view::{Cmd, Msg, Outcome, View};
use viewtree::widgets::{
    Column, Confirmation, Executor, FancyText, Frame, Menu, MenuEntry, Tab, Table, Tabs, Validation,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    /// Menu of every widget.
    Menu,
    /// Executor resolved by an outside task.
    Executor,
    /// Scrollable table.
    Table,
}

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Nested terminal views demo")]
struct Cli {
    /// Which screen to open.
    #[arg(long, value_enum, default_value_t = Demo::Menu)]
    demo: Demo,

    /// Seconds before a simulated action reports its outcome.
    #[arg(long, default_value_t = 5)]
    delay: u64,

    /// Write logs to this file (filtered by `RUST_LOG`).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ───────────────────────────────────────── demos ─────────────

fn cities(config: &Arc<Config>) -> Result<Table> {
    const ROWS: &[[&str; 4]] = &[
        ["1", "Tokyo", "Japan", "37,274,000"],
        ["2", "Delhi", "India", "32,065,760"],
        ["3", "Shanghai", "China", "28,516,904"],
        ["4", "Dhaka", "Bangladesh", "22,478,116"],
        ["5", "São Paulo", "Brazil", "22,429,800"],
        ["6", "Mexico City", "Mexico", "22,085,140"],
        ["7", "Cairo", "Egypt", "21,750,020"],
        ["8", "Beijing", "China", "21,333,332"],
        ["9", "Mumbai", "India", "20,961,472"],
        ["10", "Osaka", "Japan", "19,059,856"],
        ["11", "Chongqing", "China", "16,874,740"],
        ["12", "Karachi", "Pakistan", "16,839,950"],
        ["13", "Istanbul", "Turkey", "15,636,243"],
        ["14", "Kinshasa", "DR Congo", "15,628,085"],
        ["15", "Lagos", "Nigeria", "15,387,639"],
        ["16", "Buenos Aires", "Argentina", "15,369,919"],
        ["17", "Kolkata", "India", "15,133,888"],
        ["18", "Manila", "Philippines", "14,406,059"],
        ["19", "Tianjin", "China", "14,011,828"],
        ["20", "Guangzhou", "China", "13,964,637"],
        ["21", "Rio De Janeiro", "Brazil", "13,634,274"],
        ["22", "Lahore", "Pakistan", "13,541,764"],
        ["23", "Bangalore", "India", "13,193,035"],
        ["24", "Shenzhen", "China", "12,831,330"],
        ["25", "Moscow", "Russia", "12,640,818"],
    ];
    let table = Table::builder(Arc::clone(config))
        .columns(vec![
            Column::new("Rank", 4),
            Column::new("City", 10),
            Column::new("Country", 10),
            Column::new("Population", 10),
        ])
        .rows(ROWS.iter().map(|row| row.iter().copied()))
        .help()
        .build()?;
    Ok(table)
}

fn menu_demo(config: &Arc<Config>, delay: Duration, confirmed: mpsc::Sender<Confirmation>) -> Result<Box<dyn View>> {
    let validation = Frame::builder(Arc::clone(config))
        .horizontal(Alignment::Center)
        .vertical(VerticalAlignment::Center)
        .content(Validation::new(Arc::clone(config)).with_channel(confirmed))
        .build()?;

    let tabs = Tabs::new(
        (1..=3)
            .map(|i| Tab::placeholder(format!("Tab {i}"), Arc::clone(config)))
            .collect(),
        Arc::clone(config),
    )?;
    let tabs = Frame::builder(Arc::clone(config))
        .horizontal(Alignment::Left)
        .vertical(VerticalAlignment::Top)
        .content(tabs)
        .build()?;

    let action = Validation::new(Arc::clone(config)).with_action(move || {
        Cmd::after(delay, Msg::Executed(Outcome::success("The action completed")))
    });

    let menu = Menu::new(
        "This is a menu title",
        vec![
            MenuEntry::new("fancytext", "Full size text, default values", FancyText::new("HELLO", Arc::clone(config))),
            MenuEntry::new("validation", "Full size yes/no validation screen, default values", validation),
            MenuEntry::new("tabs", "tabulations with content in each tab", tabs),
            MenuEntry::new("table", "scrollable table of the largest cities", cities(config)?),
            MenuEntry::new("action", "confirm, then follow a long-running action", action),
        ],
        Arc::clone(config),
    )?;

    let root = Frame::builder(Arc::clone(config))
        .border()
        .horizontal(Alignment::Left)
        .content(menu)
        .build()?;
    Ok(Box::new(root))
}

fn executor_demo(config: &Arc<Config>) -> Result<Box<dyn View>> {
    let root = Frame::builder(Arc::clone(config))
        .content(Executor::new(Arc::clone(config)))
        .build()?;
    Ok(Box::new(root))
}

// ───────────────────────────────────────── main ─────────────

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // Logging to the terminal would tear the alternate screen.
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let config = Arc::new(Config::load());
    let delay = Duration::from_secs(cli.delay);
    info!(demo = ?cli.demo, delay = cli.delay, "starting");

    match cli.demo {
        Demo::Menu => {
            let (tx, mut rx) = mpsc::channel(1);
            let program = Program::new(menu_demo(&config, delay, tx)?, Arc::clone(&config));
            let handle = program.handle();
            tokio::spawn(async move {
                if rx.recv().await.is_some() {
                    handle.quit();
                }
            });
            program.run().await?;
        }
        Demo::Executor => {
            let program = Program::new(executor_demo(&config)?, Arc::clone(&config));
            let handle = program.handle();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                handle.send(Msg::Executed(Outcome::failure("This function has failed")));
            });
            program.run().await?;
        }
        Demo::Table => {
            let root = Frame::builder(Arc::clone(&config)).content(cities(&config)?).build()?;
            Program::new(Box::new(root), Arc::clone(&config)).run().await?;
        }
    }

    println!("Thank you for using this tool !");
    Ok(())
}
