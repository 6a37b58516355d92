//! gorb-driver: interactive console for configuring Gorb USB HID mice.

use anyhow::{Context, Result};
use clap::Parser;
use gorb_driver_core::config::Config;
use gorb_driver_core::console::{self, Console};
use gorb_driver_core::transport::HidapiBackend;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "gorb-driver",
    version,
    about = "Interactive console for Gorb mouse configuration"
)]
struct Cli {
    /// Path to the YAML config file naming the manufacturer filter.
    #[arg(long, default_value = "conf.yaml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    println!("loading.....");
    let config = Config::load(&cli.config)
        .with_context(|| format!("load config {}", cli.config.display()))?;
    info!(manufacturer = %config.manufacturer, "Config loaded");
    let backend = HidapiBackend::new().context("initialize HID backend")?;
    let mut console = Console::new(backend, config);

    // Ctrl-C is the console's clean-exit signal, not an error. The main
    // thread may be blocked reading stdin, so the handler exits directly;
    // the OS releases any open handle.
    ctrlc::set_handler(|| {
        println!("\n{}", console::FAREWELL);
        std::process::exit(0);
    })
    .context("install interrupt handler")?;

    println!("{}", console::INTRO);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();
    loop {
        write!(stdout, "{}", console::PROMPT)?;
        stdout.flush()?;

        line.clear();
        // EOF (Ctrl-D) also ends the loop; per-command failures never do.
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let reply = console.handle_line(&line);
        if !reply.is_empty() {
            println!("{reply}");
        }
    }

    // Any open handle is released by Drop on the way out.
    println!("{}", console::FAREWELL);
    Ok(())
}
