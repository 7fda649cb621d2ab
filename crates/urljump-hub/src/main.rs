mod app;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use urljump_core::config::Config;
use urljump_core::i18n::{StringId, text};
use urljump_core::{logging, paths};
use urljump_form::{FormTool, dispatch};

use app::App;

/// Compose a URL from host, route and query params, then open it.
#[derive(Debug, Parser)]
#[command(name = "urljump", version, about)]
struct Cli {
    /// Config file (default: ~/.config/urljump/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prefill the host (overrides `default_host`)
    #[arg(long)]
    host: Option<String>,

    /// Prefill the route (overrides `default_route`)
    #[arg(long)]
    route: Option<String>,

    /// Prefill a query param, repeatable
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Print the composed URL and exit without opening the TUI
    #[arg(long)]
    print: bool,
}

/// Split `KEY=VALUE` at the first `=`. A missing `=` means an empty value.
fn parse_param(s: &str) -> Result<(String, String)> {
    if s.is_empty() {
        bail!("param must not be empty");
    }
    Ok(match s.split_once('=') {
        Some((k, v)) => (k.to_string(), v.to_string()),
        None => (s.to_string(), String::new()),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => paths::config_path()?,
    };
    let config = Config::load_or_init(&config_path)?;

    if cli.print {
        logging::init_stderr(&config.log_filter);
    } else if let Err(e) = paths::log_path().and_then(|p| logging::init_file(&p, &config.log_filter))
    {
        logging::init_stderr(&config.log_filter);
        tracing::warn!("file logging unavailable: {e:#}");
    }
    tracing::info!(config = %config_path.display(), locale = ?config.locale, "urljump starting");

    let dispatcher = dispatch::from_config(config.open_command.as_deref())
        .context("Invalid open_command in config")?;
    let mut form = FormTool::new(dispatcher, config.locale);
    form.prefill(
        cli.host.as_deref().unwrap_or(&config.default_host),
        cli.route.as_deref().unwrap_or(&config.default_route),
        &cli.params,
    );

    if cli.print {
        return Ok(match form.state().generate_url() {
            Ok(url) => {
                println!("{url}");
                ExitCode::SUCCESS
            }
            Err(_) => {
                eprintln!("{}", text(config.locale, StringId::UrlInvalid));
                ExitCode::FAILURE
            }
        });
    }

    let mut app = App::new(form);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result?;
    tracing::info!("urljump exiting");
    Ok(ExitCode::SUCCESS)
}

/// Redraw from the current state every tick, handle at most one event per tick.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(50);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(TICK_RATE)? {
            let ev = event::read()?;
            app.handle_event(ev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("id=7").unwrap(),
            ("id".to_string(), "7".to_string())
        );
        assert_eq!(
            parse_param("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_param("flag").unwrap(),
            ("flag".to_string(), String::new())
        );
        assert!(parse_param("").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "urljump", "--host", "a.com", "--route", "x", "-p", "a=1", "--param", "b=2", "--print",
        ])
        .unwrap();
        assert_eq!(cli.host.as_deref(), Some("a.com"));
        assert_eq!(cli.params.len(), 2);
        assert!(cli.print);
    }
}
