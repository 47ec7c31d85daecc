//! Bamboo Flight - a small side-scrolling arcade game.
//!
//! A bee flies through a scrolling field of parallax scenery. The game runs at a fixed logical
//! resolution of 320x240, drawn on the CPU with a bitmap font and presented through WGPU.
//!
//! # Architecture
//! - `app/`: Window lifecycle, event routing and the frame step
//! - `screens/`: The title and score screens and the dispatcher that switches between screens
//! - `game/`: Shared game context, input bindings, audio, high score and the flight screen
//! - `renderer/`: Canvas, bitmap font, text layout and the GPU presenter
//! - `background/`, `assets`: Images and scenery
//! - `config`: The settings file
//!
//! # Usage
//! `bamboo-flight [--config <path>] [--print-config]`. Logging is controlled with `RUST_LOG`.

mod app;
mod assets;
mod background;
mod config;
mod game;
mod renderer;
mod screens;

use anyhow::{Context, Result, bail};
use config::Settings;
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

const USAGE: &str = "Usage: bamboo-flight [--config <path>] [--print-config]";

/// What the command line asked for.
#[derive(Debug, PartialEq)]
enum Command {
    Run { config: PathBuf },
    PrintConfig,
    Help,
    Version,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut config = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--print-config" => return Ok(Command::PrintConfig),
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            other => bail!("unknown argument {other:?}\n{USAGE}"),
        }
    }
    Ok(Command::Run {
        config: config.unwrap_or_else(config::default_path),
    })
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = match parse_args(std::env::args().skip(1))? {
        Command::Run { config } => config,
        Command::PrintConfig => {
            print!("{}", Settings::default_toml());
            return Ok(());
        }
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Version => {
            println!("bamboo-flight {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };

    let settings = Settings::load(&config);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new(settings);
    event_loop.run_app(&mut app).context("event loop failed")?;

    if app.failed() {
        bail!("could not start the game");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(
            parse_args(args(&["--config", "my.toml"])).expect("parse"),
            Command::Run {
                config: PathBuf::from("my.toml")
            }
        );
        assert_eq!(
            parse_args(args(&["--print-config"])).expect("parse"),
            Command::PrintConfig
        );
        assert_eq!(
            parse_args(args(&[])).expect("parse"),
            Command::Run {
                config: config::default_path()
            }
        );
        assert!(parse_args(args(&["--config"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }
}
