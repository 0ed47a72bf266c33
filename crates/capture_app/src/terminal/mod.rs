pub mod app;
pub mod config;
pub mod effects;
pub mod logging;
pub mod ui;

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use capture_core::Msg;
use client_logging::{client_info, client_warn};

use app::{App, AppEvent};
use config::AppConfig;
use effects::EffectRunner;

/// Interactive session: renders the screen and reads commands from stdin.
pub fn run_interactive(config: &AppConfig) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel();
    let runner = connect(config, tx.clone())?;
    spawn_input_reader(tx)?;

    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "Capture client for {}. Type 'help' for commands.",
        config.server_url
    )?;

    let mut app = App::new(runner, stdout).with_prompt();
    app.render()?;
    app.dispatch_msg(Msg::RefreshClicked)?;

    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Msg(msg) => app.dispatch_msg(msg)?,
            AppEvent::Line(line) => {
                if !app.handle_line(&line)? {
                    break;
                }
            }
            AppEvent::InputClosed => break,
        }
    }

    app.shutdown()?;
    client_info!("Interactive session finished");
    Ok(())
}

/// Captures one address and waits for the job to finish.
pub fn run_capture(config: &AppConfig, url: String) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel();
    let runner = connect(config, tx)?;
    let mut app = App::new(runner, io::stdout());

    app.dispatch_msg(Msg::InputChanged(url))?;
    app.dispatch_msg(Msg::CaptureClicked)?;

    loop {
        if let Some(outcome) = app.capture_outcome() {
            app.shutdown()?;
            return match outcome {
                Ok(()) => Ok(()),
                Err(message) => bail!("capture failed: {message}"),
            };
        }
        match rx.recv() {
            Ok(AppEvent::Msg(msg)) => app.dispatch_msg(msg)?,
            Ok(AppEvent::Line(_) | AppEvent::InputClosed) => {}
            Err(_) => bail!("client runtime stopped before the capture finished"),
        }
    }
}

/// Prints the capture list once.
pub fn run_list(config: &AppConfig) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel();
    let runner = connect(config, tx)?;
    let mut app = App::new(runner, io::stdout()).quiet();

    app.dispatch_msg(Msg::RefreshClicked)?;
    loop {
        match rx.recv() {
            Ok(AppEvent::Msg(Msg::CapturesLoadFailed(message))) => {
                bail!("listing captures failed: {message}")
            }
            Ok(AppEvent::Msg(msg @ Msg::CapturesLoaded(_))) => {
                app.dispatch_msg(msg)?;
                break;
            }
            Ok(AppEvent::Msg(msg)) => app.dispatch_msg(msg)?,
            Ok(AppEvent::Line(_) | AppEvent::InputClosed) => {}
            Err(_) => bail!("client runtime stopped before the list arrived"),
        }
    }

    client_info!("Listed {} captures", app.view().captures.len());
    app.render()?;
    Ok(())
}

fn connect(config: &AppConfig, events: mpsc::Sender<AppEvent>) -> anyhow::Result<EffectRunner> {
    EffectRunner::new(
        config.to_client_settings(),
        config.success_display(),
        events,
    )
    .with_context(|| format!("connecting to {}", config.server_url))
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(AppEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        client_warn!("Reading stdin failed: {}", err);
                        break;
                    }
                }
            }
            let _ = tx.send(AppEvent::InputClosed);
        })
        .context("spawning stdin reader")?;
    Ok(())
}
