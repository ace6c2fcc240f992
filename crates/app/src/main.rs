//! Hongzhi - headless drawing host
//!
//! Reads host messages as JSON lines on stdin, drives one drawing session,
//! reports engine events as JSON lines on stdout and exports the final buffer
//! as PNG when input ends.

use std::process::ExitCode;

use ab_glyph::FontArc;
use hongzhi_ipc::{EngineToHost, HostToEngine, decode_line, encode_line};
use hongzhi_painting::DescriptorError;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod catalog;
mod config;
mod convert;
mod driver;
mod error;
mod export;

use config::AppConfig;
use driver::{Driver, open_session};
use error::AppError;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    info!("Starting Hongzhi with base {:?}", config.base);

    let font = match &config.font_path {
        Some(path) => Some(FontArc::try_from_vec(std::fs::read(path)?).map_err(DescriptorError::from)?),
        None => None,
    };

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(async {
        let session = open_session(&config, font)?;
        let (input_tx, input_rx) = mpsc::channel(256);
        let (output_tx, output_rx) = mpsc::unbounded_channel();

        let reader = tokio::spawn(read_input(input_tx));
        let writer = tokio::spawn(write_output(output_rx));
        let session = Driver::new(session).run(input_rx, output_tx).await;
        reader.await??;
        writer.await??;

        match session.surface() {
            Some(surface) => export::export_png(surface, &config.output),
            None => {
                warn!("No layout was ever reported; nothing to export");
                Ok(())
            }
        }
    })
}

async fn read_input(tx: mpsc::Sender<HostToEngine>) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(&line) {
            Ok(message) => {
                if tx.send(message).await.is_err() {
                    break;
                }
            }
            Err(err) => warn!("Skipping input line: {}", err),
        }
    }
    Ok(())
}

async fn write_output(mut rx: mpsc::UnboundedReceiver<EngineToHost>) -> Result<(), AppError> {
    let mut stdout = tokio::io::stdout();
    while let Some(message) = rx.recv().await {
        let mut line = encode_line(&message)?;
        line.push('\n');
        stdout.write_all(line.as_bytes()).await?;
    }
    stdout.flush().await?;
    Ok(())
}
