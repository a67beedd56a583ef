use std::io::Write;
use std::process::ExitCode;
use clap::Parser;
use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use crate::cli::{Args, OutputFormat};
use crate::form::LookupForm;
use crate::viacep::{AddressLookup, ViaCepClient};

mod cli;
mod form;
#[cfg(test)]
mod testing;
mod view;
mod viacep;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = color_eyre::install() {
        eprintln!("cannot install error report handler: {:?}", e);
    }
    init_tracing();

    match run(Args::parse()).await {
        Ok(code) => code,
        Err(e) => {
            // printed directly, the fmt layer would escape the report's colors
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(ErrorLayer::default())
        .init();
}

async fn run(args: Args) -> color_eyre::Result<ExitCode> {
    let client = ViaCepClient::with_base_url(&args.base_url)?;
    info!("using lookup endpoint [{}]", args.base_url);

    let mut out = std::io::stdout();
    match args.postal_code {
        Some(postal_code) => {
            let found = lookup_once(client, postal_code, &mut out, args.format).await?;
            Ok(if found { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        None => {
            let input = BufReader::new(tokio::io::stdin());
            interactive(client, input, &mut out, args.format).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Look up a single postal code, returns whether an address was found
async fn lookup_once<C, W>(client: C, postal_code: String, out: &mut W, format: OutputFormat) -> color_eyre::Result<bool>
where
    C: AddressLookup + Clone + Send + Sync + 'static,
    W: Write,
{
    let mut form = LookupForm::new(client);
    form.set_input(postal_code);
    form.submit().await;
    show(&form, out, format)?;

    if let Some(message) = form.error() {
        info!("lookup for [{}] ended with [{}]", form.input(), message);
    }
    Ok(form.address().is_some())
}

/// Read postal codes from `input`, one per line
///
/// Lookups run concurrently and are applied in completion order.
/// At end of input, pending lookups are still waited for.
async fn interactive<C, R, W>(client: C, mut input: R, out: &mut W, format: OutputFormat) -> color_eyre::Result<()>
where
    C: AddressLookup + Clone + Send + Sync + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut form = LookupForm::new(client);
    let (tx, mut rx) = mpsc::unbounded_channel();
    // kept across iterations, `read_until` resumes into it when another branch wins
    let mut buf = Vec::new();
    let mut input_open = true;

    while input_open || form.is_loading() {
        tokio::select! {
            read = input.read_until(b'\n', &mut buf), if input_open => match read {
                Ok(0) => {
                    info!("end of input, waiting for pending lookups");
                    input_open = false;
                }
                Ok(_) => {
                    form.set_input(decode_line(&buf));
                    buf.clear();
                    match form.begin() {
                        Some(pending) => {
                            let tx = tx.clone();
                            tokio::spawn(async move {
                                let _ = tx.send(pending.await);
                            });
                        }
                        None => show(&form, out, format)?,
                    }
                }
                Err(e) => {
                    warn!("cannot read input, no more postal codes will be read: {:?}", e);
                    input_open = false;
                }
            },
            Some(result) = rx.recv() => {
                form.resolve(result);
                show(&form, out, format)?;
                if let Some(address) = form.address() {
                    info!("showing [{}], input reset", address.postal_code);
                }
            }
        }
    }
    Ok(())
}

/// Strip the line terminator; invalid UTF-8 is replaced instead of ending the session
fn decode_line(raw: &[u8]) -> String {
    let line = match raw.strip_suffix(b"\n") {
        Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
        None => raw,
    };
    match std::str::from_utf8(line) {
        Ok(line) => line.to_string(),
        Err(e) => {
            warn!("input line is not valid UTF-8: {}", e);
            String::from_utf8_lossy(line).into_owned()
        }
    }
}

fn show<C, W>(form: &LookupForm<C>, out: &mut W, format: OutputFormat) -> std::io::Result<()>
where
    C: AddressLookup + Clone + Send + Sync + 'static,
    W: Write,
{
    if let Some(rendered) = view::render(form.outcome(), format) {
        writeln!(out, "{}", rendered)?;
        out.flush()?;
    }
    Ok(())
}
