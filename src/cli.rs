use clap::{Parser, ValueEnum};
use crate::viacep::BASE_URL;

/// Look up Brazilian addresses by postal code (CEP) using ViaCEP
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Postal code to look up. Without it, postal codes are read from stdin, one per line
    pub postal_code: Option<String>,

    /// Base endpoint of the lookup service
    #[arg(long, env = "VIACEP_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,

    /// How results are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
