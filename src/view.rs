use std::fmt::Write;
use serde_json::json;
use crate::cli::OutputFormat;
use crate::form::LookupOutcome;
use crate::viacep::model::Address;

/// Render what the form shows; nothing while idle
pub fn render(outcome: &LookupOutcome, format: OutputFormat) -> Option<String> {
    match (outcome, format) {
        (LookupOutcome::Idle, _) => None,
        (LookupOutcome::Found(address), OutputFormat::Text) => Some(address_text(address)),
        (LookupOutcome::Failed(message), OutputFormat::Text) => Some(message.to_string()),
        (LookupOutcome::Found(address), OutputFormat::Json) => Some(json!({ "address": address }).to_string()),
        (LookupOutcome::Failed(message), OutputFormat::Json) => Some(json!({ "error": message }).to_string()),
    }
}

fn address_text(address: &Address) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: &str| {
        if !value.is_empty() {
            let _ = writeln!(out, "{:<14}{}", format!("{}:", label), value);
        }
    };
    line("Postal code", &address.postal_code);
    line("Street", &address.street);
    line("Complement", &address.complement);
    line("Neighborhood", &address.neighborhood);
    line("City", &address.city);
    line("State", &address.state);
    line("State name", address.state_name.as_deref().unwrap_or_default());
    line("Region", address.region.as_deref().unwrap_or_default());
    line("IBGE", &address.ibge);
    line("GIA", &address.gia);
    line("DDD", &address.ddd);
    line("SIAFI", &address.siafi);
    out.trim_end().to_string()
}
