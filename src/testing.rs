//! Test doubles shared by the unit tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use color_eyre::eyre::eyre;
use crate::viacep::model::Address;
use crate::viacep::AddressLookup;

pub fn address(postal_code: &str, street: &str) -> Address {
    Address {
        postal_code: postal_code.to_string(),
        street: street.to_string(),
        complement: String::new(),
        neighborhood: "Bela Vista".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        state_name: None,
        region: None,
        ibge: "3550308".to_string(),
        gia: String::new(),
        ddd: "11".to_string(),
        siafi: String::new(),
    }
}

/// Records every call; answers from a fixed table, unknown codes fail
#[derive(Clone, Default)]
pub struct StubLookup {
    calls: Arc<Mutex<Vec<String>>>,
    replies: Arc<HashMap<String, (Duration, Address)>>,
}

impl StubLookup {
    pub fn with(replies: Vec<(&str, Duration, Address)>) -> Self {
        Self {
            calls: Arc::default(),
            replies: Arc::new(
                replies.into_iter()
                    .map(|(code, delay, address)| (code.to_string(), (delay, address)))
                    .collect()
            ),
        }
    }

    /// only `01310930` is known, answered immediately
    pub fn paulista() -> Self {
        Self::with(vec![("01310930", Duration::ZERO, address("01310-930", "Avenida Paulista"))])
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl AddressLookup for StubLookup {
    async fn lookup(&self, postal_code: &str) -> color_eyre::Result<Address> {
        self.calls.lock().unwrap().push(postal_code.to_string());
        let (delay, address) = self.replies.get(postal_code)
            .cloned()
            .ok_or_else(|| eyre!("404 for {}", postal_code))?;
        tokio::time::sleep(delay).await;
        Ok(address)
    }
}
