use std::future::Future;
use color_eyre::eyre::WrapErr;
use log::debug;
use reqwest::Client;
use crate::viacep::model::Address;

pub mod model;

pub const BASE_URL: &str = "https://viacep.com.br/ws";

/// Something that can resolve a postal code into an address
pub trait AddressLookup {
    fn lookup(&self, postal_code: &str) -> impl Future<Output = color_eyre::Result<Address>> + Send;
}

/// HTTP client for the ViaCEP web service
///
/// Stateless, every lookup is a fresh round trip.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: Client,
    base_url: String,
}

impl ViaCepClient {
    /// * `base_url` - endpoint the postal code path is appended to, i.e. `https://viacep.com.br/ws`
    pub fn with_base_url(base_url: impl Into<String>) -> color_eyre::Result<Self> {
        let base_url = base_url.into();
        Ok(
            Self {
                client: Client::builder()
                    .build()
                    .wrap_err("cannot build HTTP client")?,
                base_url: base_url.trim_end_matches('/').to_string(),
            }
        )
    }

    fn lookup_url(&self, postal_code: &str) -> String {
        format!("{}/{}/json/", self.base_url, postal_code)
    }
}

impl AddressLookup for ViaCepClient {
    #[tracing::instrument(skip(self))]
    async fn lookup(&self, postal_code: &str) -> color_eyre::Result<Address> {
        let url = self.lookup_url(postal_code);
        debug!("requesting [{}]", url);
        let address = self.client
            .get(&url)
            .send()
            .await
            .wrap_err_with(|| format!("request to [{}] failed", url))?
            .error_for_status()?
            .json::<Address>()
            .await
            .wrap_err("unexpected response body")?;
        Ok(address)
    }
}
