use futures::future::BoxFuture;
use futures::FutureExt;
use log::{error, info, warn};
use crate::viacep::model::Address;
use crate::viacep::AddressLookup;

pub const POSTAL_CODE_LEN: usize = 8;

pub const INVALID_POSTAL_CODE: &str = "Please enter a valid 8-digit postal code.";
pub const LOOKUP_FAILED: &str = "Error looking up the postal code. Check the value entered and try again.";

/// A lookup that has been validated and started but not yet applied to the form
pub type PendingLookup = BoxFuture<'static, color_eyre::Result<Address>>;

/// What the form currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LookupOutcome {
    #[default]
    Idle,
    Found(Address),
    Failed(&'static str),
}

/// Postal code lookup form: the input field plus the last outcome
///
/// Lookups may overlap when driven through [`LookupForm::begin`] and
/// [`LookupForm::resolve`]; the last one resolved decides the outcome.
pub struct LookupForm<C> {
    client: C,
    input: String,
    outcome: LookupOutcome,
    in_flight: usize,
}

impl<C> LookupForm<C>
where
    C: AddressLookup + Clone + Send + Sync + 'static,
{
    pub fn new(client: C) -> Self {
        Self {
            client,
            input: String::new(),
            outcome: LookupOutcome::Idle,
            in_flight: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn outcome(&self) -> &LookupOutcome {
        &self.outcome
    }

    pub fn address(&self) -> Option<&Address> {
        match &self.outcome {
            LookupOutcome::Found(address) => Some(address),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self.outcome {
            LookupOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Validate the input and start a lookup for it
    ///
    /// Returns `None` when the input is rejected, in which case the form
    /// already shows the validation error and no request is made.
    pub fn begin(&mut self) -> Option<PendingLookup> {
        if matches!(self.outcome, LookupOutcome::Failed(_)) {
            self.outcome = LookupOutcome::Idle;
        }

        // counted in UTF-16 code units, anything else about the input is left to the service
        if self.input.encode_utf16().count() != POSTAL_CODE_LEN {
            warn!("rejected postal code [{}]: not {} characters", self.input, POSTAL_CODE_LEN);
            self.outcome = LookupOutcome::Failed(INVALID_POSTAL_CODE);
            return None;
        }

        info!("looking up postal code [{}]", self.input);
        self.in_flight += 1;
        let client = self.client.clone();
        let postal_code = self.input.clone();
        Some(
            async move { client.lookup(&postal_code).await }.boxed()
        )
    }

    /// Apply the result of a lookup started by [`LookupForm::begin`]
    pub fn resolve(&mut self, result: color_eyre::Result<Address>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(address) => {
                info!("found [{}] for postal code [{}]", address.street, address.postal_code);
                self.outcome = LookupOutcome::Found(address);
                self.input.clear();
            }
            Err(e) => {
                error!("cannot look up postal code: {:?}", e);
                self.outcome = LookupOutcome::Failed(LOOKUP_FAILED);
            }
        }
    }

    /// Submit the current input and wait for the outcome
    pub async fn submit(&mut self) {
        if let Some(pending) = self.begin() {
            let result = pending.await;
            self.resolve(result);
        }
    }
}
