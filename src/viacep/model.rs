use serde::{Deserialize, Serialize};

/// Address returned by ViaCEP for a postal code
///
/// The service answers with Portuguese keys, output uses the field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// postal code echoed back by the service, i.e. `01310-930`
    #[serde(rename(deserialize = "cep"))]
    pub postal_code: String,
    #[serde(rename(deserialize = "logradouro"))]
    pub street: String,
    /// number range, side of the street, etc.
    #[serde(rename(deserialize = "complemento"), default)]
    pub complement: String,
    #[serde(rename(deserialize = "bairro"))]
    pub neighborhood: String,
    #[serde(rename(deserialize = "localidade"))]
    pub city: String,
    /// two-letter state code
    #[serde(rename(deserialize = "uf"))]
    pub state: String,
    #[serde(rename(deserialize = "estado"), default, skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    #[serde(rename(deserialize = "regiao"), default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub ibge: String,
    #[serde(default)]
    pub gia: String,
    /// telephone area code
    #[serde(default)]
    pub ddd: String,
    #[serde(default)]
    pub siafi: String,
}
