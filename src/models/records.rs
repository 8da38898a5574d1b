//! Flattened views of the provider's nested registration payloads

use serde::{Deserialize, Serialize};

/// Normalized registration record, one per provider result entry that
/// carries a registration-data block. This is the row shape of the
/// spreadsheet export.
///
/// The last four fields only materialize when the provider dataset variant
/// included the corresponding sub-dataset (activities, lawsuits, KYC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub tax_id: String,
    pub official_name: String,
    pub trade_name: String,
    pub headquarter_state: String,
    pub tax_id_status: String,
    pub tax_regime: String,
    /// Registered capital in BRL; 0.0 when absent or unparseable.
    pub capital: f64,
    /// Date-only prefix (first 10 chars) of the provider's founded timestamp.
    pub founded_date: String,
    pub legal_nature: String,
    pub company_size: String,
    pub address: String,
    pub neighborhood: String,
    pub city: String,
    pub zip_code: String,
    pub phone: String,
    pub email: String,
    pub main_activity: Option<String>,
    /// CNAE code, digit-filtered and zero-left-padded to 7 characters.
    pub cnae_code: Option<String>,
    pub passive_process_count: Option<usize>,
    pub sanction_count: Option<usize>,
}

/// Size-bounded projection sent as LLM input, never persisted.
///
/// Keys are serialized in Portuguese because the analysis prompt is written
/// against this vocabulary.
#[derive(Debug, Clone, Serialize)]
pub struct SimplifiedRecord {
    #[serde(rename = "CNPJ")]
    pub tax_id: String,
    #[serde(rename = "Razão Social")]
    pub official_name: String,
    #[serde(rename = "Nome Fantasia")]
    pub trade_name: String,
    #[serde(rename = "UF")]
    pub headquarter_state: String,
    #[serde(rename = "Situação")]
    pub tax_id_status: String,
    #[serde(rename = "Regime Tributário")]
    pub tax_regime: String,
    #[serde(rename = "Capital")]
    pub capital: f64,
    #[serde(rename = "Data de Fundação")]
    pub founded_date: String,
    #[serde(rename = "Atividades")]
    pub main_activities: Vec<String>,
    #[serde(rename = "Processos")]
    pub process_count: usize,
    #[serde(rename = "Sanções")]
    pub sanction_count: usize,
}
