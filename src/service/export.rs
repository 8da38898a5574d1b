//! Downloadable export generation
//!
//! Both exports are generated fully in memory and streamed back as the
//! response body; the timestamped filename only exists in the
//! Content-Disposition header, so concurrent requests cannot collide on
//! disk.

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::models::RegistrationRecord;

/// Spreadsheet column headers, in row order.
const COLUMNS: [&str; 20] = [
    "CNPJ",
    "Razão Social",
    "Nome Fantasia",
    "UF",
    "Situação",
    "Regime Tributário",
    "Capital (R$)",
    "Data de Fundação",
    "Natureza Jurídica",
    "Porte",
    "Endereço",
    "Bairro",
    "Cidade",
    "CEP",
    "Telefone",
    "Email",
    "Atividade Principal",
    "CNAE",
    "Processos (Polo Passivo)",
    "Sanções",
];

/// Export failures surfaced to the handler layer
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nenhum dado válido encontrado para download")]
    NoRecords,
    #[error("Falha ao gerar planilha: {0}")]
    Spreadsheet(#[from] XlsxError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Attachment name for the spreadsheet export.
pub fn spreadsheet_filename(now: DateTime<Local>) -> String {
    format!("resultado_cnpjs_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

/// Attachment name for the raw JSON export.
pub fn json_filename(now: DateTime<Local>) -> String {
    format!("resultado_cnpjs_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// Build the spreadsheet export: one row per normalized record under
/// Portuguese headers. An empty record set is a client error, not an empty
/// file.
pub fn write_spreadsheet(records: &[RegistrationRecord]) -> Result<Vec<u8>, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoRecords);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &record.tax_id)?;
        worksheet.write_string(row, 1, &record.official_name)?;
        worksheet.write_string(row, 2, &record.trade_name)?;
        worksheet.write_string(row, 3, &record.headquarter_state)?;
        worksheet.write_string(row, 4, &record.tax_id_status)?;
        worksheet.write_string(row, 5, &record.tax_regime)?;
        worksheet.write_number(row, 6, record.capital)?;
        worksheet.write_string(row, 7, &record.founded_date)?;
        worksheet.write_string(row, 8, &record.legal_nature)?;
        worksheet.write_string(row, 9, &record.company_size)?;
        worksheet.write_string(row, 10, &record.address)?;
        worksheet.write_string(row, 11, &record.neighborhood)?;
        worksheet.write_string(row, 12, &record.city)?;
        worksheet.write_string(row, 13, &record.zip_code)?;
        worksheet.write_string(row, 14, &record.phone)?;
        worksheet.write_string(row, 15, &record.email)?;
        worksheet.write_string(row, 16, record.main_activity.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 17, record.cnae_code.as_deref().unwrap_or(""))?;
        if let Some(count) = record.passive_process_count {
            worksheet.write_number(row, 18, count as f64)?;
        }
        if let Some(count) = record.sanction_count {
            worksheet.write_number(row, 19, count as f64)?;
        }
    }

    let buffer = workbook.save_to_buffer()?;
    info!(
        "Generated spreadsheet export with {} rows ({} bytes)",
        records.len(),
        buffer.len()
    );
    Ok(buffer)
}

/// Build the raw JSON export: the verbatim aggregated result array,
/// pretty-printed with non-ASCII characters preserved literally.
pub fn write_json(results: &[Value]) -> Result<Vec<u8>, ExportError> {
    let buffer = serde_json::to_vec_pretty(results)?;
    info!(
        "Generated JSON export with {} entries ({} bytes)",
        results.len(),
        buffer.len()
    );
    Ok(buffer)
}
