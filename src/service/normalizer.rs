//! Flattening of the provider's dual-schema payloads
//!
//! The provider returns the registration block, and every field inside it,
//! under either PascalCase or camelCase keys depending on which dataset
//! variant produced the payload. The two spellings are not a pure
//! case-folding relationship for every field, so lookup works over an
//! explicit ordered key list per field rather than case-insensitive
//! matching. The first key *present* in the object wins, regardless of the
//! value it maps to.

use serde_json::{Map, Value};

use crate::models::{DocumentResult, RegistrationRecord, SimplifiedRecord};

/// Ordered-key lookup: return the value of the first listed key that is
/// present in the object. Presence, not truthiness, decides — an explicit
/// `null` or `""` under the primary key still shadows the fallback key.
pub fn pick<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| map.get(*key))
}

/// String rendering of a picked value: strings pass through, numbers are
/// formatted, everything else (including `null`) becomes empty.
fn pick_string(map: &Map<String, Value>, keys: &[&str]) -> String {
    match pick(map, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Parse the registered capital. Missing, null or unparseable values
/// default to 0.0; this path never errors.
pub fn parse_capital(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Date-only prefix of an ISO-like timestamp: the first 10 characters.
/// Malformed inputs truncate silently rather than failing.
pub fn truncate_date(raw: &str) -> String {
    raw.chars().take(10).collect()
}

/// Digit-filter a CNAE code and zero-left-pad it to 7 characters.
pub fn normalize_cnae(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{digits:0>7}")
}

/// Locate the registration-data block of a result entry. An absent key,
/// a non-object value or an empty object all count as "no block" and skip
/// the entry silently.
fn registration_block(entry: &Map<String, Value>) -> Option<&Map<String, Value>> {
    ["RegistrationData", "registrationData"]
        .iter()
        .filter_map(|key| entry.get(*key))
        .find_map(|value| value.as_object().filter(|block| !block.is_empty()))
}

/// The main-activity entries of the registration block, in list order.
fn main_activities(block: &Map<String, Value>) -> Vec<&Map<String, Value>> {
    pick(block, &["Activities", "activities"])
        .and_then(Value::as_array)
        .map(|activities| {
            activities
                .iter()
                .filter_map(Value::as_object)
                .filter(|activity| {
                    pick(activity, &["IsMain", "isMain"])
                        .and_then(Value::as_bool)
                        .unwrap_or(false)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Length of a list found under one of the given keys, `None` when the
/// dataset variant did not include it.
fn list_len(map: &Map<String, Value>, keys: &[&str]) -> Option<usize> {
    pick(map, keys).and_then(Value::as_array).map(Vec::len)
}

/// Sanction count lives under the KYC sub-object.
fn sanction_count(entry: &Map<String, Value>) -> Option<usize> {
    pick(entry, &["KYC", "kyc"])
        .and_then(Value::as_object)
        .and_then(|kyc| list_len(kyc, &["Sanctions", "sanctions"]))
}

/// Result entries of one aggregated payload. Failure descriptors and
/// payloads without a `Result` list contribute nothing.
fn result_entries(payload: &Value) -> impl Iterator<Item = &Map<String, Value>> {
    payload
        .get("Result")
        .and_then(Value::as_array)
        .map(|entries| entries.iter())
        .unwrap_or_default()
        .filter_map(Value::as_object)
}

fn to_registration_record(entry: &Map<String, Value>) -> Option<RegistrationRecord> {
    let block = registration_block(entry)?;

    let mains = main_activities(block);
    let main_activity = mains
        .first()
        .map(|activity| pick_string(activity, &["Activity", "activity"]));
    let cnae_code = mains.first().and_then(|activity| {
        let raw = pick_string(activity, &["Code", "code"]);
        (!raw.is_empty()).then(|| normalize_cnae(&raw))
    });

    Some(RegistrationRecord {
        tax_id: pick_string(block, &["TaxIdNumber", "taxIdNumber"]),
        official_name: pick_string(block, &["OfficialName", "officialName"]),
        trade_name: pick_string(block, &["TradeName", "tradeName"]),
        headquarter_state: pick_string(block, &["HeadquarterState", "headquarterState"]),
        tax_id_status: pick_string(block, &["TaxIdStatus", "taxIdStatus"]),
        tax_regime: pick_string(block, &["TaxRegime", "taxRegime"]),
        capital: parse_capital(pick(block, &["CapitalRS", "capitalRS"])),
        founded_date: truncate_date(&pick_string(block, &["FoundedDate", "foundedDate"])),
        legal_nature: pick_string(block, &["LegalNature", "legalNature"]),
        company_size: pick_string(block, &["CompanySize", "companySize"]),
        address: pick_string(block, &["Address", "address"]),
        neighborhood: pick_string(block, &["Neighborhood", "neighborhood"]),
        city: pick_string(block, &["City", "city"]),
        zip_code: pick_string(block, &["ZipCode", "zipCode"]),
        phone: pick_string(block, &["Phone", "phone"]),
        email: pick_string(block, &["Email", "email"]),
        main_activity,
        cnae_code,
        passive_process_count: list_len(entry, &["Processes", "processes"]),
        sanction_count: sanction_count(entry),
    })
}

/// Flatten an aggregated result array into registration records.
///
/// Entries without a registration block are dropped silently; a payload may
/// therefore contribute zero records without being an error.
pub fn flatten_results(results: &[Value]) -> Vec<RegistrationRecord> {
    results
        .iter()
        .flat_map(result_entries)
        .filter_map(to_registration_record)
        .collect()
}

/// Build the size-bounded projection used as LLM input. This re-derives the
/// same traversal as [`flatten_results`] but keeps only the fields the risk
/// prompt consumes and reduces lawsuit/sanction lists to counts.
pub fn simplify_results(results: &[Value]) -> Vec<SimplifiedRecord> {
    results
        .iter()
        .flat_map(result_entries)
        .filter_map(|entry| {
            let block = registration_block(entry)?;
            Some(SimplifiedRecord {
                tax_id: pick_string(block, &["TaxIdNumber", "taxIdNumber"]),
                official_name: pick_string(block, &["OfficialName", "officialName"]),
                trade_name: pick_string(block, &["TradeName", "tradeName"]),
                headquarter_state: pick_string(block, &["HeadquarterState", "headquarterState"]),
                tax_id_status: pick_string(block, &["TaxIdStatus", "taxIdStatus"]),
                tax_regime: pick_string(block, &["TaxRegime", "taxRegime"]),
                capital: parse_capital(pick(block, &["CapitalRS", "capitalRS"])),
                founded_date: pick_string(block, &["FoundedDate", "foundedDate"]),
                main_activities: main_activities(block)
                    .iter()
                    .map(|activity| pick_string(activity, &["Activity", "activity"]))
                    .collect(),
                process_count: list_len(entry, &["Processes", "processes"]).unwrap_or(0),
                sanction_count: sanction_count(entry).unwrap_or(0),
            })
        })
        .collect()
}

/// Convenience for callers holding [`DocumentResult`]s instead of raw values.
pub fn flatten_document_results(results: &[DocumentResult]) -> Vec<RegistrationRecord> {
    let values: Vec<Value> = results
        .iter()
        .filter_map(|result| match result {
            DocumentResult::Success(payload) => Some(payload.clone()),
            DocumentResult::Failure { .. } => None,
        })
        .collect();
    flatten_results(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_with_block(block: Value) -> Value {
        json!({"Result": [{"RegistrationData": block}]})
    }

    #[test]
    fn pascal_case_key_wins_over_camel_case() {
        let results = [payload_with_block(json!({
            "OfficialName": "ACME LTDA",
            "officialName": "shadowed"
        }))];
        let records = flatten_results(&results);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].official_name, "ACME LTDA");
    }

    #[test]
    fn camel_case_key_is_used_when_pascal_absent() {
        let results = [payload_with_block(json!({"officialName": "ACME LTDA"}))];
        let records = flatten_results(&results);
        assert_eq!(records[0].official_name, "ACME LTDA");
    }

    #[test]
    fn present_empty_primary_key_shadows_fallback() {
        let results = [payload_with_block(json!({
            "OfficialName": "",
            "officialName": "should not surface"
        }))];
        let records = flatten_results(&results);
        assert_eq!(records[0].official_name, "");
    }

    #[test]
    fn null_primary_key_counts_as_present() {
        let results = [payload_with_block(json!({
            "TradeName": null,
            "tradeName": "should not surface"
        }))];
        let records = flatten_results(&results);
        assert_eq!(records[0].trade_name, "");
    }

    #[test]
    fn entry_without_registration_block_is_dropped() {
        let results = [json!({"Result": [{"MatchKeys": "doc{1}"}]})];
        assert!(flatten_results(&results).is_empty());
    }

    #[test]
    fn empty_registration_block_is_dropped() {
        let results = [payload_with_block(json!({}))];
        assert!(flatten_results(&results).is_empty());
    }

    #[test]
    fn payload_without_result_list_is_dropped() {
        let results = [json!({"Status": {"empresas": [{"Code": 0}]}})];
        assert!(flatten_results(&results).is_empty());
    }

    #[test]
    fn camel_case_registration_block_is_found() {
        let results = [json!({
            "Result": [{"registrationData": {"OfficialName": "ACME LTDA"}}]
        })];
        let records = flatten_results(&results);
        assert_eq!(records[0].official_name, "ACME LTDA");
    }

    #[test]
    fn capital_parses_numbers_and_numeric_strings() {
        assert_eq!(parse_capital(Some(&json!(15000.50))), 15000.50);
        assert_eq!(parse_capital(Some(&json!("15000.50"))), 15000.50);
        assert_eq!(parse_capital(Some(&json!("not a number"))), 0.0);
        assert_eq!(parse_capital(Some(&json!(null))), 0.0);
        assert_eq!(parse_capital(None), 0.0);
    }

    #[test]
    fn founded_date_keeps_date_prefix() {
        assert_eq!(truncate_date("2010-04-12T00:00:00Z"), "2010-04-12");
        assert_eq!(truncate_date("2010-04-12"), "2010-04-12");
        assert_eq!(truncate_date("short"), "short");
        assert_eq!(truncate_date(""), "");
    }

    #[test]
    fn cnae_normalization() {
        assert_eq!(normalize_cnae("6201500"), "6201500");
        assert_eq!(normalize_cnae("62.01-5/00"), "6201500");
        assert_eq!(normalize_cnae("123"), "0000123");
    }

    #[test]
    fn main_activity_and_counts_are_extracted() {
        let results = [json!({
            "Result": [{
                "RegistrationData": {
                    "OfficialName": "ACME LTDA",
                    "Activities": [
                        {"Activity": "secondary", "Code": "1234567", "IsMain": false},
                        {"Activity": "Desenvolvimento de software", "Code": "62.01-5/00", "IsMain": true}
                    ]
                },
                "Processes": [{}, {}, {}],
                "KYC": {"Sanctions": [{}]}
            }]
        })];
        let records = flatten_results(&results);
        assert_eq!(
            records[0].main_activity.as_deref(),
            Some("Desenvolvimento de software")
        );
        assert_eq!(records[0].cnae_code.as_deref(), Some("6201500"));
        assert_eq!(records[0].passive_process_count, Some(3));
        assert_eq!(records[0].sanction_count, Some(1));
    }

    #[test]
    fn optional_fields_stay_absent_without_their_datasets() {
        let results = [payload_with_block(json!({"OfficialName": "ACME"}))];
        let records = flatten_results(&results);
        assert_eq!(records[0].main_activity, None);
        assert_eq!(records[0].cnae_code, None);
        assert_eq!(records[0].passive_process_count, None);
        assert_eq!(records[0].sanction_count, None);
    }

    #[test]
    fn simplified_records_carry_counts_and_main_activities() {
        let results = [json!({
            "Result": [{
                "RegistrationData": {
                    "TaxIdNumber": "12345678000195",
                    "OfficialName": "ACME LTDA",
                    "CapitalRS": "10000",
                    "FoundedDate": "2010-04-12T00:00:00Z",
                    "Activities": [
                        {"Activity": "Comércio varejista", "IsMain": true}
                    ]
                },
                "Processes": [{}],
                "KYC": {"Sanctions": []}
            }]
        })];
        let simplified = simplify_results(&results);
        assert_eq!(simplified.len(), 1);
        assert_eq!(simplified[0].capital, 10000.0);
        // LLM input keeps the raw timestamp, unlike the spreadsheet view.
        assert_eq!(simplified[0].founded_date, "2010-04-12T00:00:00Z");
        assert_eq!(simplified[0].main_activities, vec!["Comércio varejista"]);
        assert_eq!(simplified[0].process_count, 1);
        assert_eq!(simplified[0].sanction_count, 0);
    }

    #[test]
    fn failure_entries_contribute_no_records() {
        let results = vec![
            DocumentResult::failure("123", "Erro de conexão"),
            DocumentResult::Success(payload_with_block(json!({"OfficialName": "ACME"}))),
        ];
        let records = flatten_document_results(&results);
        assert_eq!(records.len(), 1);
    }
}
