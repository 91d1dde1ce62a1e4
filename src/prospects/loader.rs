use super::types::CompanyRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load company records from a prospect CSV export.
///
/// Numeric columns are cleaned leniently ("$1,234,567" parses as revenue,
/// "1,200" as an employee count) because CRM exports are inconsistent about
/// formatting. Rows with an empty name are kept as-is; the scoring engine
/// rejects them per record so a batch can report them as failures instead
/// of the whole file erroring out.
pub fn load_companies(path: &Path) -> Result<Vec<CompanyRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open prospect CSV at {}", path.display()))?;
    parse_companies(file).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_companies<R: Read>(reader: R) -> Result<Vec<CompanyRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<CompanyRow>() {
        let row = row.context("Malformed CSV row")?;
        records.push(row.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CompanyRow {
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    domain: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    website: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    industry: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    country: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    employee_count: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    annual_revenue: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    research_summary: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    contract_history: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    technology_keywords_found: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cage_code: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    duns_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    defense_contract_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    technology_relevance_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    compliance_indicators_score: Option<String>,
}

impl CompanyRow {
    fn into_record(self) -> CompanyRecord {
        CompanyRecord {
            name: self.name.trim().to_string(),
            domain: self.domain,
            website: self.website,
            industry: self.industry,
            country: self.country,
            state: self.state,
            city: self.city,
            employee_count: self.employee_count.as_deref().and_then(parse_count),
            annual_revenue: self.annual_revenue.as_deref().and_then(parse_amount),
            description: self.description,
            research_summary: self.research_summary,
            contract_history: self.contract_history,
            technology_keywords_found: self.technology_keywords_found,
            cage_code: self.cage_code,
            duns_number: self.duns_number,
            defense_contract_score: self.defense_contract_score.as_deref().and_then(parse_amount),
            technology_relevance_score: self
                .technology_relevance_score
                .as_deref()
                .and_then(parse_amount),
            compliance_indicators_score: self
                .compliance_indicators_score
                .as_deref()
                .and_then(parse_amount),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Parse "1,200" or "1200" into an integer count.
fn parse_count(value: &str) -> Option<i64> {
    let cleaned: String = value.chars().filter(|c| c.is_ascii_digit() || *c == '-').collect();
    cleaned.parse().ok()
}

/// Parse "$1,234,567.89" or "1234567" into a number.
fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().ok()
}
