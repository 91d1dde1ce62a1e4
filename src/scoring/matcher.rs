use super::config::ScoringConfig;
use crate::prospects::CompanyRecord;
use std::collections::BTreeMap;

/// Check a single configured term against lowercased free text.
///
/// Exact (case-insensitive substring) matches always count. With fuzzy
/// matching on, a multi-word term matches when at least 80% of its words
/// appear individually, and a single-word term matches when its first four
/// characters appear as a substring. The stem rule is deliberately crude;
/// it is kept as-is because changing it changes scoring outputs.
pub fn keyword_matches(term: &str, text: &str, fuzzy: bool) -> bool {
    let term_lower = term.to_lowercase();
    if text.contains(&term_lower) {
        return true;
    }

    if !fuzzy {
        return false;
    }

    let words: Vec<&str> = term_lower.split_whitespace().collect();
    match words.as_slice() {
        [] => false,
        [single] => {
            let stem: String = single.chars().take(4).collect();
            text.contains(&stem)
        }
        many => {
            let hits = many.iter().filter(|word| text.contains(**word)).count();
            hits as f64 >= many.len() as f64 * 0.8
        }
    }
}

/// Scan a record's free text against every configured keyword category.
///
/// Technology and compliance subgroups are scanned alongside the primary
/// categories under prefixed names, so their matches count toward the
/// bonus-multiplier volume. Only categories with at least one match appear
/// in the output; a term is never listed twice within a category. Pure
/// function of (record, config).
pub fn extract_all_matches(
    record: &CompanyRecord,
    config: &ScoringConfig,
) -> BTreeMap<String, Vec<String>> {
    let text = record.free_text();
    let fuzzy = config.algorithm_parameters.keyword_matching.fuzzy_matching;
    let mut matches = BTreeMap::new();

    for (name, category) in &config.keywords {
        let found = matching_terms(&category.terms, &text, fuzzy);
        if !found.is_empty() {
            matches.insert(name.clone(), found);
        }
    }

    for (name, category) in &config.technology_keywords {
        let found = matching_terms(&category.keywords, &text, fuzzy);
        if !found.is_empty() {
            matches.insert(format!("technology_keywords_{name}"), found);
        }
    }

    for (name, category) in &config.compliance_keywords {
        let found = matching_terms(&category.terms, &text, fuzzy);
        if !found.is_empty() {
            matches.insert(format!("compliance_keywords_{name}"), found);
        }
    }

    matches
}

/// Total matched-term count across all categories, the input to the
/// bonus-multiplier decision.
pub fn total_matches(matches: &BTreeMap<String, Vec<String>>) -> usize {
    matches.values().map(Vec::len).sum()
}

fn matching_terms(terms: &[String], text: &str, fuzzy: bool) -> Vec<String> {
    let mut found = Vec::new();
    for term in terms {
        if keyword_matches(term, text, fuzzy)
            && !found.iter().any(|f: &String| f.eq_ignore_ascii_case(term))
        {
            found.push(term.clone());
        }
    }
    found
}
