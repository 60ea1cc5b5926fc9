//! CSV reporter
//!
//! Header: `model,score,<key names in registry order>`. Each row pairs a
//! model with its score and the counts from
//! [`Assessments::csv_row`](crate::metrics::Assessments::csv_row).

use super::Leaderboard;
use crate::metrics::walk_by_score;
use anyhow::Result;
use std::fmt::Write;

/// Render the leaderboard as CSV
pub fn render(leaderboard: &Leaderboard<'_>) -> Result<String> {
    let mut out = String::new();

    let mut header = vec!["model".to_string(), "score".to_string()];
    header.extend(leaderboard.registry.csv_header());
    write_record(&mut out, &header)?;

    walk_by_score(leaderboard.models, |model, assessments, score| {
        let mut record = vec![model.to_string(), score.to_string()];
        record.extend(assessments.csv_row(leaderboard.registry));
        write_record(&mut out, &record)
    })?;

    Ok(out)
}

fn write_record(out: &mut String, fields: &[String]) -> std::fmt::Result {
    let fields: Vec<String> = fields.iter().map(|field| escape_field(field)).collect();
    writeln!(out, "{}", fields.join(","))
}

/// Quote a field if it contains a delimiter, a quote or a line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Assessments, KeyRegistry};
    use crate::reporters::tests::test_models;
    use std::collections::BTreeMap;

    #[test]
    fn test_csv_render() {
        let (registry, models) = test_models();
        let out = render(&Leaderboard::new(&registry, &models)).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            lines,
            vec![
                "model,score,coverage-statement,files-executed,response-no-error,response-no-excess,response-not-empty,response-with-code",
                "openrouter/beta,1,0,0,1,0,0,0",
                "openrouter/gamma,1,0,0,0,0,1,0",
                "openrouter/alpha,11,10,1,0,0,0,0",
            ]
        );
    }

    #[test]
    fn test_csv_rows_match_header_width() {
        let (registry, models) = test_models();
        let out = render(&Leaderboard::new(&registry, &models)).unwrap();
        let width = registry.len() + 2;
        assert!(out.lines().all(|line| line.split(',').count() == width));
    }

    #[test]
    fn test_csv_quotes_model_names() {
        let registry = KeyRegistry::with_defaults();
        let models = BTreeMap::from([("vendor, \"large\"".to_string(), Assessments::new())]);
        let out = render(&Leaderboard::new(&registry, &models)).unwrap();
        assert_eq!(
            out.lines().nth(1),
            Some("\"vendor, \"\"large\"\"\",0,0,0,0,0,0,0")
        );
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
    }
}
