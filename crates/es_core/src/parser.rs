//! Turns the heading-delimited text a model replies with into a [`SummaryRecord`].
//!
//! The reply is expected to look like
//!
//! ```text
//! - revenue_summary: $10B, up 12% year over year
//! - net_income_summary: $2B
//! - ceo_quote: "Great quarter"
//! - strategic_focus: AI, Cloud, Retail
//! - source_url: http://example.com
//! ```
//!
//! but nothing enforces that, so the parser is lenient: unknown lines are
//! folded into the field that is currently open and malformed input just
//! yields fewer fields.

use crate::types::SummaryRecord;

/// Phrases that mean the model did not find a report. This is a best-effort
/// heuristic that depends on the model's wording.
const FAILURE_PHRASES: [&str; 2] = ["could not find", "unable to"];

const BULLETS: [char; 3] = ['-', '*', '•'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    RevenueSummary,
    NetIncomeSummary,
    CeoQuote,
    StrategicFocus,
    SourceUrl,
}

impl Label {
    pub const ALL: [Label; 5] = [
        Label::RevenueSummary,
        Label::NetIncomeSummary,
        Label::CeoQuote,
        Label::StrategicFocus,
        Label::SourceUrl,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Label::RevenueSummary => "revenue_summary",
            Label::NetIncomeSummary => "net_income_summary",
            Label::CeoQuote => "ceo_quote",
            Label::StrategicFocus => "strategic_focus",
            Label::SourceUrl => "source_url",
        }
    }

    /// Match a trimmed line that starts with `[bullet] <label>:` and return the
    /// label together with the text after the colon.
    fn match_line(line: &str) -> Option<(Label, &str)> {
        let body = line.strip_prefix(BULLETS).map(str::trim_start).unwrap_or(line);

        Label::ALL.into_iter().find_map(|label| {
            let key = label.key();
            let head = body.get(..key.len())?;
            if !head.eq_ignore_ascii_case(key) {
                return None;
            }
            body[key.len()..].strip_prefix(':').map(|rest| (label, rest.trim()))
        })
    }
}

/// Field being accumulated while scanning.
struct OpenField {
    label: Label,
    value: String,
}

/// Parse a raw model reply. Never fails; unexpected text gives a partially
/// filled or empty record.
pub fn parse(raw: &str) -> SummaryRecord {
    let mut record = SummaryRecord::default();
    let mut open: Option<OpenField> = None;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match Label::match_line(line) {
            Some((label, rest)) => {
                if let Some(field) = open.take() {
                    commit(&mut record, field);
                }
                open = Some(OpenField {
                    label,
                    value: rest.to_string(),
                });
            }
            None => match open.as_mut() {
                Some(field) => {
                    field.value.push(' ');
                    field.value.push_str(line);
                }
                None => tracing::trace!("Dropping line outside any field: {}", line),
            },
        }
    }

    if let Some(field) = open {
        commit(&mut record, field);
    }

    if signals_failure(raw) {
        record.error = Some(raw.to_string());
    }

    record
}

/// Store a finished field. Empty values, and a strategic focus with no items,
/// are dropped; a repeated label overwrites the earlier value.
fn commit(record: &mut SummaryRecord, field: OpenField) {
    let value = field.value.trim();
    if value.is_empty() {
        return;
    }

    match field.label {
        Label::RevenueSummary => record.revenue_summary = Some(value.to_string()),
        Label::NetIncomeSummary => record.net_income_summary = Some(value.to_string()),
        Label::CeoQuote => record.ceo_quote = Some(value.to_string()),
        Label::StrategicFocus => {
            let items = split_items(value);
            if !items.is_empty() {
                record.strategic_focus = Some(items);
            }
        }
        Label::SourceUrl => record.source_url = Some(value.to_string()),
    }
}

fn split_items(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn signals_failure(raw: &str) -> bool {
    let lowered = raw.to_lowercase();
    FAILURE_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPLY: &str = "- revenue_summary: $10B\n- net_income_summary: $2B\n- ceo_quote: Great quarter\n- strategic_focus: AI, Cloud, Retail\n- source_url: http://example.com";

    #[test]
    fn test_no_labels_yields_empty_record() {
        let record = parse("hello world");
        assert!(record.is_empty());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }

    #[test]
    fn test_all_five_labels() {
        let record = parse(FULL_REPLY);
        assert_eq!(
            record,
            SummaryRecord {
                revenue_summary: Some("$10B".to_string()),
                net_income_summary: Some("$2B".to_string()),
                ceo_quote: Some("Great quarter".to_string()),
                strategic_focus: Some(vec![
                    "AI".to_string(),
                    "Cloud".to_string(),
                    "Retail".to_string()
                ]),
                source_url: Some("http://example.com".to_string()),
                error: None,
            }
        );
    }

    #[test]
    fn test_labels_without_bullets_and_mixed_case() {
        let record = parse("Revenue_Summary: $5B\nCEO_QUOTE:   Steady   \n* source_url: https://ir.example.com/q3");
        assert_eq!(record.revenue_summary.as_deref(), Some("$5B"));
        assert_eq!(record.ceo_quote.as_deref(), Some("Steady"));
        assert_eq!(record.source_url.as_deref(), Some("https://ir.example.com/q3"));
    }

    #[test]
    fn test_url_keeps_colons_after_label() {
        let record = parse("source_url: https://example.com:8443/report");
        assert_eq!(record.source_url.as_deref(), Some("https://example.com:8443/report"));
    }

    #[test]
    fn test_multi_line_value_is_space_joined() {
        let raw = "- ceo_quote: \"We delivered\n\n   record growth\nacross segments.\"\n- source_url: http://example.com";
        let record = parse(raw);
        assert_eq!(
            record.ceo_quote.as_deref(),
            Some("\"We delivered record growth across segments.\"")
        );
        assert_eq!(record.source_url.as_deref(), Some("http://example.com"));
    }

    #[test]
    fn test_value_may_start_on_next_line() {
        let record = parse("- revenue_summary:\n$12.3B, up 8%");
        assert_eq!(record.revenue_summary.as_deref(), Some("$12.3B, up 8%"));
    }

    #[test]
    fn test_label_without_value_is_dropped() {
        let record = parse("- revenue_summary:\n- net_income_summary: $1B");
        assert_eq!(record.revenue_summary, None);
        assert_eq!(record.net_income_summary.as_deref(), Some("$1B"));
    }

    #[test]
    fn test_lines_before_first_label_are_ignored() {
        let record = parse("Here is the summary you asked for.\n- net_income_summary: $2B");
        assert_eq!(record.net_income_summary.as_deref(), Some("$2B"));
        assert_eq!(record.revenue_summary, None);
    }

    #[test]
    fn test_unknown_labels_fold_into_open_field() {
        let record = parse("- revenue_summary: $10B\n- guidance: raised");
        assert_eq!(record.revenue_summary.as_deref(), Some("$10B - guidance: raised"));
    }

    #[test]
    fn test_label_mid_line_is_not_a_label() {
        let record = parse("The revenue_summary: $10B");
        assert!(record.is_empty());
    }

    #[test]
    fn test_label_needs_colon() {
        assert!(parse("revenue_summary $10B").is_empty());
        assert!(parse("revenue_summary_total: $10B").is_empty());
    }

    #[test]
    fn test_duplicate_label_last_write_wins() {
        let record = parse("revenue_summary: first\nrevenue_summary: second");
        assert_eq!(record.revenue_summary.as_deref(), Some("second"));
    }

    #[test]
    fn test_strategic_focus_drops_empty_items() {
        let record = parse("strategic_focus: AI,, Cloud ,\n Retail");
        assert_eq!(
            record.strategic_focus,
            Some(vec!["AI".to_string(), "Cloud".to_string(), "Retail".to_string()])
        );
    }

    #[test]
    fn test_strategic_focus_of_only_commas_is_absent() {
        let record = parse("strategic_focus: , ,\nsource_url: http://example.com");
        assert_eq!(record.strategic_focus, None);
        assert_eq!(record.source_url.as_deref(), Some("http://example.com"));
        assert!(!serde_json::to_string(&record).unwrap().contains("strategic_focus"));
    }

    #[test]
    fn test_single_strategic_focus_item_is_still_a_list() {
        let record = parse("strategic_focus: Cost discipline");
        assert_eq!(record.strategic_focus, Some(vec!["Cost discipline".to_string()]));
    }

    #[test]
    fn test_not_found_reply_sets_error() {
        let raw = "Error: Could not find a relevant financial document.";
        let record = parse(raw);
        assert_eq!(record.error.as_deref(), Some(raw));
        assert!(record.revenue_summary.is_none());
    }

    #[test]
    fn test_error_does_not_suppress_fields() {
        let raw = format!("{}\nNote: I was unable to locate the CEO quote.", FULL_REPLY);
        let record = parse(&raw);
        assert_eq!(record.error.as_deref(), Some(raw.as_str()));
        assert_eq!(record.revenue_summary.as_deref(), Some("$10B"));
        assert_eq!(
            record.source_url.as_deref(),
            Some("http://example.com Note: I was unable to locate the CEO quote.")
        );
    }

    #[test]
    fn test_failure_phrase_is_case_insensitive() {
        let record = parse("UNABLE TO access filings");
        assert!(record.has_error());
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse(FULL_REPLY), parse(FULL_REPLY));
    }

    #[test]
    fn test_label_table_keys() {
        let keys: Vec<_> = Label::ALL.iter().map(|l| l.key()).collect();
        assert_eq!(
            keys,
            ["revenue_summary", "net_income_summary", "ceo_quote", "strategic_focus", "source_url"]
        );
    }
}
