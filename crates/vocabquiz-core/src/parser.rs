//! Spreadsheet feed parser.
//!
//! Turns a Google Sheets `gviz` JSON payload into validated corpus entries,
//! and checks a corpus for authoring mistakes.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::error::QuizError;
use crate::model::RawEntry;

/// Wrapper the gviz endpoint puts in front of the JSON body.
pub const GVIZ_PREFIX: &str = "/*O_o*/\ngoogle.visualization.Query.setResponse(";
/// Wrapper the gviz endpoint puts after the JSON body.
pub const GVIZ_SUFFIX: &str = ");";

const COL_WORD: usize = 0;
const COL_TYPE: usize = 2;
const COL_ANSWER: usize = 3;
const COL_EXAMPLE: usize = 4;
const COL_DISTRACTORS: [usize; 3] = [5, 6, 7];
const COL_TOPIC: usize = 8;

#[derive(Debug, Deserialize)]
struct GvizResponse {
    table: GvizTable,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Option<Value>,
    /// Display text the sheet formatted the value as, e.g. `"7"` for `7.0`.
    #[serde(default)]
    f: Option<String>,
}

impl GvizCell {
    fn text(&self) -> String {
        match (&self.v, &self.f) {
            (None | Some(Value::Null), _) => String::new(),
            (Some(Value::String(s)), _) => s.clone(),
            (Some(_), Some(formatted)) if !formatted.is_empty() => formatted.clone(),
            (Some(Value::Number(n)), _) => number_text(n),
            (Some(other), _) => other.to_string(),
        }
    }
}

/// Sheets sends every number as a float; whole values lose the `.0`.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() < 1e15 => format!("{}", x as i64),
        _ => n.to_string(),
    }
}

impl GvizRow {
    fn cell(&self, col: usize) -> String {
        self.c
            .get(col)
            .and_then(|c| c.as_ref())
            .map(GvizCell::text)
            .unwrap_or_default()
    }
}

/// The result of parsing a feed payload.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    /// Rows that passed validation, in feed order.
    pub entries: Vec<RawEntry>,
    /// Rows that were dropped (header, blank, or incomplete rows).
    pub skipped_rows: usize,
}

/// Strip the gviz wrapper, returning the bare JSON text.
///
/// Bare JSON (as saved from a previous fetch) is passed through unchanged.
fn unwrap_payload(text: &str) -> Result<&str, QuizError> {
    if let Some(body) = text.strip_prefix(GVIZ_PREFIX) {
        return body
            .trim_end()
            .strip_suffix(GVIZ_SUFFIX)
            .ok_or_else(|| QuizError::SourceFormat("missing closing `);` wrapper".into()));
    }

    let trimmed = text.trim_start();
    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }

    Err(QuizError::SourceFormat(
        "payload is neither gviz-wrapped nor bare JSON".into(),
    ))
}

/// Parse a feed payload into validated entries.
pub fn parse_feed(text: &str) -> Result<ParsedFeed, QuizError> {
    let json = unwrap_payload(text)?;
    let response: GvizResponse =
        serde_json::from_str(json).map_err(|e| QuizError::SourceFormat(e.to_string()))?;

    let mut parsed = ParsedFeed::default();
    for (i, row) in response.table.rows.iter().enumerate() {
        let distractors = COL_DISTRACTORS.iter().map(|&col| row.cell(col));
        match RawEntry::new(
            row.cell(COL_WORD),
            row.cell(COL_TYPE),
            row.cell(COL_TOPIC).trim(),
            row.cell(COL_ANSWER),
            distractors,
            row.cell(COL_EXAMPLE),
        ) {
            Some(entry) => parsed.entries.push(entry),
            None => {
                tracing::debug!("skipping feed row {i}: missing word, answer, or options");
                parsed.skipped_rows += 1;
            }
        }
    }

    Ok(parsed)
}

/// A warning from corpus validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The word concerned.
    pub word: String,
    /// Warning message.
    pub message: String,
}

/// Check a corpus for authoring issues that do not invalidate entries.
pub fn validate_corpus(entries: &[RawEntry]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.word.as_str()) {
            warnings.push(ValidationWarning {
                word: entry.word.clone(),
                message: format!("duplicate word: {}", entry.word),
            });
        }
    }

    for entry in entries {
        if entry.topic.is_empty() {
            warnings.push(ValidationWarning {
                word: entry.word.clone(),
                message: "no topic; only reachable through \"all\"".into(),
            });
        }
    }

    for entry in entries {
        if entry.example.trim().is_empty() {
            warnings.push(ValidationWarning {
                word: entry.word.clone(),
                message: "no example sentence".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::model::{QuestionCount, TopicFilter, TopicIndex};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wrap(json: &str) -> String {
        format!("{GVIZ_PREFIX}{json}{GVIZ_SUFFIX}")
    }

    const TABLE: &str = r#"{"version":"0.6","status":"ok","table":{"cols":[],"rows":[
        {"c":[{"v":"Word"},null,{"v":"Type"},{"v":"Meaning"},{"v":"Example"},{"v":"Wrong 1"},{"v":"Wrong 2"},{"v":"Wrong 3"},{"v":"Topic"}]},
        {"c":[{"v":"cat"},null,{"v":"noun"},{"v":"con mèo"},{"v":"The cat sleeps."},{"v":"con chó"},{"v":"con gà"},null,{"v":"animals"}]},
        {"c":[{"v":"run"},null,{"v":"verb"},{"v":"chạy"},null,{"v":"đi"},{"v":null},{"v":""}]},
        {"c":[{"v":"lonely"},null,{"v":"adj"},{"v":"cô đơn"},{"v":""},null,null,null,{"v":"feelings"}]},
        {"c":[]},
        {"c":[{"v":""},null,{"v":"noun"},{"v":"x"},null,{"v":"y"}]},
        {"c":[{"v":"seven"},null,{"v":"number"},{"v":7.0,"f":"7"},null,{"v":6.0},{"v":7.5,"f":"7.5"},{"v":true},{"v":"numbers"}]}
    ]}}"#;

    #[test]
    fn prefix_is_fixed_length() {
        assert_eq!(GVIZ_PREFIX.len(), 47);
        assert_eq!(GVIZ_SUFFIX.len(), 2);
    }

    #[test]
    fn parse_wrapped_table() {
        let parsed = parse_feed(&wrap(TABLE)).unwrap();
        let words: Vec<&str> = parsed.entries.iter().map(|e| e.word.as_str()).collect();
        // A header row that looks like an entry is kept like any other row.
        assert_eq!(words, vec!["Word", "cat", "run", "seven"]);
        assert_eq!(parsed.skipped_rows, 3);

        let cat = &parsed.entries[1];
        assert_eq!(cat.word_type, "noun");
        assert_eq!(cat.answer, "con mèo");
        assert_eq!(cat.example, "The cat sleeps.");
        assert_eq!(cat.topic, "animals");
        assert_eq!(cat.options(), vec!["con mèo", "con chó", "con gà"]);

        let run = &parsed.entries[2];
        assert_eq!(run.topic, "");
        assert_eq!(run.example, "");
        assert_eq!(run.options(), vec!["chạy", "đi"]);
    }

    #[test]
    fn numeric_cells_render_like_the_sheet() {
        let parsed = parse_feed(&wrap(TABLE)).unwrap();
        let seven = parsed.entries.iter().find(|e| e.word == "seven").unwrap();
        assert_eq!(seven.answer, "7");
        assert_eq!(seven.options(), vec!["7", "6", "7.5", "true"]);
    }

    #[test]
    fn formatted_text_wins_over_raw_number() {
        let json = r#"{"table":{"rows":[
            {"c":[{"v":"price"},null,{"v":"noun"},{"v":1500.0,"f":"1,500"},null,{"v":2.25},{"v":-3.0},null,{"v":"money"}]}
        ]}}"#;
        let parsed = parse_feed(&wrap(json)).unwrap();
        assert_eq!(
            parsed.entries[0].options(),
            vec!["1,500", "2.25", "-3"]
        );
    }

    #[test]
    fn listed_topics_select_their_entries() {
        let json = r#"{"table":{"rows":[
            {"c":[{"v":"cat"},null,{"v":"noun"},{"v":"con mèo"},null,{"v":"con chó"},null,null,{"v":"animals "}]},
            {"c":[{"v":"red"},null,{"v":"adj"},{"v":"màu đỏ"},null,{"v":"màu xanh"},null,null,{"v":" colors"}]},
            {"c":[{"v":"run"},null,{"v":"verb"},{"v":"chạy"},null,{"v":"đi"},null,null,{"v":"  "}]}
        ]}}"#;
        let corpus = parse_feed(&wrap(json)).unwrap().entries;
        assert_eq!(corpus[2].topic, "");

        let topics = TopicIndex::from_corpus(&corpus);
        let names: Vec<&str> = topics.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["animals", "colors"]);

        let mut rng = StdRng::seed_from_u64(5);
        for (name, count) in topics.iter() {
            let filter: TopicFilter = name.parse().unwrap();
            let built = build(&corpus, &filter, QuestionCount::new(5).unwrap(), &mut rng);
            assert_eq!(built.len(), count, "topic {name:?}");
        }
    }

    #[test]
    fn every_entry_has_answer_among_two_or_more_options() {
        let parsed = parse_feed(&wrap(TABLE)).unwrap();
        for e in &parsed.entries {
            let options = e.options();
            assert!(options.len() >= 2);
            assert!(options.contains(&e.answer));
        }
    }

    #[test]
    fn trailing_whitespace_after_wrapper_is_tolerated() {
        let text = format!("{}\n", wrap(r#"{"table":{"rows":[]}}"#));
        let parsed = parse_feed(&text).unwrap();
        assert!(parsed.entries.is_empty());
    }

    #[test]
    fn bare_json_is_accepted() {
        let parsed = parse_feed(TABLE).unwrap();
        assert_eq!(parsed.entries.len(), 4);
    }

    #[test]
    fn malformed_payloads_are_source_format_errors() {
        let cases = [
            "<html>Sign in</html>".to_string(),
            format!("{GVIZ_PREFIX}{{\"table\":{{\"rows\":[]}}}}"),
            wrap("not json"),
            wrap(r#"{"status":"error"}"#),
            wrap(r#"{"table":{"rows":"nope"}}"#),
        ];
        for text in &cases {
            assert!(
                matches!(parse_feed(text), Err(QuizError::SourceFormat(_))),
                "expected SourceFormat for {text:?}"
            );
        }
    }

    #[test]
    fn validate_reports_duplicates_and_missing_fields() {
        let entries = vec![
            RawEntry::new("cat", "n", "animals", "a", vec!["b".into()], "ex").unwrap(),
            RawEntry::new("cat", "n", "animals", "a", vec!["c".into()], "ex").unwrap(),
            RawEntry::new("dog", "n", "", "a", vec!["b".into()], " ").unwrap(),
        ];
        let warnings = validate_corpus(&entries);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings
            .iter()
            .any(|w| w.word == "dog" && w.message.contains("no topic")));
        assert!(warnings
            .iter()
            .any(|w| w.word == "dog" && w.message.contains("no example")));
        assert_eq!(warnings.len(), 3);
    }
}
