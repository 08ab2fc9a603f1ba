use std::fmt::Write as _;

use shared::domain::QueryRecord;

use crate::history::ResultHistoryStore;

pub const EMPTY_TRANSCRIPT_PROMPT: &str = "Start by asking a question about Westeros laws";
pub const EXAMPLE_QUERIES: [&str; 3] = [
    "What are the laws about slavery?",
    "How are trials conducted?",
    "What are the tax laws?",
];

/// Plain-text transcript, newest first. Same history in, same text out.
pub fn render_transcript(history: &ResultHistoryStore) -> String {
    let mut out = String::new();
    if history.is_empty() {
        out.push_str(EMPTY_TRANSCRIPT_PROMPT);
        out.push('\n');
        out.push_str("Try these examples:\n");
        for example in EXAMPLE_QUERIES {
            let _ = writeln!(out, "  \"{example}\"");
        }
        return out;
    }

    out.push_str("Query Results\n");
    for (index, record) in history.all().enumerate() {
        out.push('\n');
        render_record(&mut out, index + 1, record);
    }
    out
}

pub fn render_record(out: &mut String, position: usize, record: &QueryRecord) {
    let _ = writeln!(out, "[{position}] Question:");
    let _ = writeln!(out, "    {}", record.query);
    let _ = writeln!(out, "    Answer:");
    for line in record.response.lines() {
        let _ = writeln!(out, "    {line}");
    }
    if record.has_citations() {
        let _ = writeln!(out, "    Sources:");
        for citation in &record.citations {
            let _ = writeln!(out, "      - {}: {}", citation.section_label(), citation.text);
        }
    }
}
