//! Transcript text builders
//!
//! Pure string builders for the copyable preview, the grammar callout, and
//! the save summary. No I/O and no session state, so every format detail is
//! unit-testable in isolation.

use crate::api::GrammarReport;
use crate::core::notebook::VocabItem;

/// Render the numbered list a user copies out of the transcript.
///
/// Matches the backend's own preview format so a locally rebuilt preview
/// (after adopting suggestions) is indistinguishable from a served one:
/// an optional `【主题】` header, then one numbered block per item with its
/// phrase pair and example pair, blocks separated by blank lines.
pub fn build_preview(items: &[VocabItem], theme: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    if !theme.is_empty() {
        out.push(format!("【主题】{theme}"));
        out.push(String::new());
    }
    for (i, item) in items.iter().enumerate() {
        out.push(format!("{}. {} {}", i + 1, item.english, item.chinese));
        out.push(format!("例句: {} {}", item.example_en, item.example_zh));
        out.push(String::new());
    }
    out.join("\n").trim().to_string()
}

/// Render a grammar report for the transcript. Issue values are shown
/// verbatim, including the backend's item index.
pub fn grammar_summary(report: &GrammarReport) -> String {
    if !report.has_issues || report.issues.is_empty() {
        return "Grammar check: no issues found.".to_string();
    }

    let mut out: Vec<String> = Vec::new();
    let count = report.issues.len();
    out.push(format!(
        "Grammar check found {} issue{}:",
        count,
        if count == 1 { "" } else { "s" }
    ));
    for issue in &report.issues {
        out.push(String::new());
        out.push(format!("Item {} ({})", issue.item_index, issue.field.as_str()));
        out.push(format!("  original:  {}", issue.original));
        out.push(format!("  corrected: {}", issue.corrected));
        out.push(format!("  {}", issue.explanation));
    }
    out.join("\n")
}

/// Render the save result line with the backend's counts as reported.
pub fn save_summary(saved: u32, failed: u32) -> String {
    format!("Saved: {saved}, Failed: {failed}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{GrammarField, GrammarIssue};
    use crate::utils::test_utils::vocab_item;

    fn full_item() -> VocabItem {
        VocabItem {
            english: "make progress".into(),
            chinese: "取得进展".into(),
            example_en: "We made real progress this week.".into(),
            example_zh: "我们这周取得了实际进展。".into(),
        }
    }

    #[test]
    fn preview_numbers_items_and_inserts_blank_lines() {
        let items = vec![full_item(), vocab_item("set a goal", "设定目标")];
        let preview = build_preview(&items, "");

        let expected = "1. make progress 取得进展\n\
             例句: We made real progress this week. 我们这周取得了实际进展。\n\
             \n\
             2. set a goal 设定目标\n\
             例句: set a goal example 设定目标例句";
        assert_eq!(preview, expected);
    }

    #[test]
    fn preview_includes_theme_header_when_set() {
        let items = vec![full_item()];
        let preview = build_preview(&items, "学习方法");

        assert!(preview.starts_with("【主题】学习方法\n\n1. make progress"));
    }

    #[test]
    fn preview_of_no_items_is_empty_or_theme_only() {
        assert_eq!(build_preview(&[], ""), "");
        assert_eq!(build_preview(&[], "旅行"), "【主题】旅行");
    }

    #[test]
    fn clean_grammar_report_renders_all_clear() {
        let report = GrammarReport {
            checked: true,
            has_issues: false,
            issues: vec![],
        };
        assert_eq!(grammar_summary(&report), "Grammar check: no issues found.");
    }

    #[test]
    fn grammar_issues_render_every_field_verbatim() {
        let report = GrammarReport {
            checked: true,
            has_issues: true,
            issues: vec![GrammarIssue {
                item_index: 2,
                field: GrammarField::English,
                original: "He go to school".into(),
                corrected: "He goes to school".into(),
                explanation: "Third-person singular takes -es.".into(),
            }],
        };

        let summary = grammar_summary(&report);
        assert!(summary.starts_with("Grammar check found 1 issue:"));
        assert!(summary.contains("Item 2 (english)"));
        assert!(summary.contains("original:  He go to school"));
        assert!(summary.contains("corrected: He goes to school"));
        assert!(summary.contains("Third-person singular takes -es."));
    }

    #[test]
    fn grammar_issue_count_pluralizes() {
        let issue = GrammarIssue {
            item_index: 0,
            field: GrammarField::Example,
            original: "a".into(),
            corrected: "b".into(),
            explanation: "c".into(),
        };
        let report = GrammarReport {
            checked: true,
            has_issues: true,
            issues: vec![issue.clone(), issue],
        };
        assert!(grammar_summary(&report).starts_with("Grammar check found 2 issues:"));
    }

    #[test]
    fn save_summary_reports_backend_counts() {
        assert_eq!(save_summary(5, 0), "Saved: 5, Failed: 0");
        assert_eq!(save_summary(2, 3), "Saved: 2, Failed: 3");
    }
}
