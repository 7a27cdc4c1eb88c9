//! Plain-text report formatter.
//!
//! Renders the comment listing followed by the topic-modeling section.
//! The output is the entire response body on the success path, so the
//! renderer produces the complete report in one pass.

use std::fmt::Write;

use crate::github::IssueComment;
use crate::topics::TopicVector;

/// Renders the combined report for one issue.
///
/// Comments appear in fetch order, one `commented by {author}: {body}`
/// line each; the topic section lists every result's source text and one
/// indented `Topic {i}: {score}` line per topic index.
#[must_use]
pub fn render_report(comments: &[IssueComment], results: &[TopicVector]) -> String {
    let mut report = String::new();
    write_comment_lines(&mut report, comments);
    write_topic_section(&mut report, results);
    report
}

fn write_comment_lines(report: &mut String, comments: &[IssueComment]) {
    let _ignored = writeln!(report, "Comments:");
    for comment in comments {
        let _ignored = writeln!(
            report,
            "commented by {author}: {body}",
            author = comment.author,
            body = comment.body
        );
    }
}

fn write_topic_section(report: &mut String, results: &[TopicVector]) {
    let _ignored = writeln!(report);
    let _ignored = writeln!(report, "Topic modeling results:");
    for result in results {
        let _ignored = writeln!(report, "Comment: {text}", text = result.source_text);
        for (index, score) in result.scores.iter().enumerate() {
            let _ignored = writeln!(report, "  Topic {index}: {score}");
        }
        let _ignored = writeln!(report);
    }
}
