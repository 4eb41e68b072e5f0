//! HTML format exporter.
//!
//! Produces a single self-contained page per package run.

use crate::report::{CompareSetReport, PackageReport};

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
h2{border-bottom:1px solid #ccc}\
code{background:#f4f4f4;padding:0 .2em}\
.missing{color:#b00020}\
.obsolete{color:#8a6d00}\
.failed{color:#b00020;font-weight:bold}";

/// Escape text for use in HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn list(items: &[String], class: &str) -> String {
    let mut out = format!("<ul class=\"{}\">\n", class);
    for item in items {
        out.push_str(&format!("<li><code>{}</code></li>\n", escape(item)));
    }
    out.push_str("</ul>\n");
    out
}

/// Export a package report to HTML.
pub fn export(report: &PackageReport) -> String {
    let title = escape(&report.title());
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", title));
    out.push_str(&format!("<style>{}</style>\n", STYLE));
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", title));

    if !report.is_breaking() && report.is_complete() {
        out.push_str("<p>No public API was removed.</p>\n");
    }

    for set in &report.compare_sets {
        out.push_str(&export_compare_set(set));
    }

    if !report.failures.is_empty() {
        out.push_str("<h2>Failed compare sets</h2>\n<ul class=\"failed\">\n");
        for failure in &report.failures {
            out.push_str(&format!(
                "<li><code>{}</code>: {}</li>\n",
                escape(&failure.compare_set_identity),
                escape(&failure.error.to_string())
            ));
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn export_compare_set(set: &CompareSetReport) -> String {
    let mut out = format!("<h2>{}</h2>\n", escape(&set.identity));
    out.push_str(&format!("<p><em>{}</em></p>\n", escape(&set.summary.text())));

    if !set.missing.missing_types.is_empty() {
        out.push_str("<h3>The following types are missing in the new API</h3>\n");
        out.push_str(&list(&set.missing.missing_types, "missing"));
    }

    if !set.missing.types.is_empty() {
        out.push_str("<h3>The following members are missing on the public types</h3>\n");
        for missing in &set.missing.types {
            out.push_str(&format!("<h4><code>{}</code></h4>\n", escape(&missing.type_name)));
            let members: Vec<String> = missing.qualified_names().collect();
            out.push_str(&list(&members, "missing"));
        }
    }

    if !set.deprecations.is_empty() {
        out.push_str("<h3>The following public API became obsolete</h3>\n");
        let names: Vec<String> = set
            .deprecations
            .types
            .iter()
            .chain(&set.deprecations.members)
            .cloned()
            .collect();
        out.push_str(&list(&names, "obsolete"));
    }

    out
}
