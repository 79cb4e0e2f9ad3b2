//! Plain-text helpers that turn a job opening into embedding input.

use crate::pipeline::SimilarityPayload;
use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Separator placed between the labeled sections of the embedding text
const SECTION_SEPARATOR: &str = "\n\n";

/// Strips markup tags and collapses whitespace from a raw job description.
///
/// Tags are removed one at a time (`<` up to the nearest `>`), then every run of
/// whitespace, newlines included, becomes a single space and the ends are trimmed.
pub fn clean_description(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let without_tags = TAG.replace_all(raw, "");
    WHITESPACE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Composes the labeled text block sent to the embedding provider.
///
/// Sections appear in a fixed order (title, description, experience, salary,
/// remote, client) and any section without a value is left out entirely.
pub fn prepare_embedding_text(payload: &SimilarityPayload) -> String {
    let meta = &payload.metadata;
    let mut sections: Vec<String> = Vec::new();

    if !payload.title.is_empty() {
        sections.push(format!("Job Title: {}", payload.title));
    }
    if !payload.clean_description.is_empty() {
        sections.push(format!("Job Description: {}", payload.clean_description));
    }
    if !meta.experience_required.is_empty() {
        sections.push(format!("Experience Required: {}", meta.experience_required));
    }
    if !meta.salary.is_empty() {
        sections.push(format!("Salary: ${}", meta.salary));
    }
    // An unset flag is indistinguishable from "not remote", so only a positive flag is stated.
    if meta.remote {
        sections.push("Remote Work: Available".to_string());
    }
    if !meta.client.is_empty() {
        sections.push(format!("Client: {}", meta.client));
    }

    sections.join(SECTION_SEPARATOR)
}
