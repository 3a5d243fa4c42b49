//! Linguistic markers common in machine-generated prose.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

const TROPES: &[&str] = &[
    "delve",
    "pivotal",
    "meticulous",
    "comprehensive",
    "unveil",
    "vibrant",
    "tapestry",
    "ever-evolving",
    "bustling",
    "plethora",
];

const TEMPLATES: &[&str] = &[
    "as an ai",
    "as a language model",
    "it is important to note",
    "in conclusion",
    "to summarize",
    "on the other hand",
    "firstly",
    "secondly",
    "furthermore",
];

const FORMALISMS: &[&str] = &["could be argued", "it is widely believed", "one might consider"];

const NEUTRAL_STARTS: &[&str] = &["the", "a", "an", "this", "it"];

const MAX_MARKERS: usize = 5;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence pattern"));

/// Up to five distinct markers found in `text`, in detection order.
///
/// Markers are informational only.
pub fn extract_ai_markers(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut markers: Vec<String> = Vec::new();

    let phrase_groups: [(&str, &[&str]); 3] = [
        ("AI Trope", TROPES),
        ("AI Structure", TEMPLATES),
        ("Formalism", FORMALISMS),
    ];
    for (kind, phrases) in phrase_groups {
        markers.extend(
            phrases
                .iter()
                .filter(|p| lower.contains(*p))
                .map(|p| format!("{}: '{}'", kind, p)),
        );
    }

    markers.extend(
        repetitive_starts(text)
            .into_iter()
            .map(|w| format!("Repetitive start: '{}'", w)),
    );

    let mut unique: Vec<String> = Vec::with_capacity(MAX_MARKERS);
    for marker in markers {
        if !unique.contains(&marker) {
            unique.push(marker);
        }
        if unique.len() == MAX_MARKERS {
            break;
        }
    }
    unique
}

/// Sentence-opening words used more than twice, in first-seen order.
fn repetitive_starts(text: &str) -> Vec<String> {
    let starts: Vec<String> = SENTENCE_END
        .split(text)
        .filter_map(|s| s.split_whitespace().next())
        .map(str::to_lowercase)
        .collect();

    if starts.len() <= 3 {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in &starts {
        *counts.entry(word.as_str()).or_default() += 1;
    }

    let mut repeated: Vec<String> = Vec::new();
    for word in &starts {
        if counts[word.as_str()] > 2
            && !NEUTRAL_STARTS.contains(&word.as_str())
            && !repeated.contains(word)
        {
            repeated.push(word.clone());
        }
    }
    repeated
}
