//! Local drafting engine.
//!
//! Stands in for the remote text-generation service with deterministic
//! heuristics: the edited output is derived from the input passage, so the
//! editor remains usable offline and the accept/reject flow can be
//! exercised end to end. Remote engines implement the same trait.

use anyhow::Result;
use rand::seq::SliceRandom;

use crate::workspace::ModelSettings;

use super::{EditOperation, GenerationKind, GenerationRequest, SuggestionEngine};

/// Phrases the rewrite pass tightens away.
const WORDY_PHRASES: &[(&str, &str)] = &[
    ("due to the fact that", "because"),
    ("in order to", "to"),
    ("a lot of", "many"),
    ("it is important to note that", ""),
    ("the fact that", "that"),
    ("very", ""),
    ("really", ""),
];

/// Substitutions the rephrase pass applies to vary register.
const REPHRASE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("important", "significant"),
    ("shows", "demonstrates"),
    ("show", "demonstrate"),
    ("think", "contend"),
    ("believe", "hold"),
    ("because", "since"),
    ("but", "yet"),
    ("also", "moreover"),
    ("begin", "commence"),
    ("use", "employ"),
];

/// Contraction expansions for the formal refine direction.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("can't", "cannot"),
    ("won't", "will not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("it's", "it is"),
];

const EXPANSION_CONNECTIVES: &[&str] = &[
    "Consider, for instance, how",
    "It is worth examining how",
    "One further implication concerns how",
];

pub struct DraftingEngine {
    model_name: String,
}

impl DraftingEngine {
    pub fn new(settings: &ModelSettings) -> Self {
        Self {
            model_name: settings.model_name.clone(),
        }
    }
}

impl SuggestionEngine for DraftingEngine {
    fn label(&self) -> &str {
        &self.model_name
    }

    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let output = match request.kind {
            GenerationKind::FullRewrite => rewrite_essay(&request.input),
            GenerationKind::Passage(EditOperation::Rewrite) => rewrite_passage(&request.input),
            GenerationKind::Passage(EditOperation::Rephrase) => rephrase_passage(&request.input),
            GenerationKind::Passage(EditOperation::Expand) => expand_passage(&request.input),
            GenerationKind::Refine => {
                refine_passage(&request.input, request.feedback.as_deref().unwrap_or(""))
            }
        };
        Ok(output.trim().to_string())
    }
}

/// Full-document suggestion: each paragraph goes through the rewrite pass.
fn rewrite_essay(essay: &str) -> String {
    essay
        .split("\n\n")
        .map(rewrite_passage)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn rewrite_passage(passage: &str) -> String {
    let mut text = passage.to_string();
    for (from, to) in WORDY_PHRASES {
        text = replace_word(&text, from, to);
    }
    capitalize_sentences(&normalize_spaces(&text))
}

fn rephrase_passage(passage: &str) -> String {
    let mut text = passage.to_string();
    for (from, to) in REPHRASE_SUBSTITUTIONS {
        text = replace_word(&text, from, to);
    }
    capitalize_sentences(&normalize_spaces(&text))
}

fn expand_passage(passage: &str) -> String {
    let mut rng = rand::thread_rng();
    let connective = EXPANSION_CONNECTIVES
        .choose(&mut rng)
        .unwrap_or(&EXPANSION_CONNECTIVES[0]);
    let terms = key_terms(passage, 2);
    let subject = if terms.is_empty() {
        "this point".to_string()
    } else {
        terms.join(" and ")
    };
    let mut expanded = passage.trim_end().to_string();
    if !expanded.ends_with(['.', '!', '?']) {
        expanded.push('.');
    }
    expanded.push_str(&format!(
        " {connective} {subject} bears on the wider argument. \
         Tracing that connection makes the stakes of the claim explicit."
    ));
    expanded
}

fn refine_passage(passage: &str, feedback: &str) -> String {
    let lower = feedback.to_lowercase();
    if lower.contains("short") {
        return shorten_passage(passage);
    }
    if lower.contains("simple") {
        // Undo register-raising substitutions and tighten.
        let mut text = passage.to_string();
        for (plain, fancy) in REPHRASE_SUBSTITUTIONS {
            text = replace_word(&text, fancy, plain);
        }
        return rewrite_passage(&text);
    }
    if lower.contains("formal") {
        let mut text = passage.to_string();
        for (from, to) in CONTRACTIONS {
            text = replace_word(&text, from, to);
        }
        return capitalize_sentences(&text);
    }
    // No recognized direction: vary the style instead of repeating the
    // rejected proposal verbatim.
    rephrase_passage(passage)
}

fn shorten_passage(passage: &str) -> String {
    let sentences: Vec<&str> = split_sentences(passage);
    let keep = (sentences.len() / 2).max(1);
    sentences[..keep].join(" ").trim().to_string()
}

/// The longest distinct lowercase words, used as expansion subjects.
fn key_terms(passage: &str, count: usize) -> Vec<String> {
    let mut words: Vec<String> = passage
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.len() > 4)
        .collect();
    words.sort_by_key(|w| std::cmp::Reverse(w.len()));
    words.dedup();
    let mut terms = Vec::new();
    for word in words {
        if !terms.contains(&word) {
            terms.push(word);
        }
        if terms.len() == count {
            break;
        }
    }
    terms
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let end = idx + c.len_utf8();
            let chunk = text[start..end].trim();
            if !chunk.is_empty() {
                sentences.push(chunk);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Word-boundary replacement; matches are only substituted when not
/// embedded inside a longer alphanumeric token.
fn replace_word(text: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(from) {
        let boundary_before = rest[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after = &rest[pos + from.len()..];
        let boundary_after = after.chars().next().map_or(true, |c| !c.is_alphanumeric());
        out.push_str(&rest[..pos]);
        if boundary_before && boundary_after {
            out.push_str(to);
        } else {
            out.push_str(from);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

fn normalize_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split('\n') {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&line.split_whitespace().collect::<Vec<_>>().join(" "));
    }
    out
}

fn capitalize_sentences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_sentence_start = true;
    for c in text.chars() {
        if at_sentence_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            at_sentence_start = false;
        } else {
            if matches!(c, '.' | '!' | '?') {
                at_sentence_start = true;
            }
            out.push(c);
        }
    }
    out
}
