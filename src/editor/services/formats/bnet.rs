//! Reader for the BoolNet `.bnet` format.
//!
//! Each line is `target, function`. Regulators are the identifiers used in the
//! function; their sign is derived from how many negations enclose each use.

use super::{ErrorEntry, FormatResult};
use crate::editor::events::{Monotonicity, VariableId};
use crate::editor::models::{is_valid_name, ModelSnapshot, RegulationEntry, VariableEntry};
use indexmap::IndexMap;
use serde_json::Map;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, Default)]
struct Occurrences {
    positive: bool,
    negative: bool,
}

impl Occurrences {
    fn monotonicity(&self) -> Option<Monotonicity> {
        match (self.positive, self.negative) {
            (true, false) => Some(Monotonicity::Activation),
            (false, true) => Some(Monotonicity::Inhibition),
            _ => None,
        }
    }
}

/// Collect the regulators of a function together with the signs they appear with
fn regulators(function: &str) -> Result<IndexMap<String, Occurrences>, String> {
    let mut result: IndexMap<String, Occurrences> = IndexMap::new();
    // Negation parity of every open parenthesis, outermost first.
    let mut parity = vec![false];
    let mut negate = false;
    let mut chars = function.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '!' => negate = !negate,
            '(' => {
                let enclosing = parity.last().copied().unwrap_or(false);
                parity.push(enclosing ^ negate);
                negate = false;
            }
            ')' => {
                if parity.len() == 1 {
                    return Err("unbalanced `)`".to_string());
                }
                parity.pop();
            }
            '&' | '|' => negate = false,
            c if c.is_ascii_alphanumeric() || c == '_' || c == '{' || c == '}' => {
                let mut name = c.to_string();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' || next == '{' || next == '}' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let negative = parity.last().copied().unwrap_or(false) ^ negate;
                negate = false;
                if matches!(name.as_str(), "0" | "1" | "true" | "false") {
                    continue;
                }
                let occurrences = result.entry(name).or_default();
                if negative {
                    occurrences.negative = true;
                } else {
                    occurrences.positive = true;
                }
            }
            other => return Err(format!("unexpected character `{other}`")),
        }
    }

    if parity.len() != 1 {
        return Err("unbalanced `(`".to_string());
    }
    Ok(result)
}

/// Parse a `.bnet` document into a snapshot
pub fn read_model(text: &str) -> FormatResult<ModelSnapshot> {
    let mut names: BTreeSet<String> = BTreeSet::new();
    let mut functions: IndexMap<String, IndexMap<String, Occurrences>> = IndexMap::new();
    let mut errors: Vec<ErrorEntry> = Vec::new();
    let mut header_allowed = true;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((target, function)) = line.split_once(',') else {
            errors.push(ErrorEntry::new(format!(
                "Line {line_number}: expected `target, function`."
            )));
            continue;
        };
        let target = target.trim();
        if header_allowed
            && target.eq_ignore_ascii_case("targets")
            && function.trim().eq_ignore_ascii_case("factors")
        {
            header_allowed = false;
            continue;
        }
        header_allowed = false;

        if !is_valid_name(target) {
            errors.push(ErrorEntry::new(format!(
                "Line {line_number}: invalid variable name `{target}`."
            )));
            continue;
        }
        if functions.contains_key(target) {
            errors.push(ErrorEntry::new(format!(
                "Line {line_number}: duplicate function for `{target}`."
            )));
            continue;
        }
        match regulators(function) {
            Ok(regulators) => {
                names.insert(target.to_string());
                names.extend(regulators.keys().cloned());
                functions.insert(target.to_string(), regulators);
            }
            Err(message) => errors.push(ErrorEntry::new(format!(
                "Line {line_number}: {message} in function of `{target}`."
            ))),
        }
    }

    if !errors.is_empty() {
        return FormatResult::failed(errors);
    }
    if names.is_empty() {
        return FormatResult::failed(vec![ErrorEntry::new("The model contains no variables.")]);
    }

    let ids: HashMap<&str, VariableId> = names
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), VariableId::from(index)))
        .collect();
    let variables = names
        .iter()
        .map(|name| VariableEntry {
            id: ids[name.as_str()].clone(),
            name: name.clone(),
        })
        .collect();
    let regulations = functions
        .iter()
        .flat_map(|(target, regulators)| {
            let ids = &ids;
            regulators
                .iter()
                .map(move |(source, occurrences)| RegulationEntry {
                    source: ids[source.as_str()].clone(),
                    target: ids[target.as_str()].clone(),
                    is_observable: true,
                    monotonicity: occurrences.monotonicity(),
                })
        })
        .collect();

    FormatResult::ok(ModelSnapshot {
        variables,
        regulations,
        metadata: Map::new(),
    })
}
