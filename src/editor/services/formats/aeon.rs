//! Reader and writer for the `.aeon` text format.
//!
//! ```text
//! #name:Example
//! #position:A:10,20
//! A -> B
//! B -| A
//! A -?? A
//! $B: A
//! ```
//!
//! Regulation arrows are `->` (activation), `-|` (inhibition) and `-?`
//! (unknown); a trailing `?` marks the regulation as non-observable.

use super::{ErrorEntry, FormatResult};
use crate::editor::events::{Monotonicity, VariableId};
use crate::editor::models::{
    is_valid_name, ModelSnapshot, RegulationEntry, VariableEntry, POSITION_KEY,
};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

fn regulation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_{}]+)\s*-([>|?])(\??)\s*([A-Za-z0-9_{}]+)$")
            .expect("valid regulation pattern")
    })
}

struct ParsedRegulation {
    source: String,
    target: String,
    is_observable: bool,
    monotonicity: Monotonicity,
}

/// Parse an `.aeon` document into a snapshot
pub fn read_model(text: &str) -> FormatResult<ModelSnapshot> {
    let mut names: BTreeSet<String> = BTreeSet::new();
    let mut metadata: Map<String, Value> = Map::new();
    let mut positions: Map<String, Value> = Map::new();
    let mut regulations: Vec<ParsedRegulation> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut errors: Vec<ErrorEntry> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            let Some((key, value)) = comment.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key == POSITION_KEY {
                match value.split_once(':') {
                    Some((name, layout)) if is_valid_name(name.trim()) => {
                        let name = name.trim().to_string();
                        positions.insert(name.clone(), Value::String(layout.trim().to_string()));
                        names.insert(name);
                    }
                    _ => errors.push(ErrorEntry::new(format!(
                        "Line {line_number}: invalid position metadata `{line}`."
                    ))),
                }
            } else {
                metadata.insert(key.to_string(), Value::String(value.trim().to_string()));
            }
            continue;
        }

        if let Some(function) = line.strip_prefix('$') {
            match function.split_once(':') {
                Some((name, _)) if is_valid_name(name.trim()) => {
                    names.insert(name.trim().to_string());
                }
                _ => errors.push(ErrorEntry::new(format!(
                    "Line {line_number}: invalid update function `{line}`."
                ))),
            }
            continue;
        }

        let Some(captures) = regulation_pattern().captures(line) else {
            errors.push(ErrorEntry::new(format!(
                "Line {line_number}: invalid regulation `{line}`."
            )));
            continue;
        };
        let source = captures[1].to_string();
        let target = captures[4].to_string();
        if !seen.insert((source.clone(), target.clone())) {
            errors.push(ErrorEntry::new(format!(
                "Line {line_number}: duplicate regulation {source} -> {target}."
            )));
            continue;
        }
        let monotonicity = match &captures[2] {
            ">" => Monotonicity::Activation,
            "|" => Monotonicity::Inhibition,
            _ => Monotonicity::Unknown,
        };
        names.insert(source.clone());
        names.insert(target.clone());
        regulations.push(ParsedRegulation {
            source,
            target,
            is_observable: captures[3].is_empty(),
            monotonicity,
        });
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
    let regulations = regulations
        .iter()
        .map(|regulation| RegulationEntry {
            source: ids[regulation.source.as_str()].clone(),
            target: ids[regulation.target.as_str()].clone(),
            is_observable: regulation.is_observable,
            monotonicity: match regulation.monotonicity {
                Monotonicity::Unknown => None,
                known => Some(known),
            },
        })
        .collect();
    if !positions.is_empty() {
        metadata.insert(POSITION_KEY.to_string(), Value::Object(positions));
    }

    FormatResult::ok(ModelSnapshot {
        variables,
        regulations,
        metadata,
    })
}

/// Render a snapshot as an `.aeon` document
pub fn write_model(model: &ModelSnapshot) -> FormatResult<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut warnings: Vec<ErrorEntry> = Vec::new();

    for (key, value) in &model.metadata {
        if key == POSITION_KEY {
            continue;
        }
        if let Some(value) = value.as_str() {
            lines.push(format!("#{key}:{value}"));
        }
    }

    let mut placed: HashSet<&str> = HashSet::new();
    for variable in &model.variables {
        if let Some(position) = model.position_of(&variable.name) {
            lines.push(format!(
                "#{POSITION_KEY}:{}:{}",
                variable.name,
                position.to_layout()
            ));
            placed.insert(variable.name.as_str());
        }
    }

    let mut connected: HashSet<&VariableId> = HashSet::new();
    for regulation in &model.regulations {
        let (Some(source), Some(target)) = (
            model.name_of(&regulation.source),
            model.name_of(&regulation.target),
        ) else {
            warnings.push(ErrorEntry::new(format!(
                "Regulation {} -> {} references an unknown variable and was skipped.",
                regulation.source, regulation.target
            )));
            continue;
        };
        let arrow = match regulation.monotonicity {
            Some(Monotonicity::Activation) => ">",
            Some(Monotonicity::Inhibition) => "|",
            Some(Monotonicity::Unknown) | None => "?",
        };
        let observability = if regulation.is_observable { "" } else { "?" };
        lines.push(format!("{source} -{arrow}{observability} {target}"));
        connected.insert(&regulation.source);
        connected.insert(&regulation.target);
    }

    for variable in &model.variables {
        if !connected.contains(&variable.id) && !placed.contains(variable.name.as_str()) {
            warnings.push(ErrorEntry::new(format!(
                "Variable `{}` has no regulations and no layout; it cannot be saved as .aeon.",
                variable.name
            )));
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    FormatResult::with_warnings(text, warnings)
}
