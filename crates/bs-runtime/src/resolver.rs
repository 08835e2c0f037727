//! Matches the tokens of one script line against an action signature.
//!
//! Every combination of optional parameters is a candidate. Candidates are
//! ordered by excluding before including, parameter by parameter, and each
//! one is matched by a single greedy left-to-right pass. The first candidate
//! that consumes the tokens exactly wins.

use bs_core::{ArgToken, ScriptError};
use indexmap::IndexMap;

use crate::definition::{ActionDefinition, Parameter};

/// Parameter name to the tokens it consumed, in signature order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentBinding {
    entries: IndexMap<String, Vec<ArgToken>>,
}

impl ArgumentBinding {
    pub fn get(&self, parameter: &str) -> Option<&[ArgToken]> {
        self.entries.get(parameter).map(Vec::as_slice)
    }

    pub fn first(&self, parameter: &str) -> Option<&ArgToken> {
        self.entries.get(parameter).and_then(|tokens| tokens.first())
    }

    pub fn contains(&self, parameter: &str) -> bool {
        self.entries.contains_key(parameter)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ArgToken])> {
        self.entries
            .iter()
            .map(|(name, tokens)| (name.as_str(), tokens.as_slice()))
    }
}

pub fn resolve(
    definition: &ActionDefinition,
    tokens: &[ArgToken],
) -> Result<ArgumentBinding, ScriptError> {
    resolve_parameters(&definition.parameters, tokens).ok_or_else(|| {
        ScriptError::new(
            "RESOLVE_INVALID_ARGUMENTS",
            format!("Invalid arguments for {}.", definition.name),
        )
    })
}

pub fn resolve_parameters(
    parameters: &[Parameter],
    tokens: &[ArgToken],
) -> Option<ArgumentBinding> {
    candidate_sequences(parameters)
        .iter()
        .find_map(|candidate| match_candidate(candidate, tokens))
}

/// All parameter sequences obtained by toggling optional parameters.
pub(crate) fn candidate_sequences(parameters: &[Parameter]) -> Vec<Vec<&Parameter>> {
    let mut candidates = Vec::new();
    let mut current = Vec::with_capacity(parameters.len());
    collect_candidates(parameters, &mut current, &mut candidates);
    candidates
}

fn collect_candidates<'a>(
    remaining: &'a [Parameter],
    current: &mut Vec<&'a Parameter>,
    candidates: &mut Vec<Vec<&'a Parameter>>,
) {
    let Some((parameter, rest)) = remaining.split_first() else {
        candidates.push(current.clone());
        return;
    };

    if parameter.optional {
        collect_candidates(rest, current, candidates);
    }
    current.push(parameter);
    collect_candidates(rest, current, candidates);
    current.pop();
}

fn match_candidate(candidate: &[&Parameter], tokens: &[ArgToken]) -> Option<ArgumentBinding> {
    let mut binding = ArgumentBinding::default();
    let mut position = 0;

    for parameter in candidate {
        let first = tokens.get(position)?;
        if !first.converts_to(parameter.kind) {
            return None;
        }
        let mut consumed = vec![first.clone()];
        position += 1;

        if parameter.plural {
            while let Some(token) = tokens.get(position) {
                if !token.converts_to(parameter.kind) {
                    break;
                }
                consumed.push(token.clone());
                position += 1;
            }
        }
        binding.entries.insert(parameter.name.clone(), consumed);
    }

    (position == tokens.len()).then_some(binding)
}
