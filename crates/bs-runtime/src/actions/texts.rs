use bs_core::{ArgKind, BsValue, ScriptError};
use regex::Regex;

use crate::actions::{joined_texts, whole_number};
use crate::definition::{ActionCategory, ActionDefinition, Parameter};

fn text_check(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    test: fn(&str, &str) -> bool,
) -> ActionDefinition {
    ActionDefinition::builder(id, name)
        .description(description)
        .icon(icon)
        .category(ActionCategory::Texts)
        .arg(Parameter::new("Text", ArgKind::Text))
        .arg(Parameter::new("Subtext", ArgKind::Text))
        .opens_block()
        .effect(move |ctx| {
            if test(&ctx.text("Text")?, &ctx.text("Subtext")?) {
                ctx.schedule_inner();
            }
            Ok(())
        })
        .build()
}

fn compile_pattern(pattern: &str, source: &str) -> Result<Regex, ScriptError> {
    Regex::new(source).map_err(|error| {
        ScriptError::new(
            "ACTION_INVALID_REGEX",
            format!("Invalid regex \"{}\": {}", pattern, error),
        )
    })
}

/// Splits around matches of a regex separator, dropping trailing empty pieces.
/// An empty separator splits into characters.
pub(crate) fn split_text(text: &str, separator: &str) -> Result<Vec<String>, ScriptError> {
    let mut pieces = if separator.is_empty() {
        text.chars().map(String::from).collect::<Vec<_>>()
    } else {
        compile_pattern(separator, separator)?
            .split(text)
            .map(str::to_string)
            .collect::<Vec<_>>()
    };
    while pieces.last().is_some_and(String::is_empty) {
        pieces.pop();
    }
    Ok(pieces)
}

/// Character index of the first occurrence, or -1.
pub(crate) fn char_index_of(text: &str, subtext: &str) -> i64 {
    text.find(subtext)
        .map_or(-1, |byte| text[..byte].chars().count() as i64)
}

/// Characters `first..=last`, counted from zero.
pub(crate) fn subtext(text: &str, first: i64, last: i64) -> Result<String, ScriptError> {
    let length = text.chars().count() as i64;
    if first < 0 || last < first - 1 || last >= length {
        return Err(ScriptError::new(
            "ACTION_INDEX_OUT_OF_RANGE",
            format!(
                "Subtext {}..{} is outside a text of length {}.",
                first, last, length
            ),
        ));
    }
    Ok(text
        .chars()
        .skip(first as usize)
        .take((last - first + 1) as usize)
        .collect())
}

pub(crate) fn matches_whole(text: &str, pattern: &str) -> Result<bool, ScriptError> {
    let regex = compile_pattern(pattern, &format!("^(?:{})$", pattern))?;
    Ok(regex.is_match(text))
}

pub(super) fn definitions() -> Vec<ActionDefinition> {
    vec![
        ActionDefinition::builder("join_text", "Join Text")
            .description("Joins multiple texts into one.")
            .icon("book")
            .category(ActionCategory::Texts)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Texts", ArgKind::Text).plural())
            .effect(|ctx| {
                let joined = joined_texts(ctx, "Texts", "");
                ctx.assign("Result", BsValue::Text(joined))
            })
            .build(),
        ActionDefinition::builder("split_text", "Split Text")
            .description("Splits a text into a list of texts.")
            .icon("shears")
            .category(ActionCategory::Texts)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Text", ArgKind::Text))
            .arg(Parameter::new("Separator", ArgKind::Text))
            .effect(|ctx| {
                let pieces = split_text(&ctx.text("Text")?, &ctx.text("Separator")?)?
                    .into_iter()
                    .map(BsValue::Text)
                    .collect();
                ctx.assign("Result", BsValue::List(pieces))
            })
            .build(),
        ActionDefinition::builder("text_index_of", "Index Of Text")
            .description("Gets the index of the first occurrence of a text within another text.")
            .icon("flint")
            .category(ActionCategory::Texts)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Text", ArgKind::Text))
            .arg(Parameter::new("Subtext", ArgKind::Text))
            .effect(|ctx| {
                let index = char_index_of(&ctx.text("Text")?, &ctx.text("Subtext")?);
                ctx.assign("Result", BsValue::Number(index as f64))
            })
            .build(),
        ActionDefinition::builder("get_subtext", "Get Subtext")
            .description("Gets a piece of text within another text.")
            .icon("knowledge_book")
            .category(ActionCategory::Texts)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Text", ArgKind::Text))
            .arg(Parameter::new("First Index", ArgKind::Number))
            .arg(Parameter::new("Last Index", ArgKind::Number))
            .effect(|ctx| {
                let first = whole_number(ctx.number("First Index")?, "First Index")?;
                let last = whole_number(ctx.number("Last Index")?, "Last Index")?;
                let piece = subtext(&ctx.text("Text")?, first, last)?;
                ctx.assign("Result", BsValue::Text(piece))
            })
            .build(),
        text_check(
            "if_text_contains",
            "If Text Contains",
            "Checks if a text contains a value.",
            "name_tag",
            |text, subtext| text.contains(subtext),
        ),
        text_check(
            "if_text_doesnt_contain",
            "If Text Doesnt Contain",
            "Checks if a text doesn't contain a value.",
            "name_tag",
            |text, subtext| !text.contains(subtext),
        ),
        text_check(
            "if_starts_with",
            "If Starts With",
            "Checks if a text starts with an other.",
            "feather",
            |text, subtext| text.starts_with(subtext),
        ),
        text_check(
            "if_doesnt_start_with",
            "If Doesnt Start With",
            "Checks if a text doesn't start with an other.",
            "feather",
            |text, subtext| !text.starts_with(subtext),
        ),
        ActionDefinition::builder("if_matches_regex", "If Matches Regex")
            .description("Checks if a text matches a regex.")
            .icon("anvil")
            .category(ActionCategory::Texts)
            .arg(Parameter::new("Text", ArgKind::Text))
            .arg(Parameter::new("Regex", ArgKind::Text))
            .opens_block()
            .effect(|ctx| {
                if matches_whole(&ctx.text("Text")?, &ctx.text("Regex")?)? {
                    ctx.schedule_inner();
                }
                Ok(())
            })
            .build(),
    ]
}
