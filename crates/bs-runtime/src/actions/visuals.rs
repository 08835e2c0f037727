use bs_core::{ArgKind, BsValue, ScriptError};

use crate::actions::{joined_texts, whole_number};
use crate::definition::{ActionCategory, ActionDefinition, Parameter};
use crate::host::{MessageTarget, TitleDisplay};

const HOTBAR_SLOTS: i64 = 9;

pub(super) fn definitions() -> Vec<ActionDefinition> {
    vec![
        ActionDefinition::builder("display_chat", "Display Chat")
            .description("Displays a message in the chat.")
            .icon("book")
            .category(ActionCategory::Visuals)
            .arg(Parameter::new("Texts", ArgKind::Text).plural())
            .effect(|ctx| {
                let text = joined_texts(ctx, "Texts", " ");
                ctx.host().show_message(MessageTarget::Chat, &text);
                Ok(())
            })
            .build(),
        ActionDefinition::builder("action_bar", "Action Bar")
            .description("Displays a message in the action bar.")
            .icon("spruce_sign")
            .category(ActionCategory::Visuals)
            .arg(Parameter::new("Texts", ArgKind::Text).plural())
            .effect(|ctx| {
                let text = joined_texts(ctx, "Texts", " ");
                ctx.host().show_message(MessageTarget::ActionBar, &text);
                Ok(())
            })
            .build(),
        ActionDefinition::builder("send_chat", "Send Chat")
            .description("Makes the player send a chat message.")
            .icon("paper")
            .category(ActionCategory::Actions)
            .arg(Parameter::new("Texts", ArgKind::Text).plural())
            .effect(|ctx| {
                let text = joined_texts(ctx, "Texts", " ");
                ctx.host().send_chat(&text);
                Ok(())
            })
            .build(),
        ActionDefinition::builder("display_title", "Display Title")
            .description("Displays a title.")
            .icon("warped_sign")
            .category(ActionCategory::Visuals)
            .arg(Parameter::new("Title", ArgKind::Text))
            .arg(Parameter::new("Subtitle", ArgKind::Text).optional())
            .arg(Parameter::new("Fade In", ArgKind::Number).optional())
            .arg(Parameter::new("Stay", ArgKind::Number).optional())
            .arg(Parameter::new("Fade Out", ArgKind::Number).optional())
            .effect(|ctx| {
                let ticks = |parameter: &str, default: u32| -> Result<u32, ScriptError> {
                    match ctx.optional_value(parameter) {
                        Some(value) => {
                            let ticks = whole_number(value.as_number()?, parameter)?;
                            Ok(ticks.clamp(0, i64::from(u32::MAX)) as u32)
                        }
                        None => Ok(default),
                    }
                };
                let title = TitleDisplay {
                    title: ctx.text("Title")?,
                    subtitle: ctx
                        .optional_value("Subtitle")
                        .map(|value| value.as_text())
                        .unwrap_or_default(),
                    fade_in: ticks("Fade In", 20)?,
                    stay: ticks("Stay", 60)?,
                    fade_out: ticks("Fade Out", 20)?,
                };
                ctx.host().show_title(&title);
                Ok(())
            })
            .build(),
        ActionDefinition::builder("play_sound", "Play Sound")
            .description("Plays a sound.")
            .icon("nautilus_shell")
            .category(ActionCategory::Visuals)
            .arg(Parameter::new("Sound", ArgKind::Text))
            .arg(Parameter::new("Volume", ArgKind::Number).optional())
            .arg(Parameter::new("Pitch", ArgKind::Number).optional())
            .effect(|ctx| {
                let sound = ctx.text("Sound")?;
                let volume = match ctx.optional_value("Volume") {
                    Some(value) => value.as_number()?,
                    None => 1.0,
                };
                let pitch = match ctx.optional_value("Pitch") {
                    Some(value) => value.as_number()?,
                    None => 1.0,
                };

                let sounds = &ctx.services().sounds;
                let Some(id) = sounds.lookup(&sound) else {
                    let mut message = format!("Unknown sound: {}", sound);
                    let suggestions = sounds.suggest(&sound);
                    if !suggestions.is_empty() {
                        message.push_str(&format!(". Did you mean: {}", suggestions.join(", ")));
                    }
                    return Err(ScriptError::new("HOST_UNKNOWN_SOUND", message));
                };
                ctx.host().play_sound(id, volume, pitch);
                Ok(())
            })
            .build(),
        ActionDefinition::builder("copy_text", "Copy Text")
            .description("Copies the text to the clipboard.")
            .icon("paper")
            .category(ActionCategory::Texts)
            .arg(Parameter::new("Text", ArgKind::Text))
            .effect(|ctx| {
                let text = ctx.text("Text")?;
                ctx.host().copy_to_clipboard(&text);
                Ok(())
            })
            .build(),
        ActionDefinition::builder("measure_text", "Measure Text")
            .description("Measures the width of a text in pixels.")
            .icon("stick")
            .category(ActionCategory::Texts)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Text", ArgKind::Text))
            .effect(|ctx| {
                let width = ctx.host().measure_text(&ctx.text("Text")?);
                ctx.assign("Result", BsValue::Number(width))
            })
            .build(),
        ActionDefinition::builder("register_command", "Register Command")
            .description("Registers a /cmd completion.")
            .icon("command_block")
            .category(ActionCategory::Misc)
            .arg(Parameter::new("Commands", ArgKind::Text).plural())
            .effect(|ctx| {
                for command in ctx.values("Commands") {
                    ctx.host().register_command(&command.as_text());
                }
                Ok(())
            })
            .build(),
        ActionDefinition::builder("give_item", "Give Item")
            .description("Gives the player an item. (Requires Creative)")
            .icon("chest")
            .category(ActionCategory::Actions)
            .arg(Parameter::new("Item", ArgKind::Dictionary))
            .effect(|ctx| {
                let item = BsValue::Dictionary(ctx.dictionary("Item")?);
                if !ctx.host().is_creative() {
                    return Err(not_creative("give item"));
                }
                ctx.host().give_item(&item)
            })
            .build(),
        ActionDefinition::builder("set_hotbar_item", "Set Hotbar Item")
            .description("Sets a hotbar item. (Requires Creative)")
            .icon("iron_axe")
            .category(ActionCategory::Actions)
            .arg(Parameter::new("Slot", ArgKind::Number))
            .arg(Parameter::new("Item", ArgKind::Dictionary))
            .effect(|ctx| {
                let slot = whole_number(ctx.number("Slot")?, "Slot")?;
                if !(0..HOTBAR_SLOTS).contains(&slot) {
                    return Err(ScriptError::new(
                        "ACTION_NUMBER_OUT_OF_RANGE",
                        format!("Hotbar slot {} does not exist.", slot),
                    ));
                }
                let item = BsValue::Dictionary(ctx.dictionary("Item")?);
                if !ctx.host().is_creative() {
                    return Err(not_creative("set hotbar item"));
                }
                ctx.host().set_hotbar_item(slot as u32, &item)
            })
            .build(),
    ]
}

fn not_creative(what: &str) -> ScriptError {
    ScriptError::new(
        "HOST_NOT_CREATIVE",
        format!("Unable to {}! (Not in creative mode)", what),
    )
}
