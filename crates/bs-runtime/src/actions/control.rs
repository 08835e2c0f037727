use bs_core::ArgKind;

use crate::actions::whole_number;
use crate::definition::{ActionCategory, ActionDefinition, Parameter};

pub(super) fn definitions() -> Vec<ActionDefinition> {
    vec![
        ActionDefinition::builder("wait", "Wait")
            .description("Waits for a given amount of time.")
            .icon("clock")
            .category(ActionCategory::Misc)
            .arg(Parameter::new("Ticks", ArgKind::Number))
            .effect(|ctx| {
                let ticks = whole_number(ctx.number("Ticks")?, "Ticks")?.max(0);
                ctx.suspend(ticks as u64);
                Ok(())
            })
            .build(),
        ActionDefinition::builder("stop", "Stop")
            .description("Stops the current codeline.")
            .icon("barrier")
            .category(ActionCategory::Misc)
            .effect(|ctx| {
                ctx.stop();
                Ok(())
            })
            .build(),
        ActionDefinition::builder("close_bracket", "Close Bracket")
            .description("Closes the current code block.")
            .icon("piston")
            .category(ActionCategory::Misc)
            .closes_block()
            .build(),
        ActionDefinition::builder("cancel_event", "Cancel Event")
            .description("Cancels the event.")
            .icon("barrier")
            .category(ActionCategory::Misc)
            .effect(|ctx| {
                if let Some(event) = ctx.event_mut() {
                    event.set_cancelled(true);
                }
                Ok(())
            })
            .build(),
        ActionDefinition::builder("uncancel_event", "Uncancel Event")
            .description("Uncancels the event.")
            .icon("structure_void")
            .category(ActionCategory::Misc)
            .effect(|ctx| {
                if let Some(event) = ctx.event_mut() {
                    event.set_cancelled(false);
                }
                Ok(())
            })
            .build(),
        ActionDefinition::builder("if_gui_open", "If GUI Open")
            .description("Executes if a gui is open.")
            .icon("book")
            .category(ActionCategory::Misc)
            .opens_block()
            .effect(|ctx| {
                if ctx.host().is_screen_open() {
                    ctx.schedule_inner();
                }
                Ok(())
            })
            .build(),
        ActionDefinition::builder("if_gui_closed", "If GUI Not Open")
            .description("Executes if no gui is open.")
            .icon("book")
            .category(ActionCategory::Misc)
            .opens_block()
            .effect(|ctx| {
                if !ctx.host().is_screen_open() {
                    ctx.schedule_inner();
                }
                Ok(())
            })
            .build(),
    ]
}
