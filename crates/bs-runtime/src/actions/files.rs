use bs_core::ArgKind;

use crate::definition::{ActionCategory, ActionDefinition, Parameter};

pub(super) fn definitions() -> Vec<ActionDefinition> {
    vec![
        ActionDefinition::builder("read_file", "Read File")
            .description("Reads a file from the scripts folder.")
            .icon("written_book")
            .category(ActionCategory::Misc)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Filename", ArgKind::Text))
            .effect(|ctx| {
                let filename = ctx.text("Filename")?;
                let stored = ctx.services().files.read(ctx.script_name(), &filename)?;
                match stored {
                    Some(value) => ctx.assign("Result", value),
                    None => Ok(()),
                }
            })
            .build(),
        ActionDefinition::builder("write_file", "Write File")
            .description("Writes a file to the scripts folder.")
            .icon("writable_book")
            .category(ActionCategory::Misc)
            .arg(Parameter::new("Filename", ArgKind::Text))
            .arg(Parameter::new("Content", ArgKind::Any))
            .effect(|ctx| {
                let filename = ctx.text("Filename")?;
                let content = ctx.value("Content")?;
                ctx.services()
                    .files
                    .write(ctx.script_name(), &filename, &content)
            })
            .build(),
        ActionDefinition::builder("if_file_exists", "If File Exists")
            .description("Executes if the specified file exists.")
            .icon("book")
            .category(ActionCategory::Misc)
            .arg(Parameter::new("Filename", ArgKind::Text))
            .opens_block()
            .effect(|ctx| {
                let filename = ctx.text("Filename")?;
                if ctx.services().files.exists(ctx.script_name(), &filename)? {
                    ctx.schedule_inner();
                }
                Ok(())
            })
            .build(),
    ]
}
