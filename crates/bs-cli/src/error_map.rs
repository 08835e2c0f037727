use std::fmt::Display;

use bs_core::ScriptError;

fn map_error(code: &'static str, error: impl Display) -> ScriptError {
    ScriptError::new(code, error.to_string())
}

pub(crate) fn json_text(text: &str) -> String {
    serde_json::to_string(text).expect("string json")
}

pub(crate) fn emit_error(error: ScriptError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    if let Some(line) = error.line {
        println!("ERROR_LINE:{}", line);
    }
    println!("ERROR_MSG_JSON:{}", json_text(&error.message));
    1
}

pub(crate) fn map_cli_source_path(error: std::io::Error) -> ScriptError {
    map_error("CLI_SOURCE_PATH", error)
}

pub(crate) fn map_cli_source_scan(error: std::path::StripPrefixError) -> ScriptError {
    map_error("CLI_SOURCE_SCAN", error)
}

pub(crate) fn map_cli_source_read(error: std::io::Error) -> ScriptError {
    map_error("CLI_SOURCE_READ", error)
}

pub(crate) fn map_cli_event_data(entry: &str) -> ScriptError {
    ScriptError::new(
        "CLI_EVENT_DATA",
        format!("Event data must look like key=value: {}", entry),
    )
}
