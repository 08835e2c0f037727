use std::cell::RefCell;

use bs_core::{BsValue, ScriptError};
use bs_runtime::{Diagnostic, HostServices, MessageTarget, TitleDisplay};

use crate::json_text;

/// Host that records every side effect as one machine-readable output line.
#[derive(Debug)]
pub(crate) struct ConsoleHost {
    creative: bool,
    screen_open: bool,
    sounds: Vec<String>,
    lines: RefCell<Vec<String>>,
}

impl ConsoleHost {
    pub(crate) fn new(creative: bool, screen_open: bool, sounds: Vec<String>) -> Self {
        Self {
            creative,
            screen_open,
            sounds,
            lines: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn take_lines(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.borrow_mut())
    }

    fn push(&self, line: String) {
        self.lines.borrow_mut().push(line);
    }
}

fn value_json(value: &BsValue) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

impl HostServices for ConsoleHost {
    fn show_message(&self, target: MessageTarget, text: &str) {
        let target = match target {
            MessageTarget::Chat => "CHAT",
            MessageTarget::ActionBar => "ACTION_BAR",
        };
        self.push(format!("MESSAGE:{}:{}", target, json_text(text)));
    }

    fn send_chat(&self, text: &str) {
        self.push(format!("SEND_CHAT:{}", json_text(text)));
    }

    fn show_title(&self, title: &TitleDisplay) {
        self.push(format!(
            "TITLE:{}|{}|{}|{}|{}",
            json_text(&title.title),
            json_text(&title.subtitle),
            title.fade_in,
            title.stay,
            title.fade_out
        ));
    }

    fn copy_to_clipboard(&self, text: &str) {
        self.push(format!("CLIPBOARD:{}", json_text(text)));
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64
    }

    fn is_screen_open(&self) -> bool {
        self.screen_open
    }

    fn is_creative(&self) -> bool {
        self.creative
    }

    fn give_item(&self, item: &BsValue) -> Result<(), ScriptError> {
        self.push(format!("ITEM:{}", value_json(item)));
        Ok(())
    }

    fn set_hotbar_item(&self, slot: u32, item: &BsValue) -> Result<(), ScriptError> {
        self.push(format!("HOTBAR:{}|{}", slot, value_json(item)));
        Ok(())
    }

    fn register_command(&self, command: &str) {
        self.push(format!("COMMAND:{}", json_text(command)));
    }

    fn sound_names(&self) -> Vec<String> {
        self.sounds.clone()
    }

    fn play_sound(&self, sound: &str, volume: f64, pitch: f64) {
        self.push(format!("SOUND:{}|{}|{}", sound, volume, pitch));
    }

    fn report_error(&self, diagnostic: &Diagnostic) {
        self.push(format!(
            "DIAGNOSTIC:{}:{}:{}|{}",
            diagnostic.script,
            diagnostic.line,
            diagnostic.error.code,
            json_text(&diagnostic.error.message)
        ));
    }
}
