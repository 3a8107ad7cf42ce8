use rustyline::{Config, Editor, Result};

const DEFAULT_PROMPT: &str = "symptoms> ";
const MAX_HISTORY: usize = 200;

pub fn generate_prompt(custom_prompt: Option<&str>) -> String {
    custom_prompt.unwrap_or(DEFAULT_PROMPT).to_string()
}

/// Line editor for the chat loop. History lives only in memory.
pub fn rl() -> Result<Editor<()>> {
    let config = Config::builder()
        .history_ignore_space(true)
        .history_ignore_dups(true)
        .max_history_size(MAX_HISTORY)
        .auto_add_history(false)
        .build();
    Editor::with_config(config)
}
