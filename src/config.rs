// ABOUTME: Configuration and constants - version info and REPL banner text

pub const VERSION: &str = "0.1.0";
pub const WELCOME_MESSAGE: &str = "monkey-lang v0.1.0";
pub const WELCOME_SUBTITLE: &str = "a small dynamically-typed scripting language";

pub const HELP_TEXT: &str = r#"
Available commands:
  help           - Show this help message
  exit or quit   - Exit the REPL
  Ctrl-D         - Exit the REPL

Type any expression to evaluate it.
"#;
