use std::env;

/// Presentation settings read once at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub footer_text: String,
}

impl BotConfig {
    pub fn from_env() -> Self {
        let footer_text = env::var("FOOTER_TEXT")
            .unwrap_or_else(|_| "DO YOUR OWN RESEARCH - ALWAYS!".to_string());

        Self { footer_text }
    }
}
