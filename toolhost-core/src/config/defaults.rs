pub const DEFAULT_MODEL: &str = "llama3.1";
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://127.0.0.1:11434";
pub const DEFAULT_OPENAI_API_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_LISTEN_PORT: u16 = 8000;
pub const DEFAULT_TOOL_DIR: &str = "tool";
pub const DEFAULT_TOOL_PREFIX: &str = "tool-";
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 1;

/// Default config file path - can be overridden via CLI argument
pub const CONFIG_PATH: &str = "config/toolhost.toml";

/// Environment file loaded once before the config is read
pub const ENV_PATH: &str = "config/.env";
