pub const BIN_NAME: &str = "promptctl";

/// Settings file, relative to `$HOME`.
pub const DEFAULT_CONFIG_PATH: &str = ".config/promptctl/config.toml";

/// Resource store root, relative to `$HOME`.
pub const DEFAULT_STORE_DIR: &str = ".local/share/promptctl";

pub const AUDIT_LOG_FILE: &str = "audit.jsonl";

pub const DEFAULT_EDITOR: &str = "vi";

/// Overrides the log filter, e.g. `PROMPTCTL_LOG=promptctl=trace`.
pub const LOG_ENV: &str = "PROMPTCTL_LOG";
