// src/constants.rs

/// The name of the tool, as shown in the usage text.
pub const TOOL_NAME: &str = "megacl";

/// The name of the directory containing megacl configuration (in the user's home).
pub const CONFIG_DIR: &str = ".megacl";

/// The name of the persisted configuration file (inside ~/.megacl/).
pub const CONFIG_FILENAME: &str = "config.json";
