//! Domain constants

/// Separator between the section and the attribute of a derived config key
pub const CONFIG_KEY_SEPARATOR: char = '.';

/// Suffix stripped from config-key holder names when deriving the section
pub const CONFIG_HOLDER_SUFFIX: &str = "Keys";

