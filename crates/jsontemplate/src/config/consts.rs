//! Compile option defaults

/// Metacharacters used when none are configured
pub const DEFAULT_META: &str = "{}";

/// Separator between a variable name and its formatter chain
pub const DEFAULT_FORMAT_CHAR: char = '|';

/// Formatter applied to substitutions that name none
pub const DEFAULT_FORMATTER: &str = "str";

/// Keyword that disables the default formatter
pub const DISABLED: &str = "disabled";

/// Accepted format characters
pub const FORMAT_CHARS: [char; 2] = [':', '|'];

/// Maximum nesting of template-invokes-template expansions
pub const DEFAULT_RECURSION_LIMIT: usize = 32;

/// Option names recognized in a template header
pub const HEADER_OPTIONS: [&str; 3] = ["meta", "format-char", "default-formatter"];
