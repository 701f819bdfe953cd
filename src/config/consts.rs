// src/config/consts.rs

// Output naming: <base><FILE_INFIX><YYMMDD>.<ext>
pub const FILE_INFIX: &str = "_crawling_";
pub const DATE_FORMAT: &str = "%y%m%d";
pub const JSON_EXT: &str = "json";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_PROFILE_KEY: &str = "profile";
pub const JSON_INDENT: &[u8] = b"    ";
pub const LIST_SEPARATOR: &str = "\n";
pub const SHEET_NAME: &str = "Sheet1";
pub const CSV_BOM: &str = "\u{FEFF}";

// Logging
pub const LOG_FILE_NAME: &str = "export.log";
