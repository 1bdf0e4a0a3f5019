// pager selection, first defined wins
pub const PAGER_VARS: [&str; 3] = ["GIT_UI_PAGER", "GIT_PAGER", "PAGER"];
pub const DEFAULT_PAGER: &str = "less";

// editor selection, first defined wins
pub const EDITOR_VARS: [&str; 4] = ["GIT_UI_EDITOR", "GIT_EDITOR", "VISUAL", "EDITOR"];
pub const DEFAULT_EDITOR: &str = "vi";

// command words (case-insensitive prefixes)
pub const RECORD_PREFIX: &str = "rec";
pub const ADD_PREFIX: &str = "add";

// git diff --raw
pub const RAW_LINE_SENTINEL: char = ':';
pub const RAW_META_FIELDS: usize = 5;

// decision loop
pub const HELP_KEY: char = '?';
