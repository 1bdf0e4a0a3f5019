use crate::constants::{DEFAULT_EDITOR, DEFAULT_PAGER, EDITOR_VARS, PAGER_VARS};

/// process-wide settings, resolved once at startup and passed down explicitly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// shell command that pages its stdin
    pub pager: String,

    /// shell command that edits the file named by its last argument
    pub editor: String,
}

impl Config {
    /// resolve from the process environment
    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// resolve using `lookup` for variable values; empty values count as unset
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            pager: first_set(&lookup, &PAGER_VARS, DEFAULT_PAGER),
            editor: first_set(&lookup, &EDITOR_VARS, DEFAULT_EDITOR),
        }
    }
}

fn first_set(lookup: &impl Fn(&str) -> Option<String>, names: &[&str], default: &str) -> String {
    names
        .iter()
        .filter_map(|&name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::resolve(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&[]);
        assert_eq!(config.pager, "less");
        assert_eq!(config.editor, "vi");
    }

    #[test]
    fn test_override_wins() {
        let config = resolve(&[
            ("PAGER", "more"),
            ("GIT_PAGER", "delta"),
            ("GIT_UI_PAGER", "bat"),
            ("EDITOR", "nano"),
            ("GIT_UI_EDITOR", "hx"),
        ]);
        assert_eq!(config.pager, "bat");
        assert_eq!(config.editor, "hx");
    }

    #[test]
    fn test_precedence_order() {
        let config = resolve(&[("PAGER", "more"), ("GIT_PAGER", "delta")]);
        assert_eq!(config.pager, "delta");

        let config = resolve(&[("EDITOR", "nano"), ("VISUAL", "code --wait")]);
        assert_eq!(config.editor, "code --wait");

        let config = resolve(&[("EDITOR", "nano"), ("GIT_EDITOR", "emacs")]);
        assert_eq!(config.editor, "emacs");
    }

    #[test]
    fn test_empty_value_is_unset() {
        let config = resolve(&[("GIT_UI_PAGER", ""), ("PAGER", "more"), ("VISUAL", "  ")]);
        assert_eq!(config.pager, "more");
        assert_eq!(config.editor, "vi");
    }
}
