/// How the "done" sentinel ends schema definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Termination {
    /// The sentinel closes only the level it was typed at.
    #[default]
    Level,
    /// The sentinel closes every open level once the fields being defined
    /// on the way back up are finished.
    Session,
}

/// Options for the interactive builder and collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Field name that ends a level, compared case-insensitively.
    pub done_keyword: String,
    /// Scope of the sentinel.
    pub termination: Termination,
    /// Spaces of prompt indentation per nesting level.
    pub indent_width: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            done_keyword: "done".to_string(),
            termination: Termination::Level,
            indent_width: 2,
        }
    }
}

impl BuildOptions {
    /// Prompt prefix for `depth`.
    pub fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.indent_width)
    }

    /// Whether `answer` is the sentinel.
    pub fn is_done(&self, answer: &str) -> bool {
        answer.eq_ignore_ascii_case(&self.done_keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_ignores_case() {
        let options = BuildOptions::default();
        assert!(options.is_done("done"));
        assert!(options.is_done("DoNe"));
        assert!(!options.is_done(" done"));
        assert!(!options.is_done(""));
    }

    #[test]
    fn test_indent() {
        let options = BuildOptions {
            indent_width: 3,
            ..Default::default()
        };
        assert_eq!(options.indent(0), "");
        assert_eq!(options.indent(2), "      ");
    }
}
