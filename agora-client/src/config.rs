/// Display settings of a comment thread
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ThreadConfig {
    /// Replies can be started on comments up to this nesting level (excluded)
    pub max_level: usize,

    /// Authors above this reputation get a badge next to their name
    pub reputation_badge_threshold: u32,
}

impl Default for ThreadConfig {
    fn default() -> ThreadConfig {
        ThreadConfig {
            max_level: 3,
            reputation_badge_threshold: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let c: ThreadConfig = serde_json::from_str(r#"{"max_level":5}"#).unwrap();
        assert_eq!(
            c,
            ThreadConfig {
                max_level: 5,
                reputation_badge_threshold: 100,
            }
        );
        let c: ThreadConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, ThreadConfig::default());
    }
}
