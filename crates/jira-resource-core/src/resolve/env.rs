//! Concourse build metadata substitution

use regex::{NoExpand, Regex, RegexBuilder};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Build variables that may be referenced as `$NAME` in field values
pub const BUILD_VARIABLES: [&str; 7] = [
    "BUILD_ID",
    "BUILD_NAME",
    "BUILD_JOB_NAME",
    "BUILD_PIPELINE_NAME",
    "BUILD_PIPELINE_INSTANCE_VARS",
    "BUILD_TEAM_NAME",
    "ATC_EXTERNAL_URL",
];

static PLACEHOLDERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    BUILD_VARIABLES
        .iter()
        .map(|name| {
            let pattern = RegexBuilder::new(&regex::escape(&format!("${name}")))
                .case_insensitive(true)
                .build()
                .expect("valid build variable pattern");
            (*name, pattern)
        })
        .collect()
});

/// Snapshot of the build variables set for this invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildMetadata {
    values: BTreeMap<&'static str, String>,
}

impl BuildMetadata {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let values = BUILD_VARIABLES
            .iter()
            .filter_map(|name| lookup(*name).map(|value| (*name, value)))
            .collect();

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replace the first occurrence of each set `$NAME` placeholder.
    /// Placeholders of unset variables are left untouched.
    pub fn expand(&self, value: &str) -> String {
        let mut expanded = value.to_string();

        for (name, pattern) in PLACEHOLDERS.iter() {
            if let Some(replacement) = self.values.get(name) {
                expanded = pattern
                    .replacen(&expanded, 1, NoExpand(replacement))
                    .into_owned();
            }
        }

        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn metadata(pairs: &[(&str, &str)]) -> BuildMetadata {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BuildMetadata::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_expands_set_variables() {
        let build = metadata(&[("BUILD_ID", "42"), ("BUILD_PIPELINE_NAME", "deploy")]);
        assert_eq!(
            build.expand("Build $BUILD_ID of $BUILD_PIPELINE_NAME"),
            "Build 42 of deploy"
        );
    }

    #[test]
    fn test_placeholder_is_case_insensitive() {
        let build = metadata(&[("BUILD_TEAM_NAME", "main")]);
        assert_eq!(build.expand("team: $build_team_name"), "team: main");
    }

    #[test]
    fn test_only_first_occurrence_is_replaced() {
        let build = metadata(&[("BUILD_NAME", "7")]);
        assert_eq!(build.expand("$BUILD_NAME/$BUILD_NAME"), "7/$BUILD_NAME");
    }

    #[test]
    fn test_unset_variables_are_left_alone() {
        let build = metadata(&[]);
        assert_eq!(build.expand("$BUILD_ID $ATC_EXTERNAL_URL"), "$BUILD_ID $ATC_EXTERNAL_URL");
    }

    #[test]
    fn test_unlisted_variables_are_ignored() {
        let build = metadata(&[("HOME", "/root")]);
        assert_eq!(build.get("HOME"), None);
        assert_eq!(build.expand("$HOME"), "$HOME");
    }

    #[test]
    fn test_replacement_is_literal() {
        let build = metadata(&[("ATC_EXTERNAL_URL", "https://ci.example.com/$1")]);
        assert_eq!(build.expand("$ATC_EXTERNAL_URL"), "https://ci.example.com/$1");
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var("BUILD_JOB_NAME", "release");
        std::env::remove_var("BUILD_ID");

        let build = BuildMetadata::from_env();
        assert_eq!(build.get("BUILD_JOB_NAME"), Some("release"));
        assert_eq!(build.get("BUILD_ID"), None);

        std::env::remove_var("BUILD_JOB_NAME");
    }
}
