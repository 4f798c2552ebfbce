//! Command line options passed through to flexfringe

use serde::Serialize;

pub const HEURISTIC_NAME: &str = "heuristic_name";
pub const DATA_NAME: &str = "data_name";

pub const DEFAULT_HEURISTIC: &str = "alergia";
pub const DEFAULT_DATA: &str = "alergia_data";

/// Insertion-ordered `name -> value` options, rendered as `--name=value`
///
/// Setting an existing name replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    entries: Vec<(String, String)>,
}

impl Default for Options {
    /// The reserved heuristic and data options with their defaults
    fn default() -> Self {
        Self::empty()
            .set(HEURISTIC_NAME, DEFAULT_HEURISTIC)
            .set(DATA_NAME, DEFAULT_DATA)
    }
}

impl Options {
    /// Options without the reserved defaults
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn heuristic(self, name: impl Into<String>) -> Self {
        self.set(HEURISTIC_NAME, name)
    }

    pub fn data(self, name: impl Into<String>) -> Self {
        self.set(DATA_NAME, name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `other` on top of these options, `other` winning on conflicts
    pub fn merged(mut self, other: &Options) -> Self {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
        self
    }

    pub fn to_flags(&self) -> Vec<String> {
        self.iter()
            .map(|(name, value)| format!("--{}={}", name, value))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Options
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Options::empty();
        for (name, value) in iter {
            options.insert(name, value);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Inverse of `to_flags`, only needed to check the rendering
    fn parse_flags(flags: &[String]) -> Options {
        flags
            .iter()
            .map(|flag| {
                let body = flag.strip_prefix("--").expect("flag must start with --");
                let (name, value) = body.split_once('=').expect("flag must contain =");
                (name.to_string(), value.to_string())
            })
            .collect()
    }

    #[test]
    fn test_flags_follow_insertion_order() {
        let options = Options::empty().set("a", "1").set("b", "2");
        assert_eq!(options.to_flags(), vec!["--a=1", "--b=2"]);
    }

    #[test]
    fn test_defaults_come_first() {
        let options = Options::default().set("state_count", "25");
        assert_eq!(
            options.to_flags(),
            vec![
                "--heuristic_name=alergia",
                "--data_name=alergia_data",
                "--state_count=25",
            ]
        );
    }

    #[test]
    fn test_last_write_wins_in_place() {
        let options = Options::default()
            .set("sinkcount", "5")
            .heuristic("kldistance")
            .set("sinkcount", "10");

        assert_eq!(options.len(), 3);
        assert_eq!(options.get(HEURISTIC_NAME), Some("kldistance"));
        assert_eq!(
            options.to_flags(),
            vec![
                "--heuristic_name=kldistance",
                "--data_name=alergia_data",
                "--sinkcount=10",
            ]
        );
    }

    #[test]
    fn test_merged() {
        let base = Options::default().set("a", "1");
        let overrides = Options::empty().set("a", "2").data("kl_data");
        let merged = base.merged(&overrides);

        assert_eq!(merged.get("a"), Some("2"));
        assert_eq!(merged.get(DATA_NAME), Some("kl_data"));
        assert_eq!(merged.get(HEURISTIC_NAME), Some("alergia"));
    }

    proptest! {
        #[test]
        fn prop_flags_round_trip(
            entries in proptest::collection::vec(("[a-z_]{1,12}", "[a-zA-Z0-9_.=/-]{0,12}"), 0..8)
        ) {
            let options: Options = entries.into_iter().collect();
            let flags = options.to_flags();

            prop_assert_eq!(flags.len(), options.len());
            prop_assert_eq!(parse_flags(&flags), options);
        }
    }
}
