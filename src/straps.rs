use std::collections::HashMap;

use regex::Regex;

use crate::document::{Document, Environment};
use crate::StrapsError;

/// Settings for one selected environment, flattened into a key/value map.
///
/// A `Straps` handle is returned by [`Straps::load`](crate::Straps::load) and
/// is immutable thereafter; clone it or pass it by reference to anything that
/// needs lookups. Each `load` call produces an independent handle, so tests
/// can hold several configurations at once without interference.
///
/// Keys are case-sensitive and looked up exact-match, except through
/// [`strap_regexp`](Self::strap_regexp).
///
/// ## Accessor policy
///
/// Fallible accessors return an explicit error on a missing key or an
/// unparseable value; nothing defaults silently. The same call on the same
/// handle always produces the same outcome.
///
/// ## Example
///
/// ```no_run
/// use straps::Straps;
///
/// let straps = Straps::load("RUN_ENV", "myapp/config")?;
///
/// let company = straps.strap("CompanyName")?;
/// let use_email = straps.strap_bool("UseEmail")?;
/// # Ok::<(), straps::StrapsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Straps {
    values: HashMap<String, String>,
    environment: String,
}

impl Straps {
    /// Flattens one environment's settings into a handle.
    ///
    /// Duplicate keys within the environment resolve last-write-wins.
    pub(crate) fn from_environment(env: &Environment) -> Self {
        let mut values = HashMap::with_capacity(env.straps.len());
        for setting in &env.straps {
            values.insert(setting.key.clone(), setting.value.clone());
        }
        Self {
            values,
            environment: env.name.clone(),
        }
    }

    /// Parses a straps document from a string and selects an environment by
    /// name, bypassing file resolution and the selector variable.
    ///
    /// Useful for embedded configuration and for tests.
    pub fn parse(xml: &str, environment: &str) -> Result<Self, StrapsError> {
        let doc = Document::parse(xml)?;
        let env = doc
            .environment(environment)
            .ok_or_else(|| StrapsError::UnknownEnvironment(environment.to_string()))?;
        Ok(Self::from_environment(env))
    }

    /// Returns the name of the environment this handle was loaded from.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Returns true if the key exists.
    pub fn exists(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the value for the key, exactly as stored.
    pub fn strap(&self, key: &str) -> Result<&str, StrapsError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| StrapsError::MissingKey(key.to_string()))
    }

    /// Returns the values of all entries whose key matches the regex,
    /// sorted by key.
    ///
    /// An empty vec means no key matched; only a malformed pattern is an
    /// error.
    pub fn strap_regexp(&self, pattern: &str) -> Result<Vec<String>, StrapsError> {
        let find = Regex::new(pattern)?;

        let mut matched: Vec<(&String, &String)> = self
            .values
            .iter()
            .filter(|(key, _)| find.is_match(key))
            .collect();
        // Map iteration order is unspecified; sort so callers see a stable order.
        matched.sort_by(|(a, _), (b, _)| a.cmp(b));

        Ok(matched.into_iter().map(|(_, value)| value.clone()).collect())
    }

    /// Returns the value for the key parsed as a boolean.
    ///
    /// Accepts `true`/`false`, `t`/`f` and `1`/`0`, case-insensitive.
    pub fn strap_bool(&self, key: &str) -> Result<bool, StrapsError> {
        let value = self.strap(key)?;
        match value.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Ok(true),
            "false" | "f" | "0" => Ok(false),
            _ => Err(StrapsError::InvalidBool {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Returns the value for the key parsed as a base-10 integer.
    pub fn strap_int(&self, key: &str) -> Result<i64, StrapsError> {
        let value = self.strap(key)?;
        value.parse().map_err(|_| StrapsError::InvalidInt {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Number of settings in the selected environment.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the selected environment had no settings.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the keys, in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <straps>
          <env name="dev">
            <strap key="CompanyName" value="NEWCO-DEV"/>
            <strap key="UseEmail" value="true"/>
            <strap key="MaxRetries" value="5"/>
            <strap key="SmtpHost" value="smtp.dev.newco.test"/>
            <strap key="SmtpPort" value="2525"/>
          </env>
          <env name="prod">
            <strap key="CompanyName" value="NEWCO"/>
            <strap key="UseEmail" value="true"/>
          </env>
        </straps>
    "#;

    fn dev() -> Straps {
        Straps::parse(SAMPLE, "dev").unwrap()
    }

    #[test]
    fn test_environment_isolation() {
        let straps = dev();
        assert_eq!(straps.environment(), "dev");
        assert_eq!(straps.strap("CompanyName").unwrap(), "NEWCO-DEV");
        assert_eq!(straps.len(), 5);
    }

    #[test]
    fn test_exists() {
        let straps = dev();
        assert!(straps.exists("CompanyName"));
        assert!(!straps.exists("Missing"));
        assert!(!straps.exists("companyname"), "keys are case-sensitive");
    }

    #[test]
    fn test_strap_round_trips_exactly() {
        let straps = Straps::parse(
            r#"<straps><env name="e"><strap key="Spaced" value="  keep me  "/></env></straps>"#,
            "e",
        )
        .unwrap();
        assert_eq!(straps.strap("Spaced").unwrap(), "  keep me  ");
    }

    #[test]
    fn test_strap_missing_key() {
        let straps = dev();
        let result = straps.strap("Missing");
        assert!(matches!(result, Err(StrapsError::MissingKey(k)) if k == "Missing"));
    }

    #[test]
    fn test_strap_regexp_returns_values_sorted_by_key() {
        let straps = dev();
        let smtp = straps.strap_regexp("^Smtp").unwrap();
        assert_eq!(smtp, vec!["smtp.dev.newco.test".to_string(), "2525".to_string()]);
    }

    #[test]
    fn test_strap_regexp_no_match_is_empty() {
        assert!(dev().strap_regexp("^Nothing").unwrap().is_empty());
    }

    #[test]
    fn test_strap_regexp_invalid_pattern() {
        let result = dev().strap_regexp("(unclosed");
        assert!(matches!(result, Err(StrapsError::InvalidPattern(_))));
    }

    #[test]
    fn test_strap_bool_accepted_forms() {
        let straps = Straps::parse(
            r#"
            <straps>
              <env name="e">
                <strap key="a" value="true"/>
                <strap key="b" value="T"/>
                <strap key="c" value="1"/>
                <strap key="d" value="FALSE"/>
                <strap key="e" value="f"/>
                <strap key="f" value="0"/>
              </env>
            </straps>
            "#,
            "e",
        )
        .unwrap();

        for key in ["a", "b", "c"] {
            assert!(straps.strap_bool(key).unwrap(), "key {key}");
        }
        for key in ["d", "e", "f"] {
            assert!(!straps.strap_bool(key).unwrap(), "key {key}");
        }
    }

    #[test]
    fn test_strap_bool_rejects_garbage() {
        let straps =
            Straps::parse(r#"<straps><env name="e"><strap key="k" value="yes"/></env></straps>"#, "e")
                .unwrap();
        let result = straps.strap_bool("k");
        assert!(
            matches!(result, Err(StrapsError::InvalidBool { ref value, .. }) if value == "yes")
        );
    }

    #[test]
    fn test_strap_int() {
        let straps = dev();
        assert_eq!(straps.strap_int("MaxRetries").unwrap(), 5);
    }

    #[test]
    fn test_strap_int_unparseable_is_consistent() {
        let straps =
            Straps::parse(r#"<straps><env name="e"><strap key="k" value="abc"/></env></straps>"#, "e")
                .unwrap();
        for _ in 0..3 {
            let result = straps.strap_int("k");
            assert!(
                matches!(result, Err(StrapsError::InvalidInt { ref value, .. }) if value == "abc")
            );
        }
    }

    #[test]
    fn test_typed_accessors_report_missing_key() {
        let straps = dev();
        assert!(matches!(straps.strap_bool("Missing"), Err(StrapsError::MissingKey(_))));
        assert!(matches!(straps.strap_int("Missing"), Err(StrapsError::MissingKey(_))));
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let straps = Straps::parse(
            r#"
            <straps>
              <env name="e">
                <strap key="k" value="first"/>
                <strap key="k" value="second"/>
              </env>
            </straps>
            "#,
            "e",
        )
        .unwrap();
        assert_eq!(straps.strap("k").unwrap(), "second");
        assert_eq!(straps.len(), 1);
    }

    #[test]
    fn test_parse_unknown_environment() {
        let result = Straps::parse(SAMPLE, "staging");
        assert!(matches!(result, Err(StrapsError::UnknownEnvironment(e)) if e == "staging"));
    }

    #[test]
    fn test_empty_environment_handle() {
        let straps =
            Straps::parse(r#"<straps><env name="empty"/></straps>"#, "empty").unwrap();
        assert!(straps.is_empty());
        assert_eq!(straps.keys().count(), 0);
    }
}
