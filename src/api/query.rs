use url::form_urlencoded;

use super::endpoints::keys;

/// Ordered set of query parameters for one report call.
///
/// Absent or empty values are dropped on insert, so whatever ends up in the
/// builder is exactly what goes on the wire. Setting a key that is already
/// present replaces its value in place; keys never repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    pairs: Vec<(&'static str, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Optional string parameter. `None` and `""` are both skipped.
    pub fn param<V: AsRef<str>>(mut self, key: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.as_ref();
            if !value.is_empty() {
                self.set(key, value.to_string());
            }
        }
        self
    }

    pub fn text(self, key: &'static str, value: &str) -> Self {
        self.param(key, Some(value))
    }

    /// Result counts: zero means "server default" and is skipped.
    pub fn count(mut self, key: &'static str, value: u32) -> Self {
        if value > 0 {
            self.set(key, value.to_string());
        }
        self
    }

    /// Boolean flags travel as `0`/`1`.
    pub fn flag(mut self, key: &'static str, value: Option<bool>) -> Self {
        if let Some(flag) = value {
            self.set(key, if flag { "1" } else { "0" }.to_string());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Serialize to a form-urlencoded query string, appending credentials and,
    /// unless the call already set one, the default timezone.
    pub fn finish(&self, username: &str, password: &str, timezone: Option<&str>) -> String {
        let mut full = self
            .clone()
            .text(keys::USERNAME, username)
            .text(keys::PASSWORD, password);
        if !full.contains(keys::TIME_ZONE) {
            full = full.param(keys::TIME_ZONE, timezone);
        }

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &full.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    fn set(&mut self, key: &'static str, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }
}
