//! Convenience builder for HTTP query parameters.
//!
//! Director calls address single objects with `name`, collections with
//! `q` or `filter`/`filter_vars`, and deletes with `cascade`. Pairs are kept
//! in insertion order.

use std::fmt::Display;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Create a builder addressing a single object, usually by `name`.
    #[must_use]
    pub fn keyed(key: &'static str, value: &str) -> Self {
        let mut params = Self::new();
        params.push(key, value);
        params
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: Display,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Borrow the collected key/value pairs.
    #[must_use]
    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("name", Option::<String>::None);
        assert!(params.is_empty());
    }

    #[test]
    fn keyed_keeps_compound_names_verbatim() {
        let params = QueryParams::keyed("name", "web01!ping4");
        assert_eq!(params.as_pairs(), &[("name", "web01!ping4".to_string())]);
    }

    #[test]
    fn pairs_keep_insertion_order() {
        let mut params = QueryParams::new();
        params.push("name", "web01");
        params.push_opt("q", Some("web"));
        params.push("cascade", true);
        assert_eq!(
            params.as_pairs(),
            &[
                ("name", "web01".to_string()),
                ("q", "web".to_string()),
                ("cascade", "true".to_string()),
            ]
        );
    }
}
