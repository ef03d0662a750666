//! Mapping between [`Criteria`] and the flat, shareable key/value form.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::{Criteria, Field};

/// Flat string map addressing a set of criteria.
///
/// As produced by [`encode`] it holds only non-default fields. As input to
/// [`decode`] or [`apply`] it may hold anything: unknown keys and malformed
/// values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query; a leading `?` is
    /// allowed. Repeated keys keep the last value.
    pub fn parse(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Writes every non-default field; defaults are elided.
pub fn encode(criteria: &Criteria) -> QueryParams {
    Field::ALL
        .into_iter()
        .filter(|field| !criteria.is_unset(*field))
        .map(|field| (field.key().to_string(), criteria.value(field).to_param()))
        .collect()
}

/// Builds criteria from defaults plus every recognised key in `params`.
pub fn decode(params: &QueryParams) -> Criteria {
    let mut criteria = Criteria::default();
    apply(&mut criteria, params);
    criteria
}

/// Merges `patch` over existing criteria and returns how many keys applied.
pub fn apply(criteria: &mut Criteria, patch: &QueryParams) -> usize {
    patch
        .iter()
        .filter_map(|(key, value)| Field::from_key(key).map(|field| (field, value)))
        .filter(|(field, value)| criteria.set(*field, value))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_escapes_and_parses_back() {
        let mut params = QueryParams::new();
        params.insert("datePosted", "Past 24 hours");
        params.insert("company", "R&D Labs");
        let text = params.to_query_string();
        assert_eq!(text, "company=R%26D+Labs&datePosted=Past+24+hours");
        assert_eq!(QueryParams::parse(&format!("?{text}")), params);
    }
}
