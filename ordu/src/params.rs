use serde::Deserialize;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// Parameter names with a meaning of their own. Every other key is an equality filter.
pub const RESERVED_KEYS: [&str; 5] = ["searchTerm", "sort", "page", "limit", "fields"];

/// The query string of a request, split into the parameters the
/// [`QueryBuilder`](crate::QueryBuilder) understands and a residual map of filters.
///
/// Values are kept as the raw strings the client sent. Interpretation, including the
/// fallback to defaults for malformed numbers, happens when the builder applies them.
///
/// `QueryParams` implements [`Deserialize`], so it can be used directly with web framework
/// query extractors. It can also be built from a raw query string:
///
/// ```
/// use ordu::QueryParams;
///
/// let params = QueryParams::from_query_str("?searchTerm=kit&page=2&role=admin");
///
/// assert_eq!(params.search_term.as_deref(), Some("kit"));
/// assert_eq!(params.page(), Some(2));
/// assert_eq!(params.filters.get("role").map(String::as_str), Some("admin"));
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub search_term: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub fields: Option<String>,
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query string. A leading `?` is
    /// ignored. When a key repeats, the last occurrence wins.
    pub fn from_query_str(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        form_urlencoded::parse(query.as_bytes()).collect()
    }

    /// Sets a single parameter, routing reserved keys to their named field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        let slot = match key.as_str() {
            "searchTerm" => Some(&mut self.search_term),
            "sort" => Some(&mut self.sort),
            "page" => Some(&mut self.page),
            "limit" => Some(&mut self.limit),
            "fields" => Some(&mut self.fields),
            _ => None,
        };

        match slot {
            Some(slot) => *slot = Some(value),
            None => {
                self.filters.insert(key, value);
            }
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// The trimmed search term, if one was sent and is not blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// The requested page, if it is a positive integer.
    pub fn page(&self) -> Option<u64> {
        parse_positive(self.page.as_deref())
    }

    /// The requested page size, if it is a positive integer.
    pub fn limit(&self) -> Option<u64> {
        parse_positive(self.limit.as_deref())
    }

    /// Sort keys in request order.
    pub fn sort_keys(&self) -> Option<Vec<&str>> {
        non_empty_list(self.sort.as_deref())
    }

    /// Selected fields in request order.
    pub fn field_list(&self) -> Option<Vec<&str>> {
        non_empty_list(self.fields.as_deref())
    }

    pub fn is_reserved(key: &str) -> bool {
        RESERVED_KEYS.contains(&key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::default();

        for (key, value) in iter {
            params.insert(key, value);
        }

        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok().filter(|value| *value >= 1)
}

/// Splits a comma separated list, dropping blank entries.
pub(crate) fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn non_empty_list(raw: Option<&str>) -> Option<Vec<&str>> {
    let items = split_list(raw?).collect::<Vec<_>>();

    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_keys_are_routed() {
        let params = QueryParams::from_query_str(
            "searchTerm=ms.x&sort=-createdAt,name&page=2&limit=5&fields=name,email&email=a%40b.com",
        );

        assert_eq!(params.search_term.as_deref(), Some("ms.x"));
        assert_eq!(params.sort_keys(), Some(vec!["-createdAt", "name"]));
        assert_eq!(params.page(), Some(2));
        assert_eq!(params.limit(), Some(5));
        assert_eq!(params.field_list(), Some(vec!["name", "email"]));
        assert_eq!(
            params.filters,
            BTreeMap::from([("email".to_string(), "a@b.com".to_string())])
        );
    }

    #[test]
    fn plus_decodes_to_space_and_last_value_wins() {
        let params = QueryParams::from_query_str("?searchTerm=kit+isaev&role=a&role=b");

        assert_eq!(params.search_term(), Some("kit isaev"));
        assert_eq!(params.filters["role"], "b");
    }

    #[test]
    fn malformed_numbers_are_absent() {
        for raw in ["abc", "0", "-3", "2.5", ""] {
            let params = QueryParams::new().with("page", raw).with("limit", raw);

            assert_eq!(params.page(), None, "page={raw}");
            assert_eq!(params.limit(), None, "limit={raw}");
        }

        assert_eq!(QueryParams::new().with("page", " 7 ").page(), Some(7));
    }

    #[test]
    fn blank_values_are_absent() {
        let params = QueryParams::new()
            .with("searchTerm", "   ")
            .with("sort", " , ")
            .with("fields", "");

        assert_eq!(params.search_term(), None);
        assert_eq!(params.sort_keys(), None);
        assert_eq!(params.field_list(), None);
    }

    #[test]
    fn deserializes_with_residual_filters() {
        let params: QueryParams = serde_json::from_value(serde_json::json!({
            "searchTerm": "chitta",
            "page": "3",
            "email": "nayeem@gmail.com",
            "status": "active",
        }))
        .unwrap();

        assert_eq!(params.search_term(), Some("chitta"));
        assert_eq!(params.page(), Some(3));
        assert_eq!(params.filters.len(), 2);
        assert!(params.filters.keys().all(|key| !QueryParams::is_reserved(key)));
    }
}
