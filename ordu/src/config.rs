use serde::Deserialize;

/// Defaults applied by [`QueryBuilder`](crate::QueryBuilder) when a request leaves a
/// parameter out or sends something unusable.
///
/// Deserializes from camelCase keys and fills every missing key with its default, so
/// a config section only needs to name what it overrides:
///
/// ```
/// let config: ordu::QueryConfig = serde_json::from_str(r#"{ "maxLimit": 100 }"#).unwrap();
///
/// assert_eq!(config.max_limit, Some(100));
/// assert_eq!(config.default_limit, 10);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryConfig {
    pub default_page: u64,
    pub default_limit: u64,
    /// Upper bound for `limit`. Unbounded when `None`.
    pub max_limit: Option<u64>,
    /// Sort expression used when the request has none, in `sort` parameter syntax.
    pub default_sort: String,
    pub id_field: String,
    /// Field hidden from results when the request does not select fields.
    pub version_field: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_limit: 10,
            max_limit: None,
            default_sort: "-createdAt".into(),
            id_field: "_id".into(),
            version_field: "__v".into(),
        }
    }
}

impl QueryConfig {
    pub(crate) fn page_or_default(&self) -> u64 {
        self.default_page.max(1)
    }

    pub(crate) fn limit_or_default(&self) -> u64 {
        self.clamp_limit(self.default_limit.max(1))
    }

    pub(crate) fn clamp_limit(&self, limit: u64) -> u64 {
        match self.max_limit {
            Some(max) => limit.min(max.max(1)),
            None => limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: QueryConfig =
            serde_json::from_str(r#"{ "defaultLimit": 25, "maxLimit": 50 }"#).unwrap();

        assert_eq!(config.default_limit, 25);
        assert_eq!(config.max_limit, Some(50));
        assert_eq!(config.default_page, 1);
        assert_eq!(config.default_sort, "-createdAt");
        assert_eq!(config.version_field, "__v");
    }

    #[test]
    fn zero_defaults_are_coerced() {
        let config = QueryConfig {
            default_page: 0,
            default_limit: 0,
            ..Default::default()
        };

        assert_eq!(config.page_or_default(), 1);
        assert_eq!(config.limit_or_default(), 1);
    }

    #[test]
    fn clamp_respects_max_limit() {
        let config = QueryConfig {
            max_limit: Some(20),
            ..Default::default()
        };

        assert_eq!(config.clamp_limit(500), 20);
        assert_eq!(config.clamp_limit(5), 5);
        assert_eq!(QueryConfig::default().clamp_limit(500), 500);
    }
}
