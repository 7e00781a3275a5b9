use crate::{
    Entity, Error, FindPlan, QueryConfig, QueryParams, Result,
    params::split_list,
    plan::parse_sort_key,
    response::PageMeta,
    source::Source,
};
use mongodb::bson::{self, Bson, Document, doc};
use serde::de::DeserializeOwned;
use std::{fmt::Display, marker::PhantomData};

/// Turns the query parameters of one request into a configured read.
///
/// Each step reads the parameters it is responsible for and replaces its own part of
/// the [`FindPlan`]; calling a step twice has the same effect as calling it once, and
/// steps may be called in any order. Nothing touches the store until
/// [`execute`](Self::execute) or [`count_total`](Self::count_total).
///
/// ```
/// use ordu::{MemoryCollection, QueryBuilder, QueryParams};
/// use mongodb::bson::{Document, doc};
///
/// # futures_util::FutureExt::now_or_never(async {
/// let users = MemoryCollection::from_documents([
///     doc! { "_id": 1, "name": "Kit", "email": "kit@example.com", "createdAt": 2 },
///     doc! { "_id": 2, "name": "Ada", "email": "ada@example.com", "createdAt": 1 },
/// ]);
///
/// let params = QueryParams::from_query_str("searchTerm=KIT&fields=name");
///
/// let found: Vec<Document> = QueryBuilder::new(users, params)
///     .search(["name", "email"])
///     .filter()
///     .sort()
///     .paginate()
///     .fields()
///     .execute()
///     .await
///     .unwrap();
///
/// assert_eq!(found, vec![doc! { "_id": 1, "name": "Kit" }]);
/// # }).unwrap();
/// ```
#[derive(Debug)]
pub struct QueryBuilder<T, S> {
    source: S,
    params: QueryParams,
    config: QueryConfig,
    plan: FindPlan,
    rejected_projection: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T, S: Source> QueryBuilder<T, S> {
    pub fn new(source: S, params: QueryParams) -> Self {
        Self {
            source,
            params,
            config: QueryConfig::default(),
            plan: FindPlan::default(),
            rejected_projection: None,
            _marker: PhantomData,
        }
    }

    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn plan(&self) -> &FindPlan {
        &self.plan
    }

    /// Restricts to records where any of `searchable_fields` contains the search term,
    /// ignoring case. The term is matched literally.
    pub fn search<F: Display>(mut self, searchable_fields: impl IntoIterator<Item = F>) -> Self {
        self.plan.search = None;

        let Some(term) = self.params.search_term() else {
            return self;
        };

        let pattern = regex::escape(term);

        let alternatives = searchable_fields
            .into_iter()
            .map(|field| {
                let mut clause = Document::new();
                clause.insert(
                    field.to_string(),
                    doc! { "$regex": pattern.as_str(), "$options": "i" },
                );
                Bson::Document(clause)
            })
            .collect::<Vec<_>>();

        if alternatives.is_empty() {
            tracing::debug!(term, "search term given without searchable fields");
            return self;
        }

        tracing::debug!(term, fields = alternatives.len(), "applying search");

        self.plan.search = Some(doc! { "$or": alternatives });
        self
    }

    /// Restricts to records equal to every non-reserved parameter. Keys naming a query
    /// operator (any path segment starting with `$`) are ignored.
    pub fn filter(mut self) -> Self {
        let mut filter = Document::new();

        for (key, value) in &self.params.filters {
            if key.split('.').any(|segment| segment.starts_with('$')) {
                tracing::debug!(key, "ignoring operator key in filter");
                continue;
            }

            filter.insert(key.as_str(), value.as_str());
        }

        tracing::debug!(%filter, "applying filter");

        self.plan.filter = (!filter.is_empty()).then_some(filter);
        self
    }

    /// Orders by the `sort` parameter, falling back to the configured default sort.
    pub fn sort(mut self) -> Self {
        let requested = self.params.sort_keys();

        let mut keys: Vec<_> = requested
            .iter()
            .flatten()
            .copied()
            .filter_map(parse_sort_key)
            .collect();

        let default = keys.is_empty();
        if default {
            if let Some(raw) = &requested {
                tracing::debug!(?raw, "ignoring sort without usable keys");
            }

            keys = split_list(&self.config.default_sort)
                .filter_map(parse_sort_key)
                .collect();
        }

        tracing::debug!(?keys, default, "applying sort");

        self.plan.set_sort(keys);
        self
    }

    /// Skips `(page - 1) * limit` records and returns at most `limit`.
    pub fn paginate(mut self) -> Self {
        let (page, limit) = self.pagination();
        let skip = (page - 1).saturating_mul(limit);

        tracing::debug!(page, limit, skip, "applying pagination");

        self.plan.skip = Some(skip);
        self.plan.limit = Some(limit);
        self
    }

    /// Projects to the fields named in `fields`, or hides the version field when the
    /// parameter is absent. The id field is returned unless excluded with `-_id`.
    pub fn fields(mut self) -> Self {
        self.rejected_projection = None;

        let Some(fields) = self.params.field_list() else {
            self.plan.projection = Some(self.default_projection());
            return self;
        };

        let id_field = self.config.id_field.as_str();

        let mut included = Vec::new();
        let mut excluded = Vec::new();
        let mut with_id = None;

        for field in fields {
            let (name, include) = match field.strip_prefix('-') {
                Some(name) => (name.trim(), false),
                None => (field.strip_prefix('+').unwrap_or(field).trim(), true),
            };

            if name.is_empty() {
                continue;
            }

            if name == id_field {
                with_id = Some(include);
            } else if include {
                included.push(name);
            } else {
                excluded.push(name);
            }
        }

        if let (Some(_), Some(field)) = (included.first(), excluded.first()) {
            tracing::warn!(
                fields = self.params.fields.as_deref(),
                "rejecting projection that mixes inclusion and exclusion"
            );

            self.rejected_projection = Some((*field).to_owned());
            self.plan.projection = None;
            return self;
        }

        if included.is_empty() && excluded.is_empty() && with_id.is_none() {
            tracing::debug!(
                fields = self.params.fields.as_deref(),
                "ignoring field selection without usable names"
            );

            self.plan.projection = Some(self.default_projection());
            return self;
        }

        let mut projection = Document::new();
        let flag = i32::from(!included.is_empty());

        for name in included.iter().chain(&excluded) {
            projection.insert(*name, flag);
        }

        match with_id {
            Some(false) => {
                projection.insert(id_field, 0);
            }
            Some(true) if projection.is_empty() => {
                projection.insert(id_field, 1);
            }
            _ => {}
        }

        tracing::debug!(%projection, "applying field selection");

        self.plan.projection = (!projection.is_empty()).then_some(projection);
        self
    }

    fn default_projection(&self) -> Document {
        let mut projection = Document::new();
        projection.insert(self.config.version_field.as_str(), 0);
        projection
    }

    /// Adds a caller supplied restriction, AND-ed with search and filter.
    pub fn restrict(mut self, clause: Document) -> Self {
        self.plan.restrict(clause);
        self
    }

    /// Page and page size in effect, after defaults and clamping.
    pub fn pagination(&self) -> (u64, u64) {
        let page = self.params.page().unwrap_or_else(|| {
            if let Some(raw) = &self.params.page {
                tracing::debug!(raw, "ignoring malformed page");
            }
            self.config.page_or_default()
        });

        let limit = match self.params.limit() {
            Some(limit) => self.config.clamp_limit(limit),
            None => {
                if let Some(raw) = &self.params.limit {
                    tracing::debug!(raw, "ignoring malformed limit");
                }
                self.config.limit_or_default()
            }
        };

        (page, limit)
    }

    /// Counts every record matching the restrictions, ignoring pagination.
    pub async fn count_total(&mut self) -> Result<PageMeta> {
        let (page, limit) = self.pagination();
        let total = self.source.count(self.plan.filter_document()).await?;

        Ok(PageMeta {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        })
    }
}

impl<T: DeserializeOwned, S: Source> QueryBuilder<T, S> {
    /// Runs the composed read and deserializes every document into `T`.
    pub async fn execute(mut self) -> Result<Vec<T>> {
        if let Some(field) = self.rejected_projection.take() {
            return Err(Error::MixedProjection { field });
        }

        let documents = self.source.find(&self.plan).await?;

        tracing::debug!(count = documents.len(), "query executed");

        let records = documents
            .into_iter()
            .map(bson::from_document)
            .collect::<Result<Vec<T>, _>>()?;

        Ok(records)
    }
}

impl<E: Entity, S: Source> QueryBuilder<E, S> {
    /// Searches the fields the entity declares as searchable.
    pub fn search_entity(self) -> Self {
        self.search(E::SEARCHABLE_FIELDS)
    }
}
