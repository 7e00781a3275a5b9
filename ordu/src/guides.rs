/// ## Getting started
///
/// A handler that lists records usually needs the same five things: a text search, a
/// few equality filters, a sort order, a page, and a choice of fields. Ordu reads all of
/// them from the request's query string and builds the matching `MongoDB` query.
///
/// ### Deriving `Entity`
///
/// The [`Entity`](crate::Entity) trait maps a Rust type to a collection. A type that
/// derives it must be a struct with named fields that implements
/// [`Deserialize`](serde::Deserialize).
///
/// ```ignore
/// use serde::{Deserialize, Serialize};
/// use ordu::Entity;
/// use mongodb::bson::oid::ObjectId;
///
/// #[derive(Serialize, Deserialize, Entity)]
/// #[entity(searchable(name, email))]
/// struct User {
///   #[serde(rename = "_id")]
///   id: ObjectId,
///   name: String,
///   email: String,
/// }
/// ```
///
/// By default, the collection name is the `snake_case` form of the struct name
/// (e.g., `User` → `user`, `BlogPostEntity` → `blog_post`). You can override it using
/// `#[entity(collection = "users")]`.
///
/// `#[entity(searchable(...))]` lists the fields used by
/// [`search_entity`](crate::QueryBuilder::search_entity). Each entry must name a field
/// of the struct; `#[serde(rename = "...")]` is honoured, so the stored name ends up in
/// the query.
///
/// The derive also generates a helper module named after the entity with a `Fields`
/// enum holding the stored name of every field:
///
/// ```ignore
/// assert_eq!(user::Fields::Id.to_string(), "_id");
/// assert_eq!(user::Fields::ALL.len(), 3);
/// ```
///
/// ### Running a query
///
/// [`Entity::query`](crate::Entity::query) wraps a [`Mongo`](crate::Mongo) handle and the
/// request parameters in a [`QueryBuilder`](crate::QueryBuilder):
///
/// ```ignore
/// let params = QueryParams::from_query_str("searchTerm=kit&page=2&limit=5");
///
/// let users: Vec<User> = User::query(db.into(), params)
///     .search_entity()
///     .filter()
///     .sort()
///     .paginate()
///     .fields()
///     .execute()
///     .await?;
/// ```
///
/// ### Parameter overview
///
/// | Parameter    | Builder step  | Example                  | Resulting `MongoDB` query part                                        |
/// |--------------|---------------|--------------------------|-----------------------------------------------------------------------|
/// | `searchTerm` | `search`      | `searchTerm=ms.x`        | `{ $or: [{ name: { $regex: "ms\\.x", $options: "i" } }, ...] }`       |
/// | any other    | `filter`      | `email=a@b.com`          | `{ email: "a@b.com" }`                                                |
/// | `sort`       | `sort`        | `sort=-createdAt,name`   | `.sort({ createdAt: -1, name: 1 })`, default `{ createdAt: -1 }`      |
/// | `page`       | `paginate`    | `page=2&limit=5`         | `.skip(5).limit(5)`, default page 1                                   |
/// | `limit`      | `paginate`    | `limit=5`                | `.limit(5)`, default 10                                               |
/// | `fields`     | `fields`      | `fields=name,email`      | `.projection({ name: 1, email: 1 })`, default `{ __v: 0 }`            |
///
/// Search and filter restrictions are combined with `$and`.
mod getting_started {}

/// ### Lenient parameters
///
/// Query strings are written by clients, and the builder never fails on them:
///
/// - `page` and `limit` that are missing, not integers, zero or negative fall back to
///   the configured defaults (1 and 10).
/// - a `searchTerm` that is blank after trimming adds no restriction.
/// - blank entries in `sort` and `fields` lists are skipped; a list with no usable
///   entry, such as `sort=-`, means the default applies.
/// - filter keys naming a query operator, such as `$where`, are ignored.
///
/// The one request the builder rejects is a `fields` list that mixes inclusions and
/// exclusions, such as `fields=name,-password`, which `MongoDB` would refuse as well.
/// The builder drops the projection and [`execute`](crate::QueryBuilder::execute)
/// returns [`Error::MixedProjection`](crate::Error::MixedProjection). `_id` is the
/// exception: `fields=name,-_id` is fine.
///
/// ### Configuration
///
/// Defaults live in [`QueryConfig`](crate::QueryConfig), which deserializes from
/// camelCase keys so it can be read from an application's config file:
///
/// ```ignore
/// let config: QueryConfig = serde_json::from_str(r#"{ "defaultLimit": 20, "maxLimit": 100 }"#)?;
///
/// let query = User::query(mongo, params).with_config(config);
/// ```
///
/// `maxLimit` caps the page size a client can ask for.
mod parameters_and_defaults {}

/// ### Pagination metadata
///
/// [`count_total`](crate::QueryBuilder::count_total) counts the documents matching the
/// search and filter steps, ignoring skip and limit, and reports the page in effect:
///
/// ```ignore
/// let mut query = User::query(mongo, params).search_entity().filter().paginate();
///
/// let meta = query.count_total().await?;
/// let users: Vec<User> = query.execute().await?;
///
/// Envelope::ok("Users retrieved successfully", users).with_meta(meta)
/// ```
///
/// [`Envelope`](crate::Envelope) serializes to
/// `{ "success": true, "message": "...", "meta": { "page", "limit", "total", "totalPages" }, "data": [...] }`.
mod pagination {}

/// ### Testing without a database
///
/// [`MemoryCollection`](crate::MemoryCollection) implements [`Source`](crate::Source)
/// over documents held in memory, evaluating filters, sorts and projections the way
/// `MongoDB` does. Pass it to [`QueryBuilder::new`](crate::QueryBuilder::new) in place of
/// a collection:
///
/// ```ignore
/// let users = MemoryCollection::from_records(&fixtures)?;
///
/// let found: Vec<User> = QueryBuilder::new(users, params).search_entity().execute().await?;
/// ```
mod testing {}

/// This library is named "Ordu" after the camp of a khan, where the herd is gathered.
mod naming {}
