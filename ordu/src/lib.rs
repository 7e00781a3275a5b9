//! Ordu turns the query string of an HTTP request into a `MongoDB` read.
//!
//! ## Example
//!
//! ```ignore
//! // Define an entity
//! #[derive(Serialize, Deserialize, Entity)]
//! #[entity(searchable(name, email))]
//! struct User {
//!   #[serde(rename = "_id")]
//!   id: ObjectId,
//!   name: String,
//!   email: String,
//!   #[serde(rename = "createdAt")]
//!   created_at: bson::DateTime,
//! }
//!
//! // GET /users?searchTerm=kit&role=admin&sort=-createdAt,name&page=2&limit=5&fields=name,email
//! let params = QueryParams::from_query_str(request.uri().query().unwrap_or_default());
//!
//! let mut query = User::query(mongo, params)
//!   .search_entity() // name or email contains "kit", ignoring case
//!   .filter()        // role == "admin"
//!   .sort()          // newest first, then by name
//!   .paginate()      // skip 5, limit 5
//!   .fields();       // only _id, name and email
//!
//! let meta = query.count_total().await?;
//! let users: Vec<UserSummary> = query.execute().await?;
//!
//! let body = Envelope::ok("Users retrieved successfully", users).with_meta(meta);
//! ```
//!
//! See [`guides`] module to learn more!

#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc
)]

use serde::de::DeserializeOwned;
use std::fmt::Display;

pub use ordu_macros::Entity;

pub use builder::QueryBuilder;
pub use config::QueryConfig;
pub use error::{Error, Result};
pub use memory::MemoryCollection;
pub use mongo::{Mongo, MongoSource};
pub use params::{QueryParams, RESERVED_KEYS};
pub use plan::{FindPlan, Order};
pub use response::{Envelope, PageMeta};
pub use source::Source;

mod builder;
mod config;
mod error;
pub mod guides;
mod memory;
mod mongo;
mod params;
mod plan;
mod response;
mod source;

/// A type stored in a `MongoDB` collection that can be queried from request parameters.
///
/// Usually derived; see [`guides`].
pub trait Entity: DeserializeOwned + Send + 'static {
    /// Stored field names, as written in documents.
    type Fields: Display + Send + 'static;

    const COLLECTION_NAME: &'static str;

    /// Fields matched by [`QueryBuilder::search_entity`].
    const SEARCHABLE_FIELDS: &'static [&'static str];

    fn source(mongo: Mongo<'_>) -> MongoSource<'_> {
        MongoSource::new(mongo, Self::COLLECTION_NAME)
    }

    fn query(mongo: Mongo<'_>, params: QueryParams) -> QueryBuilder<Self, MongoSource<'_>> {
        QueryBuilder::new(Self::source(mongo), params)
    }
}
