use mongodb::bson;

/// Errors surfaced when a composed query is run.
///
/// Building a query never fails. Everything below is reported by
/// [`QueryBuilder::execute`](crate::QueryBuilder::execute) or
/// [`QueryBuilder::count_total`](crate::QueryBuilder::count_total).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("failed to deserialize document: {0}")]
    Deserialize(#[from] bson::de::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] bson::ser::Error),

    #[error("projection mixes inclusion and exclusion (at field `{field}`)")]
    MixedProjection { field: String },

    #[error("unsupported query operator `{0}`")]
    UnsupportedOperator(String),

    #[error("values of type `{0}` cannot be compared")]
    UnsupportedType(&'static str),

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
