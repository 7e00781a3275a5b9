use crate::{FindPlan, Result, source::Source};
use futures_util::{FutureExt, TryStreamExt, future::BoxFuture};
use mongodb::{ClientSession, Collection, Database, bson::Document};

/// A database handle, optionally bound to a session.
#[derive(Debug)]
pub struct Mongo<'a> {
    pub db: &'a Database,
    pub session: Option<&'a mut ClientSession>,
}

impl<'a> Mongo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db, session: None }
    }

    pub fn new_with_session(db: &'a Database, session: &'a mut ClientSession) -> Self {
        Self {
            db,
            session: Some(session),
        }
    }
}

impl<'a> From<&'a Database> for Mongo<'a> {
    fn from(value: &'a Database) -> Self {
        Self::new(value)
    }
}

impl<'a> From<(&'a Database, &'a mut ClientSession)> for Mongo<'a> {
    fn from(value: (&'a Database, &'a mut ClientSession)) -> Self {
        Self::new_with_session(value.0, value.1)
    }
}

#[macro_export]
macro_rules! with_session {
    ($query: expr, $session: expr) => {
        match $session {
            Some(session) => $query.session(session),
            None => $query,
        }
    };
}

/// A MongoDB collection as a [`Source`]. Documents are read untyped; the
/// [`QueryBuilder`](crate::QueryBuilder) deserializes them.
#[derive(Debug)]
pub struct MongoSource<'a> {
    collection: Collection<Document>,
    session: Option<&'a mut ClientSession>,
}

impl<'a> MongoSource<'a> {
    pub fn new(mongo: Mongo<'a>, collection_name: &str) -> Self {
        let Mongo { db, session } = mongo;

        Self {
            collection: db.collection(collection_name),
            session,
        }
    }

    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }
}

impl Source for MongoSource<'_> {
    fn find<'a>(&'a mut self, plan: &'a FindPlan) -> BoxFuture<'a, Result<Vec<Document>>> {
        async move {
            let filter = plan.filter_document();

            tracing::trace!(
                collection = self.collection.name(),
                %filter,
                sort = ?plan.sort_document(),
                skip = ?plan.skip(),
                limit = ?plan.limit(),
                projection = ?plan.projection(),
                "find"
            );

            let mut query = self.collection.find(filter);

            if let Some(sort) = plan.sort_document() {
                query = query.sort(sort.clone());
            }

            if let Some(skip) = plan.skip() {
                query = query.skip(skip);
            }

            if let Some(limit) = plan.limit() {
                query = query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
            }

            if let Some(projection) = plan.projection() {
                query = query.projection(projection.clone());
            }

            let documents = match self.session.as_deref_mut() {
                Some(session) => {
                    query
                        .session(&mut *session)
                        .await?
                        .stream(&mut *session)
                        .try_collect::<Vec<_>>()
                        .await
                }
                None => query.await?.try_collect::<Vec<_>>().await,
            }?;

            Ok(documents)
        }
        .boxed()
    }

    fn count<'a>(&'a mut self, filter: Document) -> BoxFuture<'a, Result<u64>> {
        async move {
            tracing::trace!(collection = self.collection.name(), %filter, "count");

            let count = with_session!(
                self.collection.count_documents(filter),
                self.session.as_deref_mut()
            )
            .await?;

            Ok(count)
        }
        .boxed()
    }
}
