use crate::{FindPlan, Result};
use futures_util::future::BoxFuture;
use mongodb::bson::Document;

/// A collection a [`FindPlan`] can be run against.
///
/// Implemented for MongoDB collections ([`MongoSource`](crate::MongoSource)) and for
/// in-memory data ([`MemoryCollection`](crate::MemoryCollection)). Errors are returned
/// as the store produced them.
pub trait Source: Send {
    /// Runs the plan and returns the matching documents in plan order.
    fn find<'a>(&'a mut self, plan: &'a FindPlan) -> BoxFuture<'a, Result<Vec<Document>>>;

    /// Counts the documents matching `filter`.
    fn count<'a>(&'a mut self, filter: Document) -> BoxFuture<'a, Result<u64>>;
}

impl<S: Source + ?Sized> Source for &mut S {
    fn find<'a>(&'a mut self, plan: &'a FindPlan) -> BoxFuture<'a, Result<Vec<Document>>> {
        (**self).find(plan)
    }

    fn count<'a>(&'a mut self, filter: Document) -> BoxFuture<'a, Result<u64>> {
        (**self).count(filter)
    }
}
