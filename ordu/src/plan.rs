use mongodb::bson::{Bson, Document, doc};
use std::fmt::Display;

/// Direction of a sort key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn to_bson(self) -> Bson {
        match self {
            Self::Asc => Bson::Int32(1),
            Self::Desc => Bson::Int32(-1),
        }
    }
}

/// Parses one entry of a `sort` list: `-field` is descending, `field` and `+field` are
/// ascending. Returns `None` for an entry without a field name.
pub(crate) fn parse_sort_key(raw: &str) -> Option<(&str, Order)> {
    let (field, order) = match raw.strip_prefix('-') {
        Some(field) => (field, Order::Desc),
        None => (raw.strip_prefix('+').unwrap_or(raw), Order::Asc),
    };

    let field = field.trim();

    (!field.is_empty()).then_some((field, order))
}

/// A read operation that has been configured but not yet run.
///
/// Every part is stored as the document MongoDB expects, so a plan can be handed to a
/// collection unchanged or evaluated by [`MemoryCollection`](crate::MemoryCollection).
/// Restrictions are kept per origin (search, filter, caller supplied) and combined with
/// `$and` when the plan is read, which makes re-applying a builder step a replacement
/// rather than an accumulation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindPlan {
    pub(crate) search: Option<Document>,
    pub(crate) filter: Option<Document>,
    pub(crate) restrictions: Vec<Document>,
    pub(crate) sort: Option<Document>,
    pub(crate) skip: Option<u64>,
    pub(crate) limit: Option<u64>,
    pub(crate) projection: Option<Document>,
}

impl FindPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// The combined restriction: `{}` when there is none, the clause itself when there
    /// is one, `{ "$and": [...] }` otherwise.
    pub fn filter_document(&self) -> Document {
        let mut clauses = self
            .search
            .iter()
            .chain(&self.filter)
            .chain(&self.restrictions)
            .filter(|clause| !clause.is_empty())
            .cloned()
            .collect::<Vec<_>>();

        match clauses.len() {
            0 => doc! {},
            1 => clauses.remove(0),
            _ => doc! { "$and": clauses },
        }
    }

    pub fn sort_document(&self) -> Option<&Document> {
        self.sort.as_ref()
    }

    pub fn skip(&self) -> Option<u64> {
        self.skip
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn projection(&self) -> Option<&Document> {
        self.projection.as_ref()
    }

    /// Adds a restriction that is AND-ed with everything else in the plan.
    pub fn restrict(&mut self, clause: Document) {
        self.restrictions.push(clause);
    }

    pub fn set_sort<F: Display>(&mut self, keys: impl IntoIterator<Item = (F, Order)>) {
        let mut sort = doc! {};

        for (field, order) in keys {
            let field = field.to_string();
            // A repeated key keeps its first position; the later direction wins.
            sort.insert(field, order.to_bson());
        }

        self.sort = (!sort.is_empty()).then_some(sort);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plan_matches_everything() {
        assert_eq!(FindPlan::new().filter_document(), doc! {});
    }

    #[test]
    fn single_clause_is_not_wrapped() {
        let mut plan = FindPlan::new();
        plan.filter = Some(doc! { "email": "a@b.com" });

        assert_eq!(plan.filter_document(), doc! { "email": "a@b.com" });
    }

    #[test]
    fn clauses_are_and_ed_in_order() {
        let mut plan = FindPlan::new();
        plan.search = Some(doc! { "$or": [{ "name": { "$regex": "kit", "$options": "i" } }] });
        plan.filter = Some(doc! { "role": "admin" });
        plan.restrict(doc! { "age": { "$gte": 18 } });

        assert_eq!(
            plan.filter_document(),
            doc! {
                "$and": [
                    { "$or": [{ "name": { "$regex": "kit", "$options": "i" } }] },
                    { "role": "admin" },
                    { "age": { "$gte": 18 } },
                ]
            }
        );
    }

    #[test]
    fn sort_keys_keep_request_order() {
        let mut plan = FindPlan::new();
        plan.set_sort([("createdAt", Order::Desc), ("name", Order::Asc)]);

        let keys = plan
            .sort_document()
            .unwrap()
            .iter()
            .map(|(key, value)| (key.as_str(), value.clone()))
            .collect::<Vec<_>>();

        assert_eq!(
            keys,
            vec![("createdAt", Bson::Int32(-1)), ("name", Bson::Int32(1))]
        );
    }

    #[test]
    fn repeated_sort_key_keeps_position() {
        let mut plan = FindPlan::new();
        plan.set_sort([
            ("name", Order::Asc),
            ("email", Order::Asc),
            ("name", Order::Desc),
        ]);

        assert_eq!(
            plan.sort_document(),
            Some(&doc! { "name": -1, "email": 1 })
        );
    }

    #[test]
    fn sort_key_prefixes() {
        assert_eq!(parse_sort_key("-createdAt"), Some(("createdAt", Order::Desc)));
        assert_eq!(parse_sort_key("+name"), Some(("name", Order::Asc)));
        assert_eq!(parse_sort_key("email"), Some(("email", Order::Asc)));
        assert_eq!(parse_sort_key("-"), None);
    }
}
