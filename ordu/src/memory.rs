use crate::{Error, FindPlan, Result, source::Source};
use dashmap::DashMap;
use futures_util::{
    FutureExt,
    future::{self, BoxFuture},
};
use mongodb::bson::{self, Bson, Document};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::{cmp::Ordering, sync::LazyLock};

/// An in-memory collection that evaluates [`FindPlan`]s the way MongoDB would.
///
/// Supports the operators the builder produces (`$and`, `$or`, `$regex` with
/// `$options`, implicit equality) and the common comparison operators (`$eq`, `$ne`,
/// `$gt`, `$gte`, `$lt`, `$lte`, `$in`, `$nin`, `$exists`, `$nor`). Dotted paths
/// address embedded documents. Sorting follows MongoDB's cross-type ordering.
///
/// `Decimal128` values cannot be compared: a filter or sort that reaches one fails with
/// [`Error::UnsupportedType`].
///
/// Useful for tests, fixtures and small static datasets.
#[derive(Clone, Debug, Default)]
pub struct MemoryCollection {
    documents: Vec<Document>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        Self {
            documents: documents.into_iter().collect(),
        }
    }

    /// Serializes each record into a document.
    pub fn from_records<'a, T: Serialize + 'a>(
        records: impl IntoIterator<Item = &'a T>,
    ) -> Result<Self> {
        let documents = records
            .into_iter()
            .map(bson::to_document)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { documents })
    }

    pub fn insert(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Evaluates a plan synchronously.
    pub fn run(&self, plan: &FindPlan) -> Result<Vec<Document>> {
        let filter = plan.filter_document();

        let mut matched = Vec::new();
        for document in &self.documents {
            if matches(document, &filter)? {
                matched.push(document);
            }
        }

        if let Some(sort) = plan.sort_document() {
            let keys = sort
                .iter()
                .map(|(field, direction)| (field.as_str(), is_descending(direction)))
                .collect::<Vec<_>>();

            for document in &matched {
                for (field, _) in &keys {
                    comparable(lookup(document, field))?;
                }
            }

            matched.sort_by(|a, b| {
                keys.iter()
                    .map(|(field, descending)| {
                        let ordering = compare(lookup(a, field), lookup(b, field));
                        if *descending {
                            ordering.reverse()
                        } else {
                            ordering
                        }
                    })
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
        }

        let skip = plan.skip().map_or(0, saturating_usize);
        let limit = plan.limit().map_or(usize::MAX, saturating_usize);

        matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|document| match plan.projection() {
                Some(projection) => project(document, projection),
                None => Ok(document.clone()),
            })
            .collect()
    }

    pub fn count_matching(&self, filter: &Document) -> Result<u64> {
        let mut count = 0;
        for document in &self.documents {
            if matches(document, filter)? {
                count += 1;
            }
        }

        Ok(count)
    }
}

impl Source for MemoryCollection {
    fn find<'a>(&'a mut self, plan: &'a FindPlan) -> BoxFuture<'a, Result<Vec<Document>>> {
        future::ready(self.run(plan)).boxed()
    }

    fn count<'a>(&'a mut self, filter: Document) -> BoxFuture<'a, Result<u64>> {
        future::ready(self.count_matching(&filter)).boxed()
    }
}

fn saturating_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;

    for segment in segments {
        match current {
            Bson::Document(inner) => current = inner.get(segment)?,
            _ => return None,
        }
    }

    Some(current)
}

fn matches(document: &Document, filter: &Document) -> Result<bool> {
    for (key, condition) in filter {
        let matched = match key.as_str() {
            "$and" => {
                let mut all = true;
                for clause in clauses(key, condition)? {
                    if !matches(document, clause)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            "$or" => any_clause(document, key, condition)?,
            "$nor" => !any_clause(document, key, condition)?,
            operator if operator.starts_with('$') => {
                return Err(Error::UnsupportedOperator(operator.to_owned()));
            }
            path => matches_condition(lookup(document, path), condition)?,
        };

        if !matched {
            return Ok(false);
        }
    }

    Ok(true)
}

fn any_clause(document: &Document, key: &str, condition: &Bson) -> Result<bool> {
    for clause in clauses(key, condition)? {
        if matches(document, clause)? {
            return Ok(true);
        }
    }

    Ok(false)
}

fn clauses<'a>(key: &str, condition: &'a Bson) -> Result<Vec<&'a Document>> {
    let Bson::Array(items) = condition else {
        return Err(Error::UnsupportedOperator(format!("{key} expects an array")));
    };

    items
        .iter()
        .map(|item| match item {
            Bson::Document(clause) => Ok(clause),
            _ => Err(Error::UnsupportedOperator(format!(
                "{key} expects an array of documents"
            ))),
        })
        .collect()
}

fn is_operator_document(document: &Document) -> bool {
    !document.is_empty() && document.keys().all(|key| key.starts_with('$'))
}

fn matches_condition(value: Option<&Bson>, condition: &Bson) -> Result<bool> {
    comparable(value)?;
    comparable(Some(condition))?;

    match condition {
        Bson::Document(operators) if is_operator_document(operators) => {
            for (operator, operand) in operators {
                if !matches_operator(value, operator, operand, operators)? {
                    return Ok(false);
                }
            }

            Ok(true)
        }
        Bson::RegularExpression(regex) => matches_regex(value, &regex.pattern, &regex.options),
        _ => Ok(equals(value, condition)),
    }
}

fn matches_operator(
    value: Option<&Bson>,
    operator: &str,
    operand: &Bson,
    operators: &Document,
) -> Result<bool> {
    let matched = match operator {
        "$eq" => equals(value, operand),
        "$ne" => !equals(value, operand),
        "$gt" => compares(value, operand, Ordering::is_gt),
        "$gte" => compares(value, operand, Ordering::is_ge),
        "$lt" => compares(value, operand, Ordering::is_lt),
        "$lte" => compares(value, operand, Ordering::is_le),
        "$in" => in_list(value, operator, operand)?,
        "$nin" => !in_list(value, operator, operand)?,
        "$exists" => value.is_some() == truthy(operand),
        "$regex" => {
            let options = operators.get_str("$options").unwrap_or_default();
            match operand {
                Bson::String(pattern) => matches_regex(value, pattern, options)?,
                Bson::RegularExpression(regex) => {
                    let options = if options.is_empty() {
                        regex.options.as_str()
                    } else {
                        options
                    };
                    matches_regex(value, &regex.pattern, options)?
                }
                _ => return Err(Error::UnsupportedOperator("$regex expects a string".into())),
            }
        }
        // Read together with `$regex`.
        "$options" => true,
        other => return Err(Error::UnsupportedOperator(other.to_owned())),
    };

    Ok(matched)
}

fn in_list(value: Option<&Bson>, operator: &str, operand: &Bson) -> Result<bool> {
    let Bson::Array(candidates) = operand else {
        return Err(Error::UnsupportedOperator(format!(
            "{operator} expects an array"
        )));
    };

    Ok(candidates.iter().any(|candidate| equals(value, candidate)))
}

/// Equality with MongoDB's array semantics: an array field matches a scalar it contains.
fn equals(value: Option<&Bson>, expected: &Bson) -> bool {
    match (value, expected) {
        (None | Some(Bson::Null), Bson::Null) => true,
        (None, _) => false,
        (Some(Bson::Array(items)), expected) if !matches!(expected, Bson::Array(_)) => items
            .iter()
            .any(|item| compare(Some(item), Some(expected)).is_eq() && same_class(item, expected)),
        (Some(value), expected) => {
            same_class(value, expected) && compare(Some(value), Some(expected)).is_eq()
        }
    }
}

fn compares(value: Option<&Bson>, operand: &Bson, accept: fn(Ordering) -> bool) -> bool {
    // Range operators only match values of the same type class.
    match value {
        Some(value) if same_class(value, operand) => accept(compare(Some(value), Some(operand))),
        _ => false,
    }
}

fn same_class(a: &Bson, b: &Bson) -> bool {
    type_rank(Some(a)) == type_rank(Some(b))
}

fn truthy(value: &Bson) -> bool {
    match value {
        Bson::Boolean(flag) => *flag,
        Bson::Int32(number) => *number != 0,
        Bson::Int64(number) => *number != 0,
        Bson::Double(number) => *number != 0.0,
        Bson::Null | Bson::Undefined => false,
        _ => true,
    }
}

fn is_descending(direction: &Bson) -> bool {
    match direction {
        Bson::String(direction) => {
            direction.eq_ignore_ascii_case("desc") || direction.eq_ignore_ascii_case("descending")
        }
        other => as_f64(other).is_some_and(|number| number < 0.0),
    }
}

static PATTERNS: LazyLock<DashMap<(String, String), Regex>> = LazyLock::new(DashMap::new);

fn compile(pattern: &str, options: &str) -> Result<Regex> {
    let key = (pattern.to_owned(), options.to_owned());

    if let Some(regex) = PATTERNS.get(&key) {
        return Ok(regex.clone());
    }

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(options.contains('i'))
        .multi_line(options.contains('m'))
        .dot_matches_new_line(options.contains('s'))
        .ignore_whitespace(options.contains('x'))
        .build()
        .map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;

    PATTERNS.insert(key, regex.clone());

    Ok(regex)
}

fn matches_regex(value: Option<&Bson>, pattern: &str, options: &str) -> Result<bool> {
    let regex = compile(pattern, options)?;

    let matched = match value {
        Some(Bson::String(text) | Bson::Symbol(text)) => regex.is_match(text),
        Some(Bson::Array(items)) => items.iter().any(|item| match item {
            Bson::String(text) | Bson::Symbol(text) => regex.is_match(text),
            _ => false,
        }),
        _ => false,
    };

    Ok(matched)
}

fn type_rank(value: Option<&Bson>) -> u8 {
    match value {
        Some(Bson::MinKey) => 0,
        None | Some(Bson::Null | Bson::Undefined) => 1,
        Some(Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_)) => 2,
        Some(Bson::String(_) | Bson::Symbol(_)) => 3,
        Some(Bson::Document(_)) => 4,
        Some(Bson::Array(_)) => 5,
        Some(Bson::Binary(_)) => 6,
        Some(Bson::ObjectId(_)) => 7,
        Some(Bson::Boolean(_)) => 8,
        Some(Bson::DateTime(_)) => 9,
        Some(Bson::Timestamp(_)) => 10,
        Some(Bson::RegularExpression(_)) => 11,
        Some(Bson::MaxKey) => 13,
        Some(_) => 12,
    }
}

/// Fails for values holding a `Decimal128`, which has no ordering here.
fn comparable(value: Option<&Bson>) -> Result<()> {
    let found = match value {
        Some(Bson::Decimal128(_)) => true,
        Some(Bson::Array(items)) => items.iter().any(|item| comparable(Some(item)).is_err()),
        Some(Bson::Document(document)) => document
            .values()
            .any(|item| comparable(Some(item)).is_err()),
        _ => false,
    };

    if found {
        return Err(Error::UnsupportedType("Decimal128"));
    }

    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(number) => Some(f64::from(*number)),
        Bson::Int64(number) => Some(*number as f64),
        Bson::Double(number) => Some(*number),
        _ => None,
    }
}

fn as_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(number) => Some(i64::from(*number)),
        Bson::Int64(number) => Some(*number),
        _ => None,
    }
}

/// Total order over BSON values following MongoDB's comparison/sort order.
fn compare(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let rank = type_rank(a).cmp(&type_rank(b));
    if rank.is_ne() {
        return rank;
    }

    let (Some(a), Some(b)) = (a, b) else {
        return Ordering::Equal;
    };

    match (a, b) {
        (Bson::String(a) | Bson::Symbol(a), Bson::String(b) | Bson::Symbol(b)) => a.cmp(b),
        (Bson::Document(a), Bson::Document(b)) => a
            .iter()
            .zip(b.iter())
            .map(|((ka, va), (kb, vb))| ka.cmp(kb).then_with(|| compare(Some(va), Some(vb))))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        (Bson::Array(a), Bson::Array(b)) => a
            .iter()
            .zip(b.iter())
            .map(|(va, vb)| compare(Some(va), Some(vb)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        (Bson::Binary(a), Bson::Binary(b)) => a.bytes.cmp(&b.bytes),
        (Bson::ObjectId(a), Bson::ObjectId(b)) => a.bytes().cmp(&b.bytes()),
        (Bson::Boolean(a), Bson::Boolean(b)) => a.cmp(b),
        (Bson::DateTime(a), Bson::DateTime(b)) => a.cmp(b),
        (Bson::Timestamp(a), Bson::Timestamp(b)) => {
            (a.time, a.increment).cmp(&(b.time, b.increment))
        }
        (Bson::RegularExpression(a), Bson::RegularExpression(b)) => {
            (&a.pattern, &a.options).cmp(&(&b.pattern, &b.options))
        }
        (a, b) => match (as_i64(a), as_i64(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => match (as_f64(a), as_f64(b)) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => Ordering::Equal,
            },
        },
    }
}

fn project(document: &Document, projection: &Document) -> Result<Document> {
    let mut included = Vec::new();
    let mut excluded = Vec::new();
    let mut keep_id = true;

    for (path, flag) in projection {
        if path == "_id" {
            keep_id = truthy(flag);
        } else if truthy(flag) {
            included.push(path.split('.').collect::<Vec<_>>());
        } else {
            excluded.push(path.split('.').collect::<Vec<_>>());
        }
    }

    if let (Some(_), Some(field)) = (included.first(), excluded.first()) {
        return Err(Error::MixedProjection {
            field: field.join("."),
        });
    }

    let mut output = if included.is_empty() {
        exclude_paths(document, &excluded)
    } else {
        include_paths(document, &included)
    };

    match document.get("_id") {
        Some(id) if keep_id && !included.is_empty() => {
            // `_id` leads the document, as MongoDB returns it.
            let mut with_id = Document::new();
            with_id.insert("_id", id.clone());
            for (key, value) in output {
                with_id.insert(key, value);
            }
            output = with_id;
        }
        Some(_) if !keep_id => {
            output.remove("_id");
        }
        _ => {}
    }

    Ok(output)
}

fn include_paths(document: &Document, paths: &[Vec<&str>]) -> Document {
    let mut output = Document::new();

    for (key, value) in document {
        let nested = paths
            .iter()
            .filter(|path| path[0] == key.as_str())
            .map(|path| path[1..].to_vec())
            .collect::<Vec<_>>();

        if nested.is_empty() {
            continue;
        }

        if nested.iter().any(Vec::is_empty) {
            output.insert(key, value.clone());
        } else if let Bson::Document(inner) = value {
            let inner = include_paths(inner, &nested);
            if !inner.is_empty() {
                output.insert(key, inner);
            }
        }
    }

    output
}

fn exclude_paths(document: &Document, paths: &[Vec<&str>]) -> Document {
    let mut output = Document::new();

    for (key, value) in document {
        let nested = paths
            .iter()
            .filter(|path| path[0] == key.as_str())
            .map(|path| path[1..].to_vec())
            .collect::<Vec<_>>();

        if nested.iter().any(Vec::is_empty) {
            continue;
        }

        match value {
            Bson::Document(inner) if !nested.is_empty() => {
                output.insert(key, exclude_paths(inner, &nested));
            }
            _ => {
                output.insert(key, value.clone());
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Order;
    use mongodb::bson::{doc, oid::ObjectId};

    fn people() -> MemoryCollection {
        MemoryCollection::from_documents([
            doc! { "_id": 1, "name": "Kit", "email": "kit@example.com", "age": 31, "__v": 0 },
            doc! { "_id": 2, "name": "Ms.X", "email": "x@example.com", "age": 25, "__v": 0 },
            doc! { "_id": 3, "name": "Msax", "email": "msax@example.com", "age": 40, "__v": 2 },
            doc! { "_id": 4, "name": "Ada", "email": "ada@MS.X.org", "__v": 1 },
        ])
    }

    fn ids(documents: &[Document]) -> Vec<i32> {
        documents
            .iter()
            .map(|document| document.get_i32("_id").unwrap())
            .collect()
    }

    #[test]
    fn regex_is_case_insensitive_with_option() {
        let collection = people();
        let filter = doc! { "$or": [
            { "name": { "$regex": "ms\\.x", "$options": "i" } },
            { "email": { "$regex": "ms\\.x", "$options": "i" } },
        ] };

        let mut plan = FindPlan::new();
        plan.restrict(filter);

        assert_eq!(ids(&collection.run(&plan).unwrap()), vec![2, 4]);
    }

    #[test]
    fn comparison_operators() {
        let collection = people();

        assert_eq!(
            collection
                .count_matching(&doc! { "age": { "$gte": 25, "$lt": 40 } })
                .unwrap(),
            2
        );
        assert_eq!(
            collection
                .count_matching(&doc! { "age": { "$exists": false } })
                .unwrap(),
            1
        );
        assert_eq!(
            collection
                .count_matching(&doc! { "name": { "$in": ["Kit", "Ada"] } })
                .unwrap(),
            2
        );
        assert_eq!(
            collection
                .count_matching(&doc! { "$nor": [{ "name": "Kit" }] })
                .unwrap(),
            3
        );
    }

    #[test]
    fn numbers_compare_across_types() {
        let collection = MemoryCollection::from_documents([doc! { "n": 2_i64 }, doc! { "n": 2.5 }]);

        assert_eq!(collection.count_matching(&doc! { "n": 2 }).unwrap(), 1);
        assert_eq!(
            collection
                .count_matching(&doc! { "n": { "$gt": 2 } })
                .unwrap(),
            1
        );
    }

    #[test]
    fn string_does_not_equal_number() {
        let collection = people();

        assert_eq!(collection.count_matching(&doc! { "age": "31" }).unwrap(), 0);
    }

    #[test]
    fn dotted_paths_and_arrays() {
        let collection = MemoryCollection::from_documents([
            doc! { "profile": { "city": "Ulaanbaatar" }, "tags": ["a", "b"] },
            doc! { "profile": { "city": "Dhaka" }, "tags": ["c"] },
        ]);

        assert_eq!(
            collection
                .count_matching(&doc! { "profile.city": "Dhaka" })
                .unwrap(),
            1
        );
        assert_eq!(collection.count_matching(&doc! { "tags": "b" }).unwrap(), 1);
    }

    #[test]
    fn unsupported_operator_is_reported() {
        let result = people().count_matching(&doc! { "age": { "$mod": [2, 0] } });

        assert!(matches!(result, Err(Error::UnsupportedOperator(op)) if op == "$mod"));
    }

    #[test]
    fn decimal_values_are_rejected() {
        let decimal = Bson::Decimal128(bson::Decimal128::from_bytes([0; 16]));

        let mut stored = doc! { "_id": 1, "n": 5 };
        stored.insert("price", decimal.clone());
        let collection = MemoryCollection::from_documents([stored, doc! { "_id": 2, "n": 5 }]);

        let mut filter = Document::new();
        filter.insert("n", decimal);
        assert!(matches!(
            collection.count_matching(&filter),
            Err(Error::UnsupportedType("Decimal128"))
        ));

        assert!(matches!(
            collection.count_matching(&doc! { "price": 5 }),
            Err(Error::UnsupportedType("Decimal128"))
        ));

        let mut plan = FindPlan::new();
        plan.set_sort([("price", Order::Asc)]);
        assert!(matches!(
            collection.run(&plan),
            Err(Error::UnsupportedType("Decimal128"))
        ));

        // Untouched decimal fields are fine.
        assert_eq!(collection.count_matching(&doc! { "n": 5 }).unwrap(), 2);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let result = people().count_matching(&doc! { "name": { "$regex": "(" } });

        assert!(matches!(result, Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn sort_with_tie_break_and_missing_values() {
        let collection = MemoryCollection::from_documents([
            doc! { "_id": 1, "group": "b", "name": "z" },
            doc! { "_id": 2, "group": "a", "name": "y" },
            doc! { "_id": 3, "group": "b", "name": "a" },
            doc! { "_id": 4, "name": "m" },
        ]);

        let mut plan = FindPlan::new();
        plan.set_sort([("group", Order::Desc), ("name", Order::Asc)]);

        assert_eq!(ids(&collection.run(&plan).unwrap()), vec![3, 1, 2, 4]);
    }

    #[test]
    fn skip_and_limit() {
        let mut plan = FindPlan::new();
        plan.set_sort([("_id", Order::Asc)]);
        plan.skip = Some(1);
        plan.limit = Some(2);

        assert_eq!(ids(&people().run(&plan).unwrap()), vec![2, 3]);

        plan.skip = Some(10);
        assert!(people().run(&plan).unwrap().is_empty());
    }

    #[test]
    fn inclusion_projection_keeps_id() {
        let mut plan = FindPlan::new();
        plan.set_sort([("_id", Order::Asc)]);
        plan.limit = Some(1);
        plan.projection = Some(doc! { "email": 1, "name": 1 });

        assert_eq!(
            people().run(&plan).unwrap(),
            vec![doc! { "_id": 1, "name": "Kit", "email": "kit@example.com" }]
        );

        plan.projection = Some(doc! { "name": 1, "_id": 0 });
        assert_eq!(people().run(&plan).unwrap(), vec![doc! { "name": "Kit" }]);
    }

    #[test]
    fn exclusion_projection() {
        let mut plan = FindPlan::new();
        plan.set_sort([("_id", Order::Asc)]);
        plan.limit = Some(1);
        plan.projection = Some(doc! { "__v": 0 });

        assert_eq!(
            people().run(&plan).unwrap(),
            vec![doc! { "_id": 1, "name": "Kit", "email": "kit@example.com", "age": 31 }]
        );
    }

    #[test]
    fn nested_projection() {
        let id = ObjectId::new();
        let collection = MemoryCollection::from_documents([
            doc! { "_id": id, "profile": { "city": "Dhaka", "zip": "1207" }, "name": "N" },
        ]);

        let mut plan = FindPlan::new();
        plan.projection = Some(doc! { "profile.city": 1 });
        assert_eq!(
            collection.run(&plan).unwrap(),
            vec![doc! { "_id": id, "profile": { "city": "Dhaka" } }]
        );

        plan.projection = Some(doc! { "profile.zip": 0, "_id": 0 });
        assert_eq!(
            collection.run(&plan).unwrap(),
            vec![doc! { "profile": { "city": "Dhaka" }, "name": "N" }]
        );
    }

    #[test]
    fn mixed_projection_is_rejected() {
        let mut plan = FindPlan::new();
        plan.projection = Some(doc! { "name": 1, "email": 0 });

        assert!(matches!(
            people().run(&plan),
            Err(Error::MixedProjection { field }) if field == "email"
        ));
    }

    #[test]
    fn from_records_serializes() {
        #[derive(Serialize)]
        struct Row {
            name: &'static str,
        }

        let collection = MemoryCollection::from_records(&[Row { name: "a" }, Row { name: "b" }])
            .unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.documents()[1], doc! { "name": "b" });
    }
}
