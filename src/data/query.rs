use std::collections::HashMap;
use tracing::debug;

use crate::data::field_value::compare_field_values;
use crate::data::field_value::FieldValue;
use crate::data::record::Queryable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// An active sort: which field, which direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Descending,
        }
    }
}

/// The combined search/filter/sort/page input to one query.
///
/// Immutable per invocation; screens rebuild it on every keystroke,
/// filter selection, header click or page click and re-run the
/// pipeline. It carries no state of its own between calls.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    /// Case-insensitive substring search across the record's declared
    /// text fields; empty means no search constraint.
    pub search: String,
    /// Field name -> required categorical value. Empty values and
    /// unknown field names impose no constraint.
    pub filters: HashMap<String, String>,
    pub sort: Option<SortSpec>,
    /// 1-based page number. Not auto-corrected: pages past the end
    /// return an empty slice (clamping is the caller's job).
    pub page: usize,
    pub page_size: usize,
}

impl QuerySpec {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            filters: HashMap::new(),
            sort: None,
            page: 1,
            page_size,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// One page of query output plus the counts pagination controls need.
#[derive(Debug)]
pub struct QueryResult<'a, R> {
    /// The current page, at most `page_size` records.
    pub items: Vec<&'a R>,
    /// Records surviving search+filter, before pagination.
    pub total_matched: usize,
    /// ceil(total_matched / page_size); 0 when nothing matched.
    pub total_pages: usize,
}

/// Run the record query pipeline: search and filter, then sort, then
/// paginate.
///
/// Pure and total: records are only read, every input produces a
/// result, and the same inputs always produce the same output. Sorting
/// is stable, so records with equal sort keys keep their relative
/// pre-sort order (which equals collection order, filtering being
/// order-preserving).
pub fn run_query<'a, R: Queryable>(records: &'a [R], spec: &QuerySpec) -> QueryResult<'a, R> {
    let folded_term = spec.search.trim().to_lowercase();

    let mut matched: Vec<&R> = records
        .iter()
        .filter(|r| matches_search(*r, spec.search.trim(), &folded_term))
        .filter(|r| matches_filters(*r, &spec.filters))
        .collect();

    debug!(
        "query: {} of {} records matched search+filter",
        matched.len(),
        records.len()
    );

    // total_matched is independent of sort and page
    let total_matched = matched.len();

    if let Some(sort) = &spec.sort {
        // sort_by is stable; unknown keys yield Equal everywhere and
        // leave the order untouched
        matched.sort_by(|a, b| {
            let va = a.sort_field(&sort.key).unwrap_or(FieldValue::Null);
            let vb = b.sort_field(&sort.key).unwrap_or(FieldValue::Null);
            let ord = compare_field_values(&va, &vb);
            match sort.order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }

    // A page_size of zero is read as one rather than dividing by zero.
    let page_size = spec.page_size.max(1);
    let total_pages = total_matched.div_ceil(page_size);
    let start = spec.page.saturating_sub(1).saturating_mul(page_size);

    let items: Vec<&R> = matched.into_iter().skip(start).take(page_size).collect();

    QueryResult {
        items,
        total_matched,
        total_pages,
    }
}

/// Three-state header toggle: clicking the currently-ascending key
/// flips it to descending; clicking anything else (another key, a
/// descending key, or with no sort active) sorts ascending on the
/// clicked key.
pub fn toggle_sort(current: Option<&SortSpec>, clicked: &str) -> SortSpec {
    match current {
        Some(active) if active.key == clicked && active.order == SortOrder::Ascending => {
            SortSpec::descending(clicked)
        }
        _ => SortSpec::ascending(clicked),
    }
}

fn matches_search<R: Queryable>(record: &R, raw_term: &str, folded_term: &str) -> bool {
    if folded_term.is_empty() {
        return true;
    }

    record
        .search_text()
        .iter()
        .any(|field| field.to_lowercase().contains(folded_term))
        || record
            .search_exact()
            .iter()
            .any(|field| field.contains(raw_term))
}

fn matches_filters<R: Queryable>(record: &R, filters: &HashMap<String, String>) -> bool {
    filters.iter().all(|(field, value)| {
        if value.is_empty() {
            return true;
        }
        match record.filter_field(field) {
            Some(actual) => actual == value.as_str(),
            // Unknown field: no such constraint
            None => true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    struct Row {
        name: String,
        group: String,
        time: String,
    }

    impl Row {
        fn new(name: &str, group: &str, time: &str) -> Self {
            Self {
                name: name.to_string(),
                group: group.to_string(),
                time: time.to_string(),
            }
        }
    }

    impl Queryable for Row {
        fn search_text(&self) -> Vec<Cow<'_, str>> {
            vec![Cow::from(self.name.as_str())]
        }

        fn filter_field(&self, field: &str) -> Option<Cow<'_, str>> {
            match field {
                "group" => Some(Cow::from(self.group.as_str())),
                _ => None,
            }
        }

        fn sort_field(&self, field: &str) -> Option<FieldValue> {
            match field {
                "name" => Some(FieldValue::text(self.name.clone())),
                "group" => Some(FieldValue::text(self.group.clone())),
                "time" => Some(FieldValue::clock(&self.time)),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::new("Alice", "a", "10:30 AM"),
            Row::new("Bob", "b", "9:15 AM"),
            Row::new("Carol", "a", "12:00 PM"),
            Row::new("Dave", "b", "12:01 AM"),
        ]
    }

    #[test]
    fn test_empty_search_passes_everything() {
        let data = rows();
        let result = run_query(&data, &QuerySpec::new(10));
        assert_eq!(result.total_matched, 4);
        assert_eq!(result.items.len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let data = rows();
        for term in ["alice", "ALICE", "Ali"] {
            let spec = QuerySpec::new(10).with_search(term);
            let result = run_query(&data, &spec);
            assert_eq!(result.total_matched, 1, "term {:?}", term);
            assert_eq!(result.items[0].name, "Alice");
        }
    }

    #[test]
    fn test_filter_equality() {
        let data = rows();
        let spec = QuerySpec::new(10).with_filter("group", "a");
        let result = run_query(&data, &spec);
        assert_eq!(result.total_matched, 2);
    }

    #[test]
    fn test_empty_filter_value_is_no_constraint() {
        let data = rows();
        let spec = QuerySpec::new(10).with_filter("group", "");
        assert_eq!(run_query(&data, &spec).total_matched, 4);
    }

    #[test]
    fn test_unknown_filter_field_is_ignored() {
        let data = rows();
        let spec = QuerySpec::new(10).with_filter("flavor", "grape");
        assert_eq!(run_query(&data, &spec).total_matched, 4);
    }

    #[test]
    fn test_clock_time_sort_order() {
        let data = rows();
        let spec = QuerySpec::new(10).with_sort(SortSpec::ascending("time"));
        let result = run_query(&data, &spec);
        let names: Vec<&str> = result.items.iter().map(|r| r.name.as_str()).collect();
        // 12:01 AM, 9:15 AM, 10:30 AM, 12:00 PM
        assert_eq!(names, vec!["Dave", "Bob", "Alice", "Carol"]);
    }

    #[test]
    fn test_descending_reverses() {
        let data = rows();
        let spec = QuerySpec::new(10).with_sort(SortSpec::descending("name"));
        let result = run_query(&data, &spec);
        assert_eq!(result.items[0].name, "Dave");
        assert_eq!(result.items[3].name, "Alice");
    }

    #[test]
    fn test_sort_is_stable_on_equal_keys() {
        let data = rows();
        let spec = QuerySpec::new(10).with_sort(SortSpec::ascending("group"));
        let result = run_query(&data, &spec);
        let names: Vec<&str> = result.items.iter().map(|r| r.name.as_str()).collect();
        // Within each group the collection order survives
        assert_eq!(names, vec!["Alice", "Carol", "Bob", "Dave"]);
    }

    #[test]
    fn test_unknown_sort_key_keeps_order() {
        let data = rows();
        let spec = QuerySpec::new(10).with_sort(SortSpec::ascending("nonsense"));
        let result = run_query(&data, &spec);
        let names: Vec<&str> = result.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dave"]);
    }

    #[test]
    fn test_pagination_slices() {
        let data = rows();
        let spec = QuerySpec::new(3);
        let page1 = run_query(&data, &spec);
        assert_eq!(page1.items.len(), 3);
        assert_eq!(page1.total_pages, 2);

        let page2 = run_query(&data, &spec.clone().with_page(2));
        assert_eq!(page2.items.len(), 1);
        assert_eq!(page2.total_matched, 4);
    }

    #[test]
    fn test_page_past_the_end_is_empty_not_an_error() {
        let data = rows();
        let spec = QuerySpec::new(3).with_page(9);
        let result = run_query(&data, &spec);
        assert!(result.items.is_empty());
        assert_eq!(result.total_matched, 4);
        assert_eq!(result.total_pages, 2);
    }

    #[test]
    fn test_pages_partition_the_matched_set() {
        let data = rows();
        let spec = QuerySpec::new(3);
        let total: usize = (1..=2)
            .map(|p| run_query(&data, &spec.clone().with_page(p)).items.len())
            .sum();
        assert_eq!(total, run_query(&data, &spec).total_matched);
    }

    #[test]
    fn test_empty_collection() {
        let data: Vec<Row> = Vec::new();
        let result = run_query(&data, &QuerySpec::new(5));
        assert!(result.items.is_empty());
        assert_eq!(result.total_matched, 0);
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let data = rows();
        let spec = QuerySpec::new(10).with_filter("group", "b");
        let once = run_query(&data, &spec);
        let twice = run_query(&data, &spec);
        let a: Vec<&str> = once.items.iter().map(|r| r.name.as_str()).collect();
        let b: Vec<&str> = twice.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_toggle_sort_cycle() {
        let first = toggle_sort(None, "date");
        assert_eq!(first, SortSpec::ascending("date"));

        let second = toggle_sort(Some(&first), "date");
        assert_eq!(second, SortSpec::descending("date"));

        let third = toggle_sort(Some(&second), "name");
        assert_eq!(third, SortSpec::ascending("name"));

        // Clicking a descending key starts over ascending
        let fourth = toggle_sort(Some(&second), "date");
        assert_eq!(fourth, SortSpec::ascending("date"));
    }
}
