//! Query evaluation: filter, then sort, then page

use crate::error::{QueryError, Result};
use crate::options::{Direction, QueryOptions};
use crate::sort::Sortable;

/// Applies `options` to `rows`: filter, then sort, then paging
///
/// Pure function of its inputs: the same rows and options always produce
/// the same ordered output. The sort is stable and unsorted queries keep
/// input order, so callers feeding id-ordered rows get deterministic
/// results. An unknown sort field fails even when `rows` is empty. An
/// inactive page (non-positive number or size) returns everything.
pub fn evaluate<T: Sortable>(rows: Vec<T>, options: &QueryOptions<T>) -> Result<Vec<T>> {
    let mut rows = rows;

    if let Some(filter) = &options.filter {
        rows.retain(|row| filter(row));
    }

    if let Some(sort) = &options.sort {
        if !T::sort_fields().contains(&sort.field.as_str()) {
            return Err(QueryError::unknown_sort_field(sort.field.as_str()));
        }
        rows.sort_by(|a, b| {
            let ordering = a.sort_key(&sort.field).cmp(&b.sort_key(&sort.field));
            match sort.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });
    }

    if let Some(page) = options.page.filter(|p| p.is_active()) {
        rows = rows
            .into_iter()
            .skip(page.skip())
            .take(page.take())
            .collect();
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Sort;
    use crate::sort::SortKey;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        rank: i64,
    }

    impl Row {
        fn new(name: &str, rank: i64) -> Self {
            Self {
                name: name.into(),
                rank,
            }
        }
    }

    impl Sortable for Row {
        fn sort_fields() -> &'static [&'static str] {
            &["name", "rank"]
        }

        fn sort_key(&self, field: &str) -> Option<SortKey> {
            match field {
                "name" => Some(SortKey::Text(self.name.clone())),
                "rank" => Some(SortKey::Int(self.rank)),
                _ => None,
            }
        }
    }

    fn ten_rows() -> Vec<Row> {
        (1..=10).map(|n| Row::new(&format!("row-{n:02}"), n)).collect()
    }

    #[test]
    fn test_no_options_preserves_input_order() {
        let rows = vec![Row::new("c", 3), Row::new("a", 1), Row::new("b", 2)];
        let result = evaluate(rows.clone(), &QueryOptions::new()).unwrap();
        assert_eq!(result, rows);
    }

    #[test]
    fn test_filter() {
        let result = evaluate(
            ten_rows(),
            &QueryOptions::new().with_filter(|row: &Row| row.rank % 2 == 0),
        )
        .unwrap();
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|row| row.rank % 2 == 0));
    }

    #[test]
    fn test_sort_asc_and_desc() {
        let rows = vec![Row::new("b", 2), Row::new("c", 3), Row::new("a", 1)];

        let asc = evaluate(rows.clone(), &QueryOptions::new().with_sort(Sort::asc("name"))).unwrap();
        assert_eq!(asc[0].name, "a");
        assert_eq!(asc[2].name, "c");

        let desc = evaluate(rows, &QueryOptions::new().with_sort(Sort::desc("rank"))).unwrap();
        assert_eq!(desc[0].rank, 3);
        assert_eq!(desc[2].rank, 1);
    }

    #[test]
    fn test_sort_is_stable() {
        let rows = vec![
            Row::new("first", 1),
            Row::new("second", 1),
            Row::new("third", 1),
        ];
        let result = evaluate(rows, &QueryOptions::new().with_sort(Sort::asc("rank"))).unwrap();
        assert_eq!(result[0].name, "first");
        assert_eq!(result[1].name, "second");
        assert_eq!(result[2].name, "third");
    }

    #[test]
    fn test_unknown_sort_field() {
        let result = evaluate(ten_rows(), &QueryOptions::new().with_sort(Sort::asc("priority")));
        assert!(matches!(result, Err(QueryError::UnknownSortField { .. })));
    }

    #[test]
    fn test_unknown_sort_field_on_empty_input() {
        let result = evaluate(
            Vec::<Row>::new(),
            &QueryOptions::new().with_sort(Sort::asc("priority")),
        );
        assert!(matches!(result, Err(QueryError::UnknownSortField { .. })));
    }

    #[test]
    fn test_page_two_of_size_three() {
        let result = evaluate(
            ten_rows(),
            &QueryOptions::new()
                .with_sort(Sort::asc("rank"))
                .with_page(2, 3),
        )
        .unwrap();
        assert_eq!(
            result.iter().map(|row| row.rank).collect::<Vec<_>>(),
            vec![4, 5, 6]
        );
    }

    #[test]
    fn test_last_page_may_be_short() {
        let result = evaluate(ten_rows(), &QueryOptions::new().with_page(4, 3)).unwrap();
        assert_eq!(result.iter().map(|row| row.rank).collect::<Vec<_>>(), vec![10]);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let result = evaluate(ten_rows(), &QueryOptions::new().with_page(5, 3)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_inactive_page_returns_everything() {
        for (number, size) in [(0, 3), (2, 0), (-1, 3), (2, -4), (0, 0)] {
            let result = evaluate(
                ten_rows(),
                &QueryOptions::new()
                    .with_sort(Sort::asc("rank"))
                    .with_page(number, size),
            )
            .unwrap();
            assert_eq!(result.len(), 10, "page {number}/{size} should not narrow");
            assert_eq!(result[0].rank, 1);
        }
    }

    #[test]
    fn test_filter_sort_page_compose() {
        // Odd ranks 1,3,5,7,9 sorted desc: 9,7,5,3,1 - page 2 of 2 is 5,3.
        let result = evaluate(
            ten_rows(),
            &QueryOptions::new()
                .with_filter(|row: &Row| row.rank % 2 == 1)
                .with_sort(Sort::desc("rank"))
                .with_page(2, 2),
        )
        .unwrap();
        assert_eq!(result.iter().map(|row| row.rank).collect::<Vec<_>>(), vec![5, 3]);
    }
}
