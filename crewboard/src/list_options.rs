//! Query options built from transport-shaped list arguments

use crewboard_query::{Direction, Page, QueryOptions, Sort};

use crate::error::Result;

/// Build query options from optional raw sort and page arguments
///
/// The direction string is validated even when no sort field accompanies
/// it, so a typo never silently falls back to ascending.
pub(crate) fn sort_and_page<T>(
    sort_by: &Option<String>,
    direction: &Option<String>,
    page: Option<Page>,
) -> Result<QueryOptions<T>> {
    let direction: Option<Direction> = match direction {
        Some(raw) => Some(raw.parse()?),
        None => None,
    };

    let mut options = QueryOptions::new();
    if let Some(field) = sort_by {
        let mut sort = Sort::asc(field.clone());
        if let Some(direction) = direction {
            sort.direction = direction;
        }
        options = options.with_sort(sort);
    }
    if let Some(page) = page {
        options = options.with_page(page.number, page.size);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CrewboardError, ErrorKind};

    #[test]
    fn test_no_arguments_build_empty_options() {
        let options = sort_and_page::<()>(&None, &None, None).unwrap();
        assert!(options.sort.is_none());
        assert!(options.page.is_none());
    }

    #[test]
    fn test_direction_applies_to_sort() {
        let options =
            sort_and_page::<()>(&Some("name".into()), &Some("DESC".into()), None).unwrap();
        assert_eq!(options.sort, Some(Sort::desc("name")));
    }

    #[test]
    fn test_bad_direction_is_rejected_without_sort() {
        let err = sort_and_page::<()>(&None, &Some("sideways".into()), None).unwrap_err();
        assert!(matches!(err, CrewboardError::Query(_)));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
