//! Single-key sort state and the stable row ordering it produces.

use super::value::TableRow;
use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Active sort: one column key and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }
}

/// Next state when the column `key` is activated.
///
/// Cycles `None -> Asc -> Desc -> None` on the same column; activating a
/// different column always starts at ascending.
pub fn next_sort(current: Option<&SortState>, key: &str) -> Option<SortState> {
    match current {
        Some(state) if state.key == key => match state.direction {
            SortDirection::Asc => Some(SortState::new(key, SortDirection::Desc)),
            SortDirection::Desc => None,
        },
        _ => Some(SortState::new(key, SortDirection::Asc)),
    }
}

/// Display order as indices into `rows`.
///
/// Without a sort this is the identity. The sort is stable and descending
/// uses the reversed comparator, so equal keys keep their source order in
/// both directions.
pub fn sorted_order<R: TableRow>(rows: &[R], sort: Option<&SortState>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let Some(sort) = sort else {
        return order;
    };

    let keys: Vec<Value> = rows.iter().map(|row| row.field(&sort.key)).collect();
    match sort.direction {
        SortDirection::Asc => order.sort_by(|&a, &b| keys[a].cmp(&keys[b])),
        SortDirection::Desc => order.sort_by(|&a, &b| keys[b].cmp(&keys[a])),
    }
    order
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    type Row = BTreeMap<String, Value>;

    fn row(k: i64, i: i64) -> Row {
        [("k".to_string(), Value::Int(k)), ("i".to_string(), Value::Int(i))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_cycle() {
        let asc = next_sort(None, "k");
        assert_eq!(asc, Some(SortState::new("k", SortDirection::Asc)));
        let desc = next_sort(asc.as_ref(), "k");
        assert_eq!(desc, Some(SortState::new("k", SortDirection::Desc)));
        assert_eq!(next_sort(desc.as_ref(), "k"), None);
    }

    #[test]
    fn test_switching_column_starts_ascending() {
        let desc = SortState::new("k", SortDirection::Desc);
        assert_eq!(
            next_sort(Some(&desc), "i"),
            Some(SortState::new("i", SortDirection::Asc))
        );
    }

    #[test]
    fn test_stable_ascending() {
        let rows = vec![row(1, 0), row(1, 1), row(2, 2)];
        let sort = SortState::new("k", SortDirection::Asc);
        assert_eq!(sorted_order(&rows, Some(&sort)), vec![0, 1, 2]);
    }

    #[test]
    fn test_descending_keeps_ties_in_source_order() {
        let rows = vec![row(1, 0), row(1, 1), row(2, 2)];
        let sort = SortState::new("k", SortDirection::Desc);
        assert_eq!(sorted_order(&rows, Some(&sort)), vec![2, 0, 1]);
    }

    #[test]
    fn test_missing_field_sorts_first() {
        let mut rows = vec![row(2, 0), row(1, 1)];
        rows.push(Row::new());
        let sort = SortState::new("k", SortDirection::Asc);
        assert_eq!(sorted_order(&rows, Some(&sort)), vec![2, 1, 0]);
    }
}
