use crate::PartialResult;
use std::collections::BTreeSet;

/// Merges partial results into one ascending, duplicate-free sequence.
///
/// Arrival order of the partials is irrelevant; the output is always sorted.
pub fn aggregate<T: Ord>(partials: impl IntoIterator<Item = PartialResult<T>>) -> Vec<T> {
    partials
        .into_iter()
        .flat_map(|partial| partial.values)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(task_id: usize, values: Vec<u64>) -> PartialResult<u64> {
        PartialResult {
            task_id,
            chunk: format!("task-{task_id}"),
            values,
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(aggregate(Vec::<PartialResult<u64>>::new()), Vec::<u64>::new());
        assert_eq!(aggregate(vec![partial(0, vec![]), partial(1, vec![])]), Vec::<u64>::new());
    }

    #[test]
    fn single_chunk_is_sorted() {
        assert_eq!(aggregate(vec![partial(0, vec![407, 153, 371, 370])]), vec![153, 370, 371, 407]);
    }

    #[test]
    fn ignores_arrival_order() {
        let out_of_order = vec![
            partial(2, vec![9474]),
            partial(0, vec![1634]),
            partial(1, vec![8208]),
        ];
        assert_eq!(aggregate(out_of_order), vec![1634, 8208, 9474]);
    }

    #[test]
    fn removes_cross_chunk_duplicates() {
        let overlapping = vec![partial(0, vec![1, 2, 3]), partial(1, vec![3, 2, 6])];
        assert_eq!(aggregate(overlapping), vec![1, 2, 3, 6]);
    }
}
