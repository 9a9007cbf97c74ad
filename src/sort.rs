//! Comparator-based merge sort, the sort collaborator used by tree
//! construction. Top-down: split the input at the midpoint, sort each half,
//! merge. `O(n log n)` comparisons, stable (ties keep the left run's element
//! first).

use std::cmp::Ordering;

/// Sorts ascending by the type's own total order.
///
/// # Examples
///
/// ```
/// use bstree::sort::merge_sort;
///
/// assert_eq!(merge_sort(vec![3, 1, 2, 1]), [1, 1, 2, 3]);
/// ```
pub fn merge_sort<T: Ord>(values: Vec<T>) -> Vec<T> {
    merge_sort_by(values, T::cmp)
}

/// Sorts ascending by an arbitrary total-order comparator.
pub fn merge_sort_by<T, F>(values: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort(values, &mut compare)
}

fn sort<T, F>(mut values: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if values.len() <= 1 {
        return values;
    }
    let right = values.split_off(values.len() / 2);
    let left = sort(values, compare);
    let right = sort(right, compare);
    merge(left, right, compare)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        if compare(l, r) == Ordering::Greater {
            merged.push(right.next().expect("peeked"));
        } else {
            merged.push(left.next().expect("peeked"));
        }
    }
    // At most one of the two runs still has elements.
    merged.extend(left);
    merged.extend(right);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_ascending() {
        let sorted = merge_sort(vec![5, 3, 8, 1, 9, 2, 7]);
        assert_eq!(sorted, [1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(merge_sort(Vec::<i32>::new()), Vec::<i32>::new());
        assert_eq!(merge_sort(vec![1]), [1]);
    }

    #[test]
    fn test_keeps_duplicates() {
        assert_eq!(merge_sort(vec![2, 1, 2, 1]), [1, 1, 2, 2]);
    }

    #[test]
    fn test_already_sorted() {
        assert_eq!(merge_sort(vec![1, 2, 3, 4]), [1, 2, 3, 4]);
    }

    #[test]
    fn test_custom_comparator() {
        let sorted = merge_sort_by(vec![1, 3, 2], |a, b| b.cmp(a));
        assert_eq!(sorted, [3, 2, 1]);
    }

    #[test]
    fn test_is_stable() {
        // Compare on the key only; the payload records insertion order.
        let sorted = merge_sort_by(vec![(1, 'b'), (0, 'a'), (1, 'a'), (0, 'b')], |a, b| {
            a.0.cmp(&b.0)
        });
        assert_eq!(sorted, [(0, 'a'), (0, 'b'), (1, 'b'), (1, 'a')]);
    }
}
