//! Pure helpers shared by the game rules.

use std::cmp::Ordering;

/// Find the single element that's strictly greater than every other
/// element according to `compare`.
///
/// Returns `None` for an empty slice or when two or more elements share
/// the maximum. Ties are never broken.
pub fn unique_highest_by<T, F>(items: &[T], mut compare: F) -> Option<(usize, &T)>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let (first, rest) = items.split_first()?;
    let mut highest_idx = 0;
    let mut highest = first;
    let mut highest_count = 1usize;

    for (offset, item) in rest.iter().enumerate() {
        match compare(item, highest) {
            Ordering::Greater => {
                highest_idx = offset + 1;
                highest = item;
                highest_count = 1;
            }
            Ordering::Equal => highest_count += 1,
            Ordering::Less => {}
        }
    }

    (highest_count == 1).then_some((highest_idx, highest))
}

/// [`unique_highest_by`] using the natural ordering.
pub fn unique_highest<T: Ord>(items: &[T]) -> Option<(usize, &T)> {
    unique_highest_by(items, Ord::cmp)
}
