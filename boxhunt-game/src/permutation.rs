//! Uniform permutations and cycle structure over `0..len`.

use rand::Rng;

/// Return every integer in `0..len` exactly once, in uniformly random order.
///
/// Fisher–Yates: walks from the last slot down to 1 and swaps each slot with a
/// uniformly chosen slot at or below it. Every call advances `rng`.
#[must_use]
pub fn shuffled_indices<R: Rng>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut slots: Vec<usize> = (0..len).collect();
    for i in (1..len).rev() {
        let j = rng.gen_range(0..=i);
        slots.swap(i, j);
    }
    slots
}

/// Draw `min(take, len)` distinct indices from `0..len` in random order.
///
/// This is a truncated full permutation, so no index repeats.
#[must_use]
pub fn sample_distinct<R: Rng>(len: usize, take: usize, rng: &mut R) -> Vec<usize> {
    let mut order = shuffled_indices(len, rng);
    order.truncate(take);
    order
}

/// Returns true when `values` contains each of `0..values.len()` exactly once.
#[must_use]
pub fn is_permutation(values: &[usize]) -> bool {
    first_defect(values).is_none()
}

/// Locate the first value that is out of range or repeated.
pub(crate) fn first_defect(values: &[usize]) -> Option<(usize, usize)> {
    let mut seen = vec![false; values.len()];
    for (position, &value) in values.iter().enumerate() {
        match seen.get_mut(value) {
            Some(flag) if !*flag => *flag = true,
            _ => return Some((position, value)),
        }
    }
    None
}

/// Length of the cycle through `start` when `perm` is read as `i -> perm[i]`.
///
/// `perm` must be a permutation and `start` must be in range.
#[must_use]
pub fn cycle_length_at(perm: &[usize], start: usize) -> usize {
    let mut length = 1;
    let mut cursor = perm[start];
    while cursor != start {
        cursor = perm[cursor];
        length += 1;
    }
    length
}

/// Cycle lengths of `perm`, ordered by the smallest index each cycle contains.
#[must_use]
pub fn cycle_lengths(perm: &[usize]) -> Vec<usize> {
    let mut visited = vec![false; perm.len()];
    let mut lengths = Vec::new();
    for start in 0..perm.len() {
        if visited[start] {
            continue;
        }
        let mut length = 0;
        let mut cursor = start;
        while !visited[cursor] {
            visited[cursor] = true;
            cursor = perm[cursor];
            length += 1;
        }
        lengths.push(length);
    }
    lengths
}
