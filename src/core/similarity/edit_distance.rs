//! Edit-distance scoring for text content.

/// Levenshtein distance between two strings, counted in `char`s.
///
/// Insertions, deletions and substitutions all cost 1; substituting a
/// character with itself costs 0. Only two rows of the
/// `(len(a) + 1) x (len(b) + 1)` table are kept alive at a time, and both
/// are dropped when the call returns.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    const DELETION_COST: usize = 1;
    const INSERTION_COST: usize = 1;

    let b: Vec<char> = b.chars().collect();

    // Row i = 0: d[0, j] = j
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        // d[i, 0] = i
        current[0] = i + 1;

        for (j, b_char) in b.iter().enumerate() {
            let substitution_cost = usize::from(a_char != *b_char);

            current[j + 1] = (previous[j + 1] + DELETION_COST)
                .min(current[j] + INSERTION_COST)
                .min(previous[j] + substitution_cost);
        }

        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Edit distance as a percentage of the longer string's length.
///
/// Lower means more similar: 0 for identical strings, 100 when nothing
/// lines up. Two empty strings are identical and score 0.
pub fn distance_percent(a: &str, b: &str) -> f64 {
    let longer = a.chars().count().max(b.chars().count());
    if longer == 0 {
        return 0.0;
    }

    let distance = levenshtein_distance(a, b);
    100.0 * distance as f64 / longer as f64
}
