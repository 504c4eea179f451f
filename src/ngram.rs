//! Produces the ordered sequence of overlapping n-grams from a sequence
//! (spec C2).

use crate::symbol::Symbol;

/// Extracts overlapping n-grams of rank `n` from `data`.
///
/// Produces `t_0, t_1, …, t_{L-n}` for an input of length `L`. If `L < n`,
/// a single degenerate n-gram equal to the whole input is emitted,
/// preserving legacy behaviour (spec §4.2). When `pad` is `true`, `data` is
/// right-padded with `n - 1` copies of `pad_value` before extraction.
///
/// # Panics
/// Never panics; `n == 0` is rejected by every public builder before this
/// function is reached (see [`crate::builder`]).
pub fn extract<T: Clone>(data: &[T], n: usize, pad: bool, pad_value: &T) -> Vec<Symbol<T>> {
    if n == 0 {
        return Vec::new();
    }

    let padded;
    let view: &[T] = if pad && n > 1 {
        let mut owned = data.to_vec();
        owned.extend(std::iter::repeat(pad_value.clone()).take(n - 1));
        padded = owned;
        &padded
    } else {
        data
    };

    if view.len() < n {
        return vec![Symbol::new(view.to_vec())];
    }

    (0..=view.len() - n)
        .map(|start| Symbol::new(view[start..start + n].to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::extract;
    use crate::symbol::Symbol;

    #[test]
    fn extracts_overlapping_trigrams() {
        let data: Vec<char> = "GATTACA".chars().collect();
        let grams = extract(&data, 3, false, &'\0');
        assert_eq!(grams.len(), data.len() - 3 + 1);
        assert_eq!(grams[0], Symbol::new(vec!['G', 'A', 'T']));
        assert_eq!(grams[1], Symbol::new(vec!['A', 'T', 'T']));
    }

    #[test]
    fn degenerate_mode_when_shorter_than_rank() {
        let data: Vec<char> = "ab".chars().collect();
        let grams = extract(&data, 5, false, &'\0');
        assert_eq!(grams.len(), 1);
        assert_eq!(grams[0], Symbol::new(vec!['a', 'b']));
    }

    #[test]
    fn padding_appends_n_minus_one_pad_symbols() {
        let data: Vec<char> = "ab".chars().collect();
        let grams = extract(&data, 3, true, &'\0');
        // padded view is "ab\0\0" (n-1 = 2 pad chars), yielding 2 trigrams.
        assert_eq!(grams.len(), 2);
        assert_eq!(grams[0], Symbol::new(vec!['a', 'b', '\0']));
        assert_eq!(grams[1], Symbol::new(vec!['b', '\0', '\0']));
    }

    #[test]
    fn single_element_ngrams_for_rank_one() {
        let data: Vec<char> = "abc".chars().collect();
        let grams = extract(&data, 1, false, &'\0');
        assert_eq!(grams.len(), 3);
        assert_eq!(grams[2], Symbol::new(vec!['c']));
    }
}
