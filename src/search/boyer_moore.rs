//! Boyer-Moore and Horspool: compare the window right to left and shift it
//! using tables computed from the word.

/// Shift that aligns the text symbol under the last position of the window
/// with its rightmost occurrence in `word[..m - 1]` (or `m` when absent).
pub(super) fn bad_char_table(word: &[u8]) -> [usize; 256] {
    let m = word.len();
    let mut table = [m; 256];
    for (i, &symbol) in word[..m - 1].iter().enumerate() {
        table[symbol as usize] = m - 1 - i;
    }
    table
}

/// `suffixes[i]` is the length of the longest common suffix of `word` and
/// `word[..=i]`.
fn suffixes(word: &[u8]) -> Vec<usize> {
    let m = word.len() as isize;
    let mut suff = vec![0isize; word.len()];
    suff[(m - 1) as usize] = m;

    let mut g = m - 1;
    let mut f = 0isize;
    for i in (0..m - 1).rev() {
        if i > g && suff[(i + m - 1 - f) as usize] < i - g {
            suff[i as usize] = suff[(i + m - 1 - f) as usize];
        } else {
            if i < g {
                g = i;
            }
            f = i;
            while g >= 0 && word[g as usize] == word[(g + m - 1 - f) as usize] {
                g -= 1;
            }
            suff[i as usize] = f - g;
        }
    }

    suff.into_iter().map(|s| s as usize).collect()
}

/// `table[i]` is the shift to apply after a mismatch at position `i` of the
/// word, once `word[i + 1..]` matched.
pub(super) fn good_suffix_table(word: &[u8]) -> Vec<usize> {
    let m = word.len();
    let suff = suffixes(word);
    let mut table = vec![m; m];

    // Matched suffix also occurs as a prefix of the word.
    let mut j = 0;
    for i in (-1..m as isize - 1).rev() {
        if i == -1 || suff[i as usize] == (i + 1) as usize {
            let shift = (m as isize - 1 - i) as usize;
            while j < shift {
                if table[j] == m {
                    table[j] = shift;
                }
                j += 1;
            }
        }
    }

    // Matched suffix re-occurs inside the word.
    for i in 0..m.saturating_sub(1) {
        table[m - 1 - suff[i]] = m - 1 - i;
    }

    table
}

pub(super) fn boyer_moore(
    text: &[u8],
    word: &[u8],
    bad_char: &[usize; 256],
    good_suffix: &[usize],
    from: usize,
) -> Option<usize> {
    let (n, m) = (text.len(), word.len());
    let mut start = from;

    while start + m <= n {
        let mut i = m;
        while i > 0 && word[i - 1] == text[start + i - 1] {
            i -= 1;
        }
        if i == 0 {
            return Some(start);
        }

        // Mismatch at word position `i - 1`.
        let pos = i - 1;
        let bad_char_shift =
            bad_char[text[start + pos] as usize] as isize - (m as isize - 1 - pos as isize);
        start += good_suffix[pos].max(bad_char_shift.max(1) as usize);
    }

    None
}

pub(super) fn horspool(
    text: &[u8],
    word: &[u8],
    bad_char: &[usize; 256],
    from: usize,
) -> Option<usize> {
    let (n, m) = (text.len(), word.len());
    let last = word[m - 1];
    let mut start = from;

    while start + m <= n {
        let symbol = text[start + m - 1];
        if symbol == last && text[start..start + m - 1] == word[..m - 1] {
            return Some(start);
        }
        start += bad_char[symbol as usize];
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_char_table() {
        let table = bad_char_table(b"gcagagag");
        assert_eq!(table[b'a' as usize], 1);
        assert_eq!(table[b'c' as usize], 6);
        assert_eq!(table[b'g' as usize], 2);
        assert_eq!(table[b't' as usize], 8);
    }

    #[test]
    fn test_good_suffix_table() {
        assert_eq!(suffixes(b"gcagagag"), vec![1, 0, 0, 2, 0, 4, 0, 8]);
        assert_eq!(good_suffix_table(b"gcagagag"), vec![7, 7, 7, 2, 7, 4, 7, 1]);
    }

    #[test]
    fn test_single_symbol_word() {
        let word = b"a";
        let bad_char = bad_char_table(word);
        let good_suffix = good_suffix_table(word);
        assert_eq!(good_suffix, vec![1]);
        assert_eq!(boyer_moore(b"bbab", word, &bad_char, &good_suffix, 0), Some(2));
        assert_eq!(horspool(b"bbab", word, &bad_char, 3), None);
    }
}
