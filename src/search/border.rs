//! Morris-Pratt and Knuth-Morris-Pratt.
//!
//! Both scan the text left to right without ever moving backwards; on a
//! mismatch the position in the word falls back along a border table. Entry
//! `k` of the table is where to resume after matching `k` symbols; `-1` means
//! restart past the current text symbol.

/// `table[k]` is the length of the longest proper border of `word[..k]`.
pub(super) fn morris_pratt_table(word: &[u8]) -> Vec<isize> {
    let m = word.len();
    let mut table = vec![-1isize; m + 1];
    let mut i: isize = -1;

    for j in 0..m {
        while i >= 0 && word[i as usize] != word[j] {
            i = table[i as usize];
        }
        i += 1;
        table[j + 1] = i;
    }

    table
}

/// Strong borders: a border is skipped when the symbol following it is the
/// one that just mismatched, since it would mismatch again.
pub(super) fn knuth_morris_pratt_table(word: &[u8]) -> Vec<isize> {
    let weak = morris_pratt_table(word);
    let mut table = weak.clone();

    for k in 1..word.len() {
        let border = weak[k];
        if border >= 0 && word[border as usize] == word[k] {
            table[k] = table[border as usize];
        }
    }

    table
}

pub(super) fn search(text: &[u8], word: &[u8], table: &[isize], from: usize) -> Option<usize> {
    let m = word.len() as isize;
    let mut i: isize = 0;

    for (j, &symbol) in text.iter().enumerate().skip(from) {
        while i >= 0 && word[i as usize] != symbol {
            i = table[i as usize];
        }
        i += 1;
        if i == m {
            return Some(j + 1 - word.len());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_morris_pratt_table() {
        assert_eq!(morris_pratt_table(b"abaab"), vec![-1, 0, 0, 1, 1, 2]);
        assert_eq!(morris_pratt_table(b"aaaa"), vec![-1, 0, 1, 2, 3]);
    }

    #[test]
    fn test_knuth_morris_pratt_table() {
        // Same symbol after the border: fall back further.
        assert_eq!(knuth_morris_pratt_table(b"aaaa"), vec![-1, -1, -1, -1, 3]);
        assert_eq!(knuth_morris_pratt_table(b"abaab"), vec![-1, 0, -1, 1, 0, 2]);
    }

    #[test]
    fn test_search_resumes_from_offset() {
        let table = morris_pratt_table(b"aba");
        assert_eq!(search(b"abababa", b"aba", &table, 0), Some(0));
        assert_eq!(search(b"abababa", b"aba", &table, 1), Some(2));
        assert_eq!(search(b"abababa", b"aba", &table, 5), None);
    }
}
