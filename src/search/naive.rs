//! Naive (quadratic) searches.
//!
//! The "fast loop" variants first compare the last symbol of the word with
//! the text and only run the inner comparison on a hit. The "sentinel"
//! variants additionally rely on a copy of that last symbol placed right after
//! the text, so the skipping loop has no bounds check. The "memcmp" variants
//! replace the inner loop with a slice comparison.

pub(super) fn naive(text: &[u8], word: &[u8], from: usize) -> Option<usize> {
    let (n, m) = (text.len(), word.len());
    if from + m > n {
        return None;
    }

    'outer: for i in from..=n - m {
        for j in 0..m {
            if text[i + j] != word[j] {
                continue 'outer;
            }
        }
        return Some(i);
    }

    None
}

pub(super) fn fast_loop(text: &[u8], word: &[u8], from: usize) -> Option<usize> {
    let (n, m) = (text.len(), word.len());
    if from + m > n {
        return None;
    }
    let last = word[m - 1];

    'outer: for i in from..=n - m {
        if text[i + m - 1] != last {
            continue;
        }
        for j in 0..m - 1 {
            if text[i + j] != word[j] {
                continue 'outer;
            }
        }
        return Some(i);
    }

    None
}

/// `text` holds `text_len` symbols followed by the sentinel, which must be
/// the last symbol of `word`.
pub(super) fn sentinel(text: &[u8], text_len: usize, word: &[u8], from: usize) -> Option<usize> {
    let m = word.len();
    if from + m > text_len {
        return None;
    }
    let last = word[m - 1];

    // Index of the symbol aligned with the end of the word.
    let mut end = from + m - 1;
    loop {
        while text[end] != last {
            end += 1;
        }
        if end == text_len {
            return None;
        }

        let start = end + 1 - m;
        if (0..m - 1).all(|j| text[start + j] == word[j]) {
            return Some(start);
        }
        end += 1;
    }
}

pub(super) fn memcmp(text: &[u8], word: &[u8], from: usize) -> Option<usize> {
    let (n, m) = (text.len(), word.len());
    if from + m > n {
        return None;
    }

    (from..=n - m).find(|&i| text[i..i + m] == *word)
}

pub(super) fn fast_loop_memcmp(text: &[u8], word: &[u8], from: usize) -> Option<usize> {
    let (n, m) = (text.len(), word.len());
    if from + m > n {
        return None;
    }
    let last = word[m - 1];

    (from..=n - m).find(|&i| text[i + m - 1] == last && text[i..i + m - 1] == word[..m - 1])
}

pub(super) fn sentinel_memcmp(
    text: &[u8],
    text_len: usize,
    word: &[u8],
    from: usize,
) -> Option<usize> {
    let m = word.len();
    if from + m > text_len {
        return None;
    }
    let last = word[m - 1];

    let mut end = from + m - 1;
    loop {
        while text[end] != last {
            end += 1;
        }
        if end == text_len {
            return None;
        }

        let start = end + 1 - m;
        if text[start..end] == word[..m - 1] {
            return Some(start);
        }
        end += 1;
    }
}
