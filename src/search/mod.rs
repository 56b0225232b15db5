//! Exact string-matching algorithms.
//!
//! Every algorithm answers the same question: where is the first occurrence
//! of a word in a text, starting from a given position. They only differ in
//! how they walk the text, which is what the benchmarks measure.

use anyhow::Result;
use clap::ValueEnum;
use log::error;
use std::{fmt, str::FromStr};

mod border;
mod boyer_moore;
mod naive;

/// Text to search in.
///
/// The buffer always holds one byte past the end of the text, so that the
/// sentinel variants can plant the searched symbol there and drop the bounds
/// check from their scanning loop.
#[derive(Clone, Debug)]
pub struct Haystack {
    buf: Vec<u8>,
}

impl Haystack {
    pub fn new(text: &[u8]) -> Self {
        let mut buf = Vec::with_capacity(text.len() + 1);
        buf.extend_from_slice(text);
        buf.push(0);
        Self { buf }
    }

    pub fn len(&self) -> usize {
        self.buf.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len()]
    }

    /// Writes `byte` in the reserved slot and returns the text followed by
    /// the sentinel.
    fn with_sentinel(&mut self, byte: u8) -> &[u8] {
        let len = self.len();
        self.buf[len] = byte;
        &self.buf
    }
}

impl From<Vec<u8>> for Haystack {
    fn from(mut text: Vec<u8>) -> Self {
        text.push(0);
        Self { buf: text }
    }
}

/// The benchmarked algorithms, in the order that defines their index in the
/// result file names.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SearchAlgorithm {
    Naive,
    NaiveFastLoop,
    NaiveSentinel,
    NaiveMemcmp,
    NaiveFastLoopMemcmp,
    NaiveSentinelMemcmp,
    MorrisPratt,
    KnuthMorrisPratt,
    BoyerMoore,
    Horspool,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchAlgorithm::Naive => write!(f, "naive"),
            SearchAlgorithm::NaiveFastLoop => write!(f, "naive-fast-loop"),
            SearchAlgorithm::NaiveSentinel => write!(f, "naive-sentinel"),
            SearchAlgorithm::NaiveMemcmp => write!(f, "naive-memcmp"),
            SearchAlgorithm::NaiveFastLoopMemcmp => write!(f, "naive-fast-loop-memcmp"),
            SearchAlgorithm::NaiveSentinelMemcmp => write!(f, "naive-sentinel-memcmp"),
            SearchAlgorithm::MorrisPratt => write!(f, "morris-pratt"),
            SearchAlgorithm::KnuthMorrisPratt => write!(f, "knuth-morris-pratt"),
            SearchAlgorithm::BoyerMoore => write!(f, "boyer-moore"),
            SearchAlgorithm::Horspool => write!(f, "horspool"),
        }
    }
}

impl FromStr for SearchAlgorithm {
    type Err = ();

    fn from_str(input: &str) -> Result<SearchAlgorithm, Self::Err> {
        match input {
            "naive" => Ok(SearchAlgorithm::Naive),
            "naive-fast-loop" => Ok(SearchAlgorithm::NaiveFastLoop),
            "naive-sentinel" => Ok(SearchAlgorithm::NaiveSentinel),
            "naive-memcmp" => Ok(SearchAlgorithm::NaiveMemcmp),
            "naive-fast-loop-memcmp" => Ok(SearchAlgorithm::NaiveFastLoopMemcmp),
            "naive-sentinel-memcmp" => Ok(SearchAlgorithm::NaiveSentinelMemcmp),
            "morris-pratt" => Ok(SearchAlgorithm::MorrisPratt),
            "knuth-morris-pratt" => Ok(SearchAlgorithm::KnuthMorrisPratt),
            "boyer-moore" => Ok(SearchAlgorithm::BoyerMoore),
            "horspool" => Ok(SearchAlgorithm::Horspool),
            _ => Err(()),
        }
    }
}

impl SearchAlgorithm {
    pub fn iter_variants() -> std::slice::Iter<'static, SearchAlgorithm> {
        static VARIANTS: [SearchAlgorithm; 10] = [
            SearchAlgorithm::Naive,
            SearchAlgorithm::NaiveFastLoop,
            SearchAlgorithm::NaiveSentinel,
            SearchAlgorithm::NaiveMemcmp,
            SearchAlgorithm::NaiveFastLoopMemcmp,
            SearchAlgorithm::NaiveSentinelMemcmp,
            SearchAlgorithm::MorrisPratt,
            SearchAlgorithm::KnuthMorrisPratt,
            SearchAlgorithm::BoyerMoore,
            SearchAlgorithm::Horspool,
        ];
        VARIANTS.iter()
    }

    /// 1-based index used in the result file names.
    pub fn index(&self) -> usize {
        Self::iter_variants()
            .position(|algorithm| algorithm == self)
            .map(|pos| pos + 1)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> Option<SearchAlgorithm> {
        index
            .checked_sub(1)
            .and_then(|pos| Self::iter_variants().nth(pos))
            .copied()
    }

    /// Human-readable name, used as subplot title.
    pub fn title(&self) -> &'static str {
        match self {
            SearchAlgorithm::Naive => "Naive",
            SearchAlgorithm::NaiveFastLoop => "Naive, fast loop",
            SearchAlgorithm::NaiveSentinel => "Naive, fast loop, sentinel",
            SearchAlgorithm::NaiveMemcmp => "Naive, memcmp",
            SearchAlgorithm::NaiveFastLoopMemcmp => "Naive, fast loop, memcmp",
            SearchAlgorithm::NaiveSentinelMemcmp => "Naive, fast loop, sentinel, memcmp",
            SearchAlgorithm::MorrisPratt => "Morris-Pratt",
            SearchAlgorithm::KnuthMorrisPratt => "Knuth-Morris-Pratt",
            SearchAlgorithm::BoyerMoore => "Boyer-Moore",
            SearchAlgorithm::Horspool => "Horspool",
        }
    }

    /// Pre-computes whatever per-word tables the algorithm needs.
    pub fn compile(&self, word: &[u8]) -> Result<Pattern> {
        if word.is_empty() {
            error!("cannot search for an empty word (algorithm={self})");
            anyhow::bail!("cannot search for an empty word (algorithm={self})");
        }

        let tables = match self {
            SearchAlgorithm::MorrisPratt => Tables::Border(border::morris_pratt_table(word)),
            SearchAlgorithm::KnuthMorrisPratt => {
                Tables::Border(border::knuth_morris_pratt_table(word))
            }
            SearchAlgorithm::BoyerMoore => Tables::BoyerMoore {
                bad_char: boyer_moore::bad_char_table(word),
                good_suffix: boyer_moore::good_suffix_table(word),
            },
            SearchAlgorithm::Horspool => Tables::Horspool(boyer_moore::bad_char_table(word)),
            _ => Tables::None,
        };

        Ok(Pattern {
            algorithm: *self,
            word: word.to_vec(),
            tables,
        })
    }
}

#[derive(Clone, Debug)]
enum Tables {
    None,
    Border(Vec<isize>),
    BoyerMoore {
        bad_char: [usize; 256],
        good_suffix: Vec<usize>,
    },
    Horspool([usize; 256]),
}

/// A word compiled for one algorithm.
#[derive(Clone, Debug)]
pub struct Pattern {
    algorithm: SearchAlgorithm,
    word: Vec<u8>,
    tables: Tables,
}

impl Pattern {
    pub fn algorithm(&self) -> SearchAlgorithm {
        self.algorithm
    }

    pub fn word(&self) -> &[u8] {
        &self.word
    }

    /// Position of the first occurrence of the word at or after `from`.
    pub fn find(&self, haystack: &mut Haystack, from: usize) -> Option<usize> {
        let word = self.word.as_slice();
        match (&self.algorithm, &self.tables) {
            (SearchAlgorithm::NaiveSentinel, _) => {
                let text_len = haystack.len();
                let text = haystack.with_sentinel(word[word.len() - 1]);
                naive::sentinel(text, text_len, word, from)
            }
            (SearchAlgorithm::NaiveSentinelMemcmp, _) => {
                let text_len = haystack.len();
                let text = haystack.with_sentinel(word[word.len() - 1]);
                naive::sentinel_memcmp(text, text_len, word, from)
            }
            (SearchAlgorithm::Naive, _) => naive::naive(haystack.as_bytes(), word, from),
            (SearchAlgorithm::NaiveFastLoop, _) => {
                naive::fast_loop(haystack.as_bytes(), word, from)
            }
            (SearchAlgorithm::NaiveMemcmp, _) => naive::memcmp(haystack.as_bytes(), word, from),
            (SearchAlgorithm::NaiveFastLoopMemcmp, _) => {
                naive::fast_loop_memcmp(haystack.as_bytes(), word, from)
            }
            (_, Tables::Border(table)) => border::search(haystack.as_bytes(), word, table, from),
            (
                _,
                Tables::BoyerMoore {
                    bad_char,
                    good_suffix,
                },
            ) => boyer_moore::boyer_moore(haystack.as_bytes(), word, bad_char, good_suffix, from),
            (_, Tables::Horspool(bad_char)) => {
                boyer_moore::horspool(haystack.as_bytes(), word, bad_char, from)
            }
            (_, Tables::None) => unreachable!("tables are built for every table-driven algorithm"),
        }
    }

    /// Every occurrence of the word, overlapping ones included. The search
    /// restarts one position after each match.
    pub fn find_all(&self, haystack: &mut Haystack) -> Vec<usize> {
        let mut positions = Vec::new();
        let mut from = 0;
        while let Some(pos) = self.find(haystack, from) {
            positions.push(pos);
            from = pos + 1;
        }
        positions
    }

    /// Same walk as `find_all`, without collecting the positions.
    pub fn count(&self, haystack: &mut Haystack) -> usize {
        let mut count = 0;
        let mut from = 0;
        while let Some(pos) = self.find(haystack, from) {
            count += 1;
            from = pos + 1;
        }
        count
    }
}
