//! Random texts and word lists over an alphabet of a given size.
//!
//! Symbols are the first `alphabet_size` printable ASCII characters starting
//! at `!`, so neither texts nor words ever contain a line break and a word
//! list can be stored one word per line.

use anyhow::Result;
use log::{debug, error};
use rand::Rng;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

pub const ALPHABET_BASE: u8 = b'!';
pub const MAX_ALPHABET_SIZE: usize = 94;
pub const MAX_TEXT_LENGTH: usize = 5_000_000;
pub const MAX_WORD_LENGTH: usize = 1_000;
pub const MAX_WORD_LIST_LENGTH: usize = 100_000;

pub fn check_bound(name: &str, value: usize, max: usize) -> Result<()> {
    if value == 0 || value > max {
        let reason = format!("{name} must be between 1 and {max} ({name}={value})");
        error!("{reason}");
        anyhow::bail!(reason);
    }

    Ok(())
}

fn random_symbol<R: Rng>(rng: &mut R, alphabet_size: usize) -> u8 {
    ALPHABET_BASE + rng.gen_range(0..alphabet_size) as u8
}

pub fn random_text<R: Rng>(rng: &mut R, length: usize, alphabet_size: usize) -> Result<Vec<u8>> {
    check_bound("text length", length, MAX_TEXT_LENGTH)?;
    check_bound("alphabet size", alphabet_size, MAX_ALPHABET_SIZE)?;

    Ok((0..length)
        .map(|_| random_symbol(rng, alphabet_size))
        .collect())
}

pub fn random_words<R: Rng>(
    rng: &mut R,
    count: usize,
    word_length: usize,
    alphabet_size: usize,
) -> Result<Vec<Vec<u8>>> {
    check_bound("word list length", count, MAX_WORD_LIST_LENGTH)?;
    check_bound("word length", word_length, MAX_WORD_LENGTH)?;
    check_bound("alphabet size", alphabet_size, MAX_ALPHABET_SIZE)?;

    Ok((0..count)
        .map(|_| {
            (0..word_length)
                .map(|_| random_symbol(rng, alphabet_size))
                .collect()
        })
        .collect())
}

pub fn write_text(path: &Path, text: &[u8]) -> Result<()> {
    fs::write(path, text).map_err(|e| {
        let reason = format!(
            "error writing text (path={}, error={e:?})",
            path.display()
        );
        error!("{reason}");
        anyhow::anyhow!(reason)
    })?;
    debug!("wrote {} symbols to {}", text.len(), path.display());

    Ok(())
}

pub fn read_text(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        let reason = format!(
            "error reading text (path={}, error={e:?})",
            path.display()
        );
        error!("{reason}");
        anyhow::anyhow!(reason)
    })
}

pub fn write_word_list(path: &Path, words: &[Vec<u8>]) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        let reason = format!(
            "error creating word list (path={}, error={e:?})",
            path.display()
        );
        error!("{reason}");
        anyhow::anyhow!(reason)
    })?;

    let mut writer = BufWriter::new(file);
    for word in words {
        writer.write_all(word)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    debug!("wrote {} words to {}", words.len(), path.display());

    Ok(())
}

pub fn read_word_list(path: &Path) -> Result<Vec<Vec<u8>>> {
    let contents = read_text(path)?;

    Ok(contents
        .split(|&b| b == b'\n')
        .filter(|word| !word.is_empty())
        .map(|word| word.to_vec())
        .collect())
}
