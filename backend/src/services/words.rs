//! Rarity-weighted random word selection
//!
//! Words come from SCOWL-style lists named `english-<name>.<NN>`, where
//! `NN` is the list's rarity (10 = most common, higher = rarer). Draws
//! favour common tiers: a scaled exponential sample picks the tier, then a
//! word is chosen uniformly within it.

use anyhow::{Context, Result};
use rand::Rng;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use werd_shared::WordEntry;

/// Scale applied to the unit exponential sample
const DRAW_SCALE: f64 = 2.5;
const MIN_DRAW: f64 = 10.0;
const MAX_DRAW: f64 = 100.0;

/// Words returned by one `/words` call
pub const WORDS_PER_REQUEST: usize = 5;

/// Word lists keyed by rarity tier
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    tiers: BTreeMap<u32, Vec<String>>,
}

impl WordBank {
    /// Build a bank from explicit tiers, dropping empty ones
    pub fn from_tiers(tiers: impl IntoIterator<Item = (u32, Vec<String>)>) -> Self {
        let tiers = tiers
            .into_iter()
            .filter(|(_, words)| !words.is_empty())
            .collect();
        Self { tiers }
    }

    /// Load every `english-*.NN` list in `dir`
    ///
    /// Files whose suffix is not an integer are skipped. Several files may
    /// share a tier; their words are concatenated.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tiers: BTreeMap<u32, Vec<String>> = BTreeMap::new();

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read word list directory {}", dir.display()))?;

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(rarity) = file_name.to_str().and_then(parse_rarity) else {
                continue;
            };

            let contents = fs::read_to_string(entry.path())
                .with_context(|| format!("Failed to read word list {}", entry.path().display()))?;
            let words = tiers.entry(rarity).or_default();
            words.extend(contents.lines().filter(|l| !l.is_empty()).map(str::to_string));
            debug!(file = ?file_name, rarity, "Loaded word list");
        }

        let bank = Self::from_tiers(tiers);
        info!(total_words = bank.total_words(), tiers = bank.tiers.len(), "Word lists loaded");
        Ok(bank)
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn total_words(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    /// Rarity tiers in ascending order
    pub fn rarities(&self) -> impl Iterator<Item = u32> + '_ {
        self.tiers.keys().copied()
    }

    /// Greatest tier not above `draw`, falling back to the lowest tier
    pub fn tier_for(&self, draw: u32) -> Option<u32> {
        self.tiers
            .range(..=draw)
            .next_back()
            .or_else(|| self.tiers.iter().next())
            .map(|(rarity, _)| *rarity)
    }

    pub fn random_word_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<WordEntry> {
        let rarity = self.tier_for(exponential_draw(rng))?;
        let words = self.tiers.get(&rarity)?;
        let word = &words[rng.gen_range(0..words.len())];

        Some(WordEntry {
            word: word.clone(),
            rarity,
        })
    }

    pub fn random_word(&self) -> Option<WordEntry> {
        self.random_word_with(&mut rand::thread_rng())
    }

    /// Draw `count` words independently; empty if the bank is empty
    pub fn sample(&self, count: usize) -> Vec<WordEntry> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map_while(|_| self.random_word_with(&mut rng))
            .collect()
    }
}

/// `english-words.35` → 35
fn parse_rarity(file_name: &str) -> Option<u32> {
    if !file_name.starts_with("english-") {
        return None;
    }
    let (_, suffix) = file_name.split_once('.')?;
    if suffix.contains('.') {
        return None;
    }
    suffix.parse().ok()
}

/// Exponential sample scaled by [`DRAW_SCALE`], clamped to `[10, 100]`
pub fn exponential_draw<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    let u: f64 = rng.gen();
    // Inverse CDF of Exp(1); 1 - u is in (0, 1]
    let sample = -(1.0 - u).ln() * DRAW_SCALE;
    sample.clamp(MIN_DRAW, MAX_DRAW) as u32
}
