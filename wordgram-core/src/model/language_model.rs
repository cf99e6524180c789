use std::path::Path;

use rand::Rng;
use rand::rngs::StdRng;

use crate::io::{build_output_path, read_file, write_lines};
use super::counts::CountTables;
use super::probability::ProbabilityTable;
use super::sequence::join_tokens;

/// Reserved token opening every training sequence.
pub const START_TOKEN: &str = "<s>";
/// Reserved token closing every training sequence.
pub const END_TOKEN: &str = "</s>";
/// Reserved token returned when no continuation exists for a history.
pub const FAIL_TOKEN: &str = "<fail>";

/// Upper bound on the number of words drawn per completion. The loop
/// has no structural bound when the probability mass is malformed and
/// neither terminal token can be drawn.
const MAX_COMPLETION_TOKENS: usize = 10_000;

/// A word-level maximum-likelihood n-gram language model.
///
/// Owns the sorted vocabulary, the frozen conditional-probability
/// table and the seeded random stream used for every draw.
///
/// # Responsibilities
/// - Build the model once from a tokenized corpus (lines or file)
/// - Optionally write the vocabulary and counts output files
/// - Draw a next word for a (history, order) query
/// - Complete a sentence until an end or failure token is drawn
///
/// # Invariants
/// - `max_order` is always >= 2
/// - The vocabulary and probability table are immutable after construction
/// - The random stream is mutated by every draw and is never reset;
///   the draw ordering is the sole source of reproducibility
#[derive(Debug)]
pub struct LanguageModel {
	/// Maximum n-gram order the model was trained for
	max_order: usize, // must be >= 2

	/// Every distinct corpus token, ascending-sorted. Sampling scans
	/// this fixed order, which makes draws reproducible.
	vocab: Vec<String>,

	/// Conditional probabilities P(w|h) for every observed n-gram.
	probabilities: ProbabilityTable,

	/// Seeded random stream shared by all sampling calls.
	rng: StdRng,
}

impl LanguageModel {
	/// Builds a model from tokenized corpus lines.
	///
	/// Each line is an independent training sequence, expected to
	/// already carry the `<s>` and `</s>` boundary markers; lines
	/// without them are not validated.
	///
	/// # Errors
	/// Returns an error if `max_order < 2`.
	pub fn from_lines(lines: &[String], max_order: usize, rng: StdRng) -> Result<Self, String> {
		let tables = CountTables::from_lines(lines, max_order)?;
		Ok(Self::from_tables(tables, rng))
	}

	/// Builds a model from a plaintext corpus file, one training
	/// sequence per line, tokens whitespace-separated.
	///
	/// # Behavior
	/// - If a binary cache (`corpus.txt` → `corpus.bin`) exists and was
	///   built for the same `max_order`, the count tables are loaded
	///   from it with `postcard`; otherwise the corpus is read, counted
	///   and the cache is (re)written.
	/// - If `vocab_path` is given, the vocabulary is written to it, one
	///   token per line, in sorted order.
	/// - If `counts_path` is given, every non-zero n-gram count is
	///   written as `<ngram>\t<count>`, sorted ascending by n-gram.
	///
	/// # Errors
	/// Returns an error naming the failing path if the corpus or either
	/// output file cannot be opened; no partial model is returned.
	pub fn from_corpus_file<P: AsRef<Path>>(
		filepath: P,
		max_order: usize,
		rng: StdRng,
		vocab_path: Option<&Path>,
		counts_path: Option<&Path>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let filepath = filepath.as_ref();
		let cache_path = build_output_path(filepath, "bin")?;

		let mut tables = None;
		if cache_path.exists() {
			let bytes = std::fs::read(&cache_path)?;
			let cached: CountTables = postcard::from_bytes(&bytes)?;
			if cached.max_order() == max_order {
				tables = Some(cached);
			}
		}

		let tables = match tables {
			Some(tables) => tables,
			None => {
				let lines = read_file(filepath)
					.map_err(|e| format!("Unable to open file {}: {}", filepath.display(), e))?;
				let tables = CountTables::from_lines(&lines, max_order)?;
				let bytes = postcard::to_stdvec(&tables)?;
				std::fs::write(&cache_path, bytes)?;
				tables
			}
		};

		if let Some(path) = vocab_path {
			Self::save_vocab(path, &tables)?;
		}
		if let Some(path) = counts_path {
			Self::save_counts(path, &tables)?;
		}

		Ok(Self::from_tables(tables, rng))
	}

	/// Freezes count tables into a model: probabilities are estimated
	/// once and the counts are dropped, keeping only the vocabulary.
	fn from_tables(tables: CountTables, rng: StdRng) -> Self {
		let probabilities = ProbabilityTable::from_counts(&tables);
		Self {
			max_order: tables.max_order(),
			vocab: tables.into_vocab(),
			probabilities,
			rng,
		}
	}

	/// Writes the vocabulary sink: one token per line, sorted order.
	fn save_vocab(path: &Path, tables: &CountTables) -> Result<(), String> {
		write_lines(path, tables.vocab())
			.map_err(|e| format!("Unable to open file {}: {}", path.display(), e))
	}

	/// Writes the counts sink: `<ngram>\t<count>` per line, sorted
	/// ascending by the n-gram string.
	fn save_counts(path: &Path, tables: &CountTables) -> Result<(), String> {
		let lines = tables
			.sorted_ngram_entries()
			.into_iter()
			.map(|(ngram, count)| format!("{}\t{}", ngram, count));
		write_lines(path, lines)
			.map_err(|e| format!("Unable to open file {}: {}", path.display(), e))
	}

	/// Returns the maximum order the model was trained for.
	pub fn max_order(&self) -> usize {
		self.max_order
	}

	/// Returns the sorted vocabulary.
	pub fn vocab(&self) -> &[String] {
		&self.vocab
	}

	/// Returns true if the word was seen anywhere in the corpus.
	pub fn in_vocabulary(&self, word: &str) -> bool {
		self.vocab.binary_search_by(|w| w.as_str().cmp(word)).is_ok()
	}

	/// Returns P(w|h) for a joined n-gram, 0 if it was never observed.
	pub fn probability(&self, ngram: &str) -> f64 {
		self.probabilities.get(ngram)
	}

	/// Draws the next word for a history at the given order.
	///
	/// Consumes exactly one value from the random stream and scans the
	/// vocabulary in its fixed sorted order, accumulating the
	/// conditional probability of each candidate n-gram (absent entries
	/// count as 0). The first word whose running sum strictly exceeds
	/// the draw is returned: inverse-CDF sampling over a reproducible
	/// word ordering.
	///
	/// Returns `FAIL_TOKEN` if the history has no recorded continuation
	/// at all. If the history does have continuations but floating-point
	/// residue leaves the accumulated mass just under the draw, the last
	/// vocabulary word is returned as a fallback.
	pub fn random_next_word(&mut self, history: &[String], order: usize) -> String {
		// No more than order - 1 history words condition the draw
		let start = history.len().saturating_sub(order.saturating_sub(1));
		let prefix = join_tokens(&history[start..]);

		let draw: f64 = self.rng.random();

		let mut sum = 0.0;
		let mut has_continuation = false;
		for word in &self.vocab {
			let ngram = if prefix.is_empty() {
				word.clone()
			} else {
				format!("{} {}", prefix, word)
			};
			let p = self.probabilities.get(&ngram);
			if p > 0.0 {
				has_continuation = true;
			}
			sum += p;
			if sum > draw {
				return word.clone();
			}
		}

		if has_continuation {
			// Mass exists but rounded below the draw
			match self.vocab.last() {
				Some(word) => word.clone(),
				None => FAIL_TOKEN.to_owned(),
			}
		} else {
			FAIL_TOKEN.to_owned()
		}
	}

	/// Completes a sentence from an initial history.
	///
	/// The caller's history is copied, never modified. Words are drawn
	/// one at a time, each conditioned on the most recent `order - 1`
	/// tokens of the working history, and appended space-separated to
	/// the returned string. Generation stops once `</s>` or `<fail>`
	/// is drawn; the terminal token is included in the result. A
	/// safety cap bounds the loop, closing the completion with the
	/// failure token if it is ever reached.
	pub fn random_completion(&mut self, history: &[String], order: usize) -> String {
		let mut context: Vec<String> = history.to_vec();
		let mut completion = String::new();

		for _ in 0..MAX_COMPLETION_TOKENS {
			// Keep only the most recent order - 1 tokens, oldest first out
			let start = context.len().saturating_sub(order.saturating_sub(1));
			context.drain(..start);

			let word = self.random_next_word(&context, order);
			if !completion.is_empty() {
				completion.push(' ');
			}
			completion.push_str(&word);

			if word == END_TOKEN || word == FAIL_TOKEN {
				return completion;
			}
			context.push(word);
		}

		if !completion.is_empty() {
			completion.push(' ');
		}
		completion.push_str(FAIL_TOKEN);
		completion
	}
}
