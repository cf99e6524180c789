use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::sequence::{join_tokens, split_tokens};

/// Occurrence counts extracted from a tokenized training corpus.
///
/// `CountTables` stores, for every order from 2 up to `max_order`,
/// how often each n-gram and each history (the n-gram without its
/// last token) was observed, plus the deduplicated sorted vocabulary.
///
/// # Responsibilities
/// - Scan each corpus line with a sliding window per order
/// - Accumulate n-gram and history occurrence counts together
/// - Collect every distinct token into the vocabulary
///
/// # Invariants
/// - `max_order` is always >= 2
/// - Keys with a zero count are absent, never stored
/// - Whenever an n-gram has a count, its history has a count
/// - `vocab` contains no duplicates and is ascending-sorted
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CountTables {
	/// Maximum n-gram order the tables were built for
	max_order: usize, // must be >= 2

	/// Mapping from a joined n-gram (2 to max_order tokens) to its count.
	ngrams: HashMap<String, usize>,

	/// Mapping from a joined history (1 to max_order - 1 tokens) to its count.
	histories: HashMap<String, usize>,

	/// Every distinct token of the corpus, ascending-sorted.
	vocab: Vec<String>,
}

impl CountTables {
	/// Builds count tables from tokenized corpus lines.
	///
	/// Each line is an independent training sequence and is expected to
	/// already carry the boundary markers; windows never cross lines.
	/// For each order n in `2..=max_order`, every width-n window over a
	/// line's tokens increments both the n-gram and its history by one.
	/// `slice::windows` includes the window ending at the line's last
	/// token, so the sentence-final n-gram is never dropped.
	///
	/// # Errors
	/// Returns an error if `max_order < 2`.
	pub fn from_lines(lines: &[String], max_order: usize) -> Result<Self, String> {
		if max_order < 2 {
			return Err("max_order must be >= 2".to_owned());
		}

		let mut ngrams: HashMap<String, usize> = HashMap::new();
		let mut histories: HashMap<String, usize> = HashMap::new();
		let mut words: BTreeSet<String> = BTreeSet::new();

		for line in lines {
			let tokens = split_tokens(line);

			for token in &tokens {
				if !words.contains(token) {
					words.insert(token.clone());
				}
			}

			for n in 2..=max_order {
				// Lines shorter than n yield no windows at all
				for window in tokens.windows(n) {
					*ngrams.entry(join_tokens(window)).or_insert(0) += 1;
					*histories.entry(join_tokens(&window[..n - 1])).or_insert(0) += 1;
				}
			}
		}

		Ok(Self {
			max_order,
			ngrams,
			histories,
			vocab: words.into_iter().collect(),
		})
	}

	/// Returns the maximum order the tables were built for.
	pub fn max_order(&self) -> usize {
		self.max_order
	}

	/// Returns the count of an n-gram, or 0 if it was never observed.
	pub fn ngram_count(&self, ngram: &str) -> usize {
		self.ngrams.get(ngram).copied().unwrap_or(0)
	}

	/// Returns the count of a history, or 0 if it was never observed.
	pub fn history_count(&self, history: &str) -> usize {
		self.histories.get(history).copied().unwrap_or(0)
	}

	/// Returns an iterator over all (n-gram, count) entries.
	///
	/// Iteration order is unspecified; callers needing a stable order
	/// must sort (see `sorted_ngram_entries`).
	pub fn ngram_entries(&self) -> impl Iterator<Item = (&str, usize)> {
		self.ngrams.iter().map(|(k, v)| (k.as_str(), *v))
	}

	/// Returns all (n-gram, count) entries sorted ascending by the
	/// n-gram string. This is the order of the counts output file.
	pub fn sorted_ngram_entries(&self) -> Vec<(&str, usize)> {
		let mut entries: Vec<(&str, usize)> = self.ngram_entries().collect();
		entries.sort_by(|a, b| a.0.cmp(b.0));
		entries
	}

	/// Returns the sorted vocabulary.
	pub fn vocab(&self) -> &[String] {
		&self.vocab
	}

	/// Consumes the tables, returning the vocabulary.
	pub(crate) fn into_vocab(self) -> Vec<String> {
		self.vocab
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lines(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn rejects_order_below_two() {
		assert!(CountTables::from_lines(&lines(&["<s> a </s>"]), 1).is_err());
		assert!(CountTables::from_lines(&lines(&["<s> a </s>"]), 0).is_err());
	}

	#[test]
	fn bigram_counts_for_two_line_corpus() {
		let tables =
			CountTables::from_lines(&lines(&["<s> a b </s>", "<s> a c </s>"]), 2).unwrap();

		assert_eq!(tables.ngram_count("<s> a"), 2);
		assert_eq!(tables.ngram_count("a b"), 1);
		assert_eq!(tables.ngram_count("b </s>"), 1);
		assert_eq!(tables.ngram_count("a c"), 1);
		assert_eq!(tables.ngram_count("c </s>"), 1);
		assert_eq!(tables.ngram_entries().count(), 5);

		assert_eq!(tables.history_count("<s>"), 2);
		assert_eq!(tables.history_count("a"), 2);
		assert_eq!(tables.history_count("b"), 1);
		assert_eq!(tables.history_count("c"), 1);
	}

	#[test]
	fn sentence_final_window_is_counted() {
		// The trigram ending exactly at </s> must be present
		let tables = CountTables::from_lines(&lines(&["<s> a b </s>"]), 3).unwrap();
		assert_eq!(tables.ngram_count("a b </s>"), 1);
		assert_eq!(tables.ngram_count("<s> a b"), 1);
	}

	#[test]
	fn windows_do_not_cross_lines() {
		let tables = CountTables::from_lines(&lines(&["<s> a </s>", "<s> b </s>"]), 2).unwrap();
		assert_eq!(tables.ngram_count("</s> <s>"), 0);
	}

	#[test]
	fn zero_counts_are_never_stored() {
		let tables = CountTables::from_lines(&lines(&["<s> a </s>"]), 2).unwrap();
		for (_, count) in tables.ngram_entries() {
			assert!(count > 0);
		}
	}

	#[test]
	fn every_ngram_has_a_counted_history() {
		let tables =
			CountTables::from_lines(&lines(&["<s> a b </s>", "<s> a c </s>"]), 3).unwrap();
		for (ngram, _) in tables.ngram_entries() {
			let history = crate::model::sequence::history_of(ngram);
			assert!(tables.history_count(history) > 0, "missing history: {}", history);
		}
	}

	#[test]
	fn vocab_is_sorted_and_unique() {
		let tables =
			CountTables::from_lines(&lines(&["<s> b a </s>", "<s> a b </s>"]), 2).unwrap();
		let vocab = tables.vocab();
		assert_eq!(vocab, ["</s>", "<s>", "a", "b"]);
		for pair in vocab.windows(2) {
			assert!(pair[0] < pair[1]);
		}
	}

	#[test]
	fn short_lines_yield_no_windows() {
		let tables = CountTables::from_lines(&lines(&["<s>"]), 2).unwrap();
		assert_eq!(tables.ngram_entries().count(), 0);
		assert_eq!(tables.vocab(), ["<s>"]);
	}

	#[test]
	fn sorted_entries_are_ascending() {
		let tables =
			CountTables::from_lines(&lines(&["<s> a b </s>", "<s> a c </s>"]), 2).unwrap();
		let entries = tables.sorted_ngram_entries();
		for pair in entries.windows(2) {
			assert!(pair[0].0 < pair[1].0);
		}
	}
}
