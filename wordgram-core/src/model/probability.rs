use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::counts::CountTables;
use super::sequence::history_of;

/// Sparse table of maximum-likelihood conditional probabilities.
///
/// For every observed n-gram (h, w), stores P(w|h) computed strictly
/// as count(ngram) / count(history). Zero-count n-grams were never in
/// the count tables, so only non-zero probabilities exist here.
///
/// # Invariants
/// - Every stored value is in (0, 1]
/// - For a fixed history, the stored probabilities of its
///   continuations sum to 1.0 (within floating tolerance)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProbabilityTable {
	p: HashMap<String, f64>,
}

impl ProbabilityTable {
	/// Derives the probability table from count tables.
	///
	/// The history count is guaranteed present and non-zero by
	/// construction: histories and n-grams are always incremented
	/// together. No smoothing or unknown-word handling is applied.
	pub fn from_counts(tables: &CountTables) -> Self {
		let mut p = HashMap::new();
		for (ngram, count) in tables.ngram_entries() {
			let history_count = tables.history_count(history_of(ngram));
			p.insert(ngram.to_owned(), count as f64 / history_count as f64);
		}
		Self { p }
	}

	/// Returns P(w|h) for a joined n-gram, treating absence as 0.
	pub fn get(&self, ngram: &str) -> f64 {
		self.p.get(ngram).copied().unwrap_or(0.0)
	}

	/// Returns true if the n-gram has a recorded (non-zero) probability.
	pub fn contains(&self, ngram: &str) -> bool {
		self.p.contains_key(ngram)
	}

	/// Returns the number of stored entries.
	pub fn len(&self) -> usize {
		self.p.len()
	}

	/// Returns true if no n-gram was ever observed.
	pub fn is_empty(&self) -> bool {
		self.p.is_empty()
	}

	/// Returns an iterator over all (n-gram, probability) entries.
	pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
		self.p.iter().map(|(k, v)| (k.as_str(), *v))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lines(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|s| s.to_string()).collect()
	}

	fn two_line_table() -> ProbabilityTable {
		let tables =
			CountTables::from_lines(&lines(&["<s> a b </s>", "<s> a c </s>"]), 2).unwrap();
		ProbabilityTable::from_counts(&tables)
	}

	#[test]
	fn probabilities_match_count_ratios() {
		let table = two_line_table();
		assert_eq!(table.get("<s> a"), 1.0);
		assert_eq!(table.get("a b"), 0.5);
		assert_eq!(table.get("a c"), 0.5);
		assert_eq!(table.get("b </s>"), 1.0);
		assert_eq!(table.get("c </s>"), 1.0);
	}

	#[test]
	fn absent_ngrams_read_as_zero() {
		let table = two_line_table();
		assert_eq!(table.get("a d"), 0.0);
		assert!(!table.contains("a d"));
	}

	#[test]
	fn only_nonzero_entries_are_stored() {
		let table = two_line_table();
		assert_eq!(table.len(), 5);
		for (_, p) in table.entries() {
			assert!(p > 0.0 && p <= 1.0);
		}
	}

	#[test]
	fn mass_per_history_sums_to_one() {
		let tables = CountTables::from_lines(
			&lines(&["<s> a b a c </s>", "<s> b a b </s>", "<s> c </s>"]),
			3,
		)
		.unwrap();
		let table = ProbabilityTable::from_counts(&tables);

		let mut mass_by_history: HashMap<String, f64> = HashMap::new();
		for (ngram, p) in table.entries() {
			*mass_by_history
				.entry(history_of(ngram).to_owned())
				.or_insert(0.0) += p;
		}
		for (history, mass) in mass_by_history {
			assert!(
				(mass - 1.0).abs() < 1e-9,
				"history {:?} has mass {}",
				history,
				mass
			);
		}
	}

	#[test]
	fn exact_ratio_against_counts() {
		let tables = CountTables::from_lines(
			&lines(&["<s> a a b </s>", "<s> a b b </s>"]),
			2,
		)
		.unwrap();
		let table = ProbabilityTable::from_counts(&tables);
		for (ngram, p) in table.entries() {
			let expected = tables.ngram_count(ngram) as f64
				/ tables.history_count(history_of(ngram)) as f64;
			assert_eq!(p, expected);
		}
	}
}
