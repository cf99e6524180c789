/// Joins a sequence of tokens into its canonical string form,
/// each element separated by a single space.
///
/// An empty sequence yields the empty string.
pub(crate) fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
	let mut joined = String::new();
	for (i, token) in tokens.iter().enumerate() {
		if i > 0 {
			joined.push(' ');
		}
		joined.push_str(token.as_ref());
	}
	joined
}

/// Splits a line into whitespace-delimited tokens.
pub(crate) fn split_tokens(line: &str) -> Vec<String> {
	line.split_whitespace().map(str::to_owned).collect()
}

/// Returns the history of a joined n-gram: everything before the
/// final space, i.e. the n-gram without its last token.
///
/// A single-token n-gram has an empty history.
pub(crate) fn history_of(ngram: &str) -> &str {
	match ngram.rfind(' ') {
		Some(pos) => &ngram[..pos],
		None => "",
	}
}
