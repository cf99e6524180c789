use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use wordgram_core::model::language_model::{LanguageModel, START_TOKEN};

#[derive(Parser)]
#[command(name = "wordgram", version, about = "Train an n-gram language model and complete sentences")]
struct Cli {
	/// Plaintext training corpus, one sentence per line,
	/// tokens whitespace-separated with <s> and </s> markers
	corpus: PathBuf,

	#[arg(short, long, default_value_t = 2, help = "Maximum n-gram order (>= 2)")]
	order: usize,

	#[arg(short, long, default_value_t = 5, help = "Random seed")]
	seed: u64,

	#[arg(short = 'n', long, default_value_t = 10, help = "Number of completions to generate")]
	completions: usize,

	#[arg(long, help = "Write the sorted vocabulary to this file")]
	vocab: Option<PathBuf>,

	#[arg(long, help = "Write the sorted n-gram counts to this file")]
	counts: Option<PathBuf>,
}

fn main() {
	let cli = Cli::parse();

	// The whole model is built up front; sampling never touches the corpus again
	let mut model = match LanguageModel::from_corpus_file(
		&cli.corpus,
		cli.order,
		StdRng::seed_from_u64(cli.seed),
		cli.vocab.as_deref(),
		cli.counts.as_deref(),
	) {
		Ok(model) => model,
		Err(e) => {
			eprintln!("Error: {}", e);
			process::exit(1);
		}
	};

	println!(
		"Model ready: {} words in vocabulary, max order {}",
		model.vocab().len(),
		model.max_order()
	);

	// Every completion starts from the sentence-start marker
	let history = vec![START_TOKEN.to_owned()];
	for i in 0..cli.completions {
		let completion = model.random_completion(&history, cli.order);
		println!("Completion {}: {} {}", i + 1, START_TOKEN, completion);
	}
}
