//! Command-line driver
//!
//! Runs a per-language query catalogue over CoNLL-U corpora and writes
//! one plain-text report file per query and corpus.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mimalloc::MiMalloc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use preverbs::{PreverbLexicon, Treebank, queries, report, scan_corpus};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Language {
    Greek,
    Sanskrit,
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Find preverb constructions in dependency treebanks"
)]
struct Cli {
    /// CoNLL-U corpus files or glob patterns (plain or .gz)
    #[arg(required = true)]
    corpora: Vec<String>,

    /// Query catalogue to run
    #[arg(short, long, value_enum)]
    language: Language,

    /// Directory for the per-query report files
    #[arg(short, long, default_value = "results")]
    output: PathBuf,

    /// File with one preverb lemma per line, overriding the built-in list
    #[arg(long)]
    lexicon: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let lexicon = match &cli.lexicon {
        Some(path) => load_lexicon(path)?,
        None => match cli.language {
            Language::Greek => PreverbLexicon::ancient_greek(),
            Language::Sanskrit => PreverbLexicon::vedic_sanskrit(),
        },
    };
    let catalogue = match cli.language {
        Language::Greek => queries::greek::catalogue(),
        Language::Sanskrit => queries::sanskrit::catalogue(),
    };

    let files = expand_corpora(&cli.corpora)?;
    if files.is_empty() {
        anyhow::bail!("no corpus files found");
    }

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating output directory {}", cli.output.display()))?;

    for path in &files {
        info!(corpus = %path.display(), "loading treebank");
        let sentences: Vec<_> = Treebank::from_file(path).into_iter().collect();
        info!(sentences = sentences.len(), "treebank loaded");

        let results = scan_corpus(&catalogue, &sentences, &lexicon);

        let stem = corpus_stem(path);
        for matches in &results {
            let out_path = cli
                .output
                .join(format!("{}_{}.txt", stem, matches.query.name));
            fs::write(&out_path, report::render(matches))
                .with_context(|| format!("writing {}", out_path.display()))?;
            info!(
                report = %out_path.display(),
                matches = matches.records.len(),
                "report written"
            );
        }
        info!(corpus = %path.display(), "job done");
    }

    Ok(())
}

/// Expand each corpus argument as a glob pattern; a plain path matches
/// itself. Patterns that match nothing are reported and skipped.
fn expand_corpora(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let mut matched: Vec<PathBuf> = glob::glob(pattern)
            .with_context(|| format!("invalid corpus pattern '{pattern}'"))?
            .filter_map(Result::ok)
            .collect();
        if matched.is_empty() {
            warn!(pattern = %pattern, "no corpus files match");
        }
        matched.sort();
        files.extend(matched);
    }
    Ok(files)
}

/// Report file prefix for a corpus path: `iliad.conllu.gz` -> `iliad`.
fn corpus_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("corpus");
    stem.trim_end_matches(".conllu").to_string()
}

fn load_lexicon(path: &Path) -> Result<PreverbLexicon> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading lexicon {}", path.display()))?;
    let lexicon = PreverbLexicon::new(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string),
    );
    if lexicon.is_empty() {
        anyhow::bail!("lexicon {} contains no lemmas", path.display());
    }
    Ok(lexicon)
}
