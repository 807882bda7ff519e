#![allow(clippy::too_many_lines, clippy::needless_pass_by_value)]

use std::fs::File;
use std::io::{self, Write};
use std::process;

use clap::Parser;
use colored::Colorize;

use sans_rs::cli::{Args, FilterKind};
use sans_rs::engine::{join_n_tree_newick, SansEngine};
use sans_rs::error::PhyloError;
use sans_rs::format::{self, SequenceFormat, SplitListFormat};
use sans_rs::kmer::KmerLength;
use sans_rs::reader;
use sans_rs::taxa;

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

fn main() {
    #[cfg(feature = "tracing")]
    init_tracing();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{}\n {}", "Application error:".red().bold(), e.to_string().red());
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), PhyloError> {
    let k = KmerLength::new(args.k)?;
    let n = args.files.len();

    if !args.quiet {
        print_banner(args, n);
    }

    let names = args
        .taxa
        .as_ref()
        .map(|path| taxa::load(path))
        .transpose()?;

    let engine = SansEngine::new(n, k);
    for (color, path) in args.files.iter().enumerate() {
        let format = SequenceFormat::Auto.resolve(Some(path));
        let sequences = reader::read_sequences(path, format)?;
        for seq in &sequences {
            engine.add_kmers(seq, color, args.canonicalise(), args.max_iupac)?;
        }
    }

    let splits = engine.add_weights(args.t, args.reducer.function());

    let mut out: Box<dyn Write> = if args.output.as_os_str() == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(File::create(&args.output)?)
    };

    if args.split_list {
        format::write_split_list(&mut out, &splits, args.split_list_format)?;
        return Ok(());
    }

    match args.filter {
        FilterKind::Strict => {
            let outcome = SansEngine::filter_strict(n, &splits, names.as_ref())?;
            format::write_newick(&mut out, &outcome.newick.expect("strict filter always builds a tree"))?;
        }
        FilterKind::Weakly => {
            let outcome = SansEngine::filter_weakly(&splits);
            format::write_split_list(&mut out, &outcome.accepted, SplitListFormat::Tsv)?;
        }
        FilterKind::NTree => {
            let outcomes = SansEngine::filter_n_tree(n, &splits, args.num_trees, names.as_ref())?;
            let newick = join_n_tree_newick(&outcomes);
            format::write_newick(&mut out, &newick)?;
        }
    }

    Ok(())
}

fn print_banner(args: &Args, n: usize) {
    eprintln!("{}: {}", "k".bold(), args.k.to_string().blue().bold());
    eprintln!("{}: {}", "t".bold(), args.t.to_string().blue().bold());
    eprintln!("{}: {}", "colors".bold(), n.to_string().blue().bold());
    eprintln!(
        "{}: {}",
        "canonical".bold(),
        args.canonicalise().to_string().blue().bold()
    );
    eprintln!(
        "{}: {}",
        "reducer".bold(),
        format!("{:?}", args.reducer).to_lowercase().blue().bold()
    );
    eprintln!(
        "{}: {}",
        "filter".bold(),
        format!("{:?}", args.filter).to_lowercase().blue().bold()
    );
    eprintln!();
}
