use std::io::{BufWriter, Write as _};

use clap::Parser;

fn main() -> std::io::Result<()> {
    let opts = Opts::parse();

    let mut stdout = BufWriter::new(std::io::stdout().lock());
    for text in opts.texts {
        writeln!(&mut stdout, "{}: {}", text, words::normalize(&text))?;
    }
    stdout.flush()
}

/// CLI to print the search form of Igbo words (tone marks stripped, lowercased)
#[derive(Parser)]
struct Opts {
    texts: Vec<String>,
}
