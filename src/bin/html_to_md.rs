//! Convert one HTML file to Markdown and print it to stdout.

use std::path::PathBuf;

use clap::Parser;
use static_site_tools::{convert_file, logging};

/// Convert an HTML document to Markdown.
#[derive(Parser)]
#[command(name = "html-to-md", version, about)]
struct Cli {
    /// HTML file to convert.
    file: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    match convert_file(&cli.file) {
        Ok(markdown) => println!("{markdown}"),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
