//! Write the post index for a static site.

use std::path::PathBuf;

use clap::Parser;
use static_site_tools::{IndexerConfig, PostIndexer, logging};

/// Index post directories into a JSON file.
#[derive(Parser)]
#[command(name = "generate-posts-json", version, about)]
struct Cli {
    /// Directory containing one subdirectory per post.
    #[arg(long, default_value = "posts")]
    posts_dir: PathBuf,

    /// Index file to write.
    #[arg(long, default_value = "posts.json")]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    let config = IndexerConfig {
        posts_dir: cli.posts_dir,
        output: cli.output,
        ..IndexerConfig::default()
    };

    if let Err(err) = PostIndexer::new(config).run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
