use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use flatbtree::{BTree, BufferManager, Loader, DEFAULT_POOL_SIZE, DEFAULT_TREE_HEIGHT};

/// Query and update a flat-file B-tree.
#[derive(Debug, Parser)]
#[command(name = "flatbtree", version)]
struct Cli {
    /// Directory holding the index files
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Number of page slots in the buffer manager
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: usize,

    /// Number of levels in the tree
    #[arg(long, default_value_t = DEFAULT_TREE_HEIGHT)]
    height: usize,

    /// Index file to load
    name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the value stored for a key
    Get { key: u64 },
    /// Insert a key/value pair and write it to disk
    Push { key: u64, value: u64 },
    /// Print the resident pages
    Dump,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if cli.pool_size == 0 || cli.height == 0 {
        return Err("--pool-size and --height must be > 0".into());
    }

    let bm = BufferManager::new(&cli.dir, cli.pool_size).into_shared();
    let tree = Loader::with_height(cli.height).load(&cli.name, &bm)?;

    match cli.command {
        Command::Get { key } => {
            let value = tree.get(key)?;
            println!("{key} -> {value}");
        }
        Command::Push { key, value } => {
            tree.push(key, value)?;
            let written = tree.flush()?;
            println!("inserted {key} -> {value} ({written} page(s) written)");
        }
        Command::Dump => dump(&tree),
    }

    println!("{}", bm.lock().stats());
    Ok(())
}

fn dump(tree: &BTree) {
    let bm = tree.manager().lock();
    println!(
        "{}: {} of {} slots in use",
        tree.name(),
        bm.page_count(),
        bm.pool_size()
    );
    for (slot, page) in bm.resident_pages() {
        println!(
            "  {slot} {} keys={:?} values={:?}",
            page.row(),
            page.keys(),
            page.values()
        );
    }
}
