use clap::{App, Arg};

use booknav::cli;
use booknav::config;
use booknav::tree::{EntryKind, NavigationTree};

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    cli::base_opts()
        .about("Loads and validates a navigation tree")
        .arg(Arg::with_name("TREE")
             .help("Tree file to check, defaults to the one named by the config")
             .index(1))
}

fn main() {
    booknav::cli::run(|| {
        let matches = cli_opts().get_matches();

        let tree = match matches.value_of("TREE") {
            Some(path) => NavigationTree::from_file(path)?,
            None => {
                let cfg = config::Config::from_file(matches.value_of("config").unwrap_or("booknav.toml"))?;
                cfg.load_tree()?
            }
        };

        let count = |kind| tree.iter().filter(|e| e.kind == kind).count();
        let drafts = tree.iter().filter(|e| e.is_draft()).count();
        let depth = tree.iter().map(|e| e.depth + 1).max().unwrap_or(0);

        println!("{} entries, {} levels deep", tree.len(), depth);
        println!("  {} chapters ({} drafts)", count(EntryKind::chapter), drafts);
        println!("  {} part titles", count(EntryKind::part));
        println!("  {} separators", count(EntryKind::separator));

        Ok(())
    })
}
