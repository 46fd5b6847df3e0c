use clap::{App, Arg};
use failure::format_err;

use booknav::cli;
use booknav::config;
use booknav::paths;
use booknav::scrollbox::MemoryScrollbox;
use booknav::storage::{MemoryStorage, ScrollMemory};
use booknav::{Attachment, SidebarNavigator};

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    cli::page_opts(
        cli::base_opts().about("Shows which entry is active for a page, and how the sidebar would scroll"),
    )
    .arg(
        Arg::with_name("stored-scroll")
            .long("stored-scroll")
            .takes_value(true)
            .help("Pretend this offset was recorded by a sidebar click on the previous page"),
    )
}

fn main() {
    booknav::cli::run(|| {
        let matches = cli_opts().get_matches();

        let cfg = config::Config::from_file(matches.value_of("config").unwrap_or("booknav.toml"))?;
        let page = matches.value_of("page").expect("Couldn't get page");
        let location = cli::page_location(matches.value_of("base").unwrap_or(cli::DEFAULT_BASE), page)?;

        let settings = cfg.settings(paths::path_to_root(page));
        let mut storage = MemoryStorage::new();
        if let Some(offset) = matches.value_of("stored-scroll") {
            let offset = offset
                .parse()
                .map_err(|e| format_err!("Invalid --stored-scroll {:?}: {}", offset, e))?;
            ScrollMemory::new(&settings.storage_key).record(&mut storage, offset);
        }

        let mut navigator = SidebarNavigator::new(cfg.load_tree()?, settings);
        let mut container = MemoryScrollbox::new();
        let attachment = navigator.attach(&location, Some(&mut container), &mut storage)?;

        println!("page:     {}", &location);
        println!("root:     {:?}", navigator.settings().root_path);
        match navigator.active().and_then(|id| navigator.tree().get(id)) {
            Some(entry) => {
                println!("active:   {} {:?}", entry.id, entry.label);
                for ancestor in navigator.tree().ancestors(entry.id) {
                    if let Some(parent) = navigator.tree().get(ancestor) {
                        println!("  within: {} {:?}", parent.id, parent.label);
                    }
                }
            }
            None => println!("active:   none"),
        }
        match attachment {
            Attachment::Restored(offset) => println!("scroll:   restore to {}", offset),
            Attachment::Centered(id) => println!("scroll:   center entry {}", id),
            Attachment::Unscrolled | Attachment::Detached => println!("scroll:   none"),
        }

        Ok(())
    })
}
