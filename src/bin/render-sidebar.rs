#[macro_use]
extern crate log;

use clap::App;

use booknav::cli;
use booknav::config;
use booknav::paths;
use booknav::SidebarNavigator;

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    cli::page_opts(cli::base_opts().about("Renders the sidebar for a single page of the site"))
}

fn main() {
    booknav::cli::run(|| {
        let matches = cli_opts().get_matches();

        let cfg = config::Config::from_file(matches.value_of("config").unwrap_or("booknav.toml"))?;
        let page = matches.value_of("page").expect("Couldn't get page");
        let location = cli::page_location(matches.value_of("base").unwrap_or(cli::DEFAULT_BASE), page)?;

        let tree = cfg.load_tree()?;
        let mut navigator = SidebarNavigator::new(tree, cfg.settings(paths::path_to_root(page)));
        navigator.resolve(&location);

        info!("Rendering sidebar for {}", &location);
        println!("{}", navigator.render()?);

        Ok(())
    })
}
