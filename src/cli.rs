use crate::{AUTHOR, VERSION};

use clap::{App, Arg};
use failure::Error;
use url::Url;

/// Where pages are assumed to be served from when no `--base` is given.
pub const DEFAULT_BASE: &str = "http://localhost/";

/// Create the base set of clap options common to all cli commands
pub fn base_opts<'a, 'b>() -> App<'a, 'b> {
    App::new("booknav")
        .version(VERSION)
        .author(AUTHOR)
        .arg(
            Arg::with_name("config")
                .long("config")
                .takes_value(true)
                .help("Path to configuration file"),
        )
}

/// Options for commands that act on a single page of the site.
pub fn page_opts<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("page")
            .long("page")
            .takes_value(true)
            .required(true)
            .help("Path of the page, relative to the root of the site"),
    )
    .arg(
        Arg::with_name("base")
            .long("base")
            .takes_value(true)
            .help("Url the site is served from"),
    )
}

/// The absolute location of `page` on a site served from `base`.
///
/// ```
/// # use booknav::cli::page_location;
/// let url = page_location("https://docs.example/book", "guide/index.html").unwrap();
/// assert_eq!(url.as_str(), "https://docs.example/book/guide/index.html");
/// ```
pub fn page_location(base: &str, page: &str) -> Result<Url, Error> {
    let mut base = Url::parse(base).map_err(|e| format_err!("Invalid base url {:?}: {}", base, e))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(page.trim_start_matches('/'))?)
}

/// Setup logging for booknav. This sets the log level to INFO if unset and configures the logging
/// facade favoured by booknav's clis.
pub fn init_logging() {
    if ::std::env::var_os("RUST_LOG").is_none() {
        ::std::env::set_var("RUST_LOG", "INFO");
    }
    pretty_env_logger::init();
}

/// Run a given closure with logging configured, and deal with any errors. This allows you to have
/// a fairly simple main, eg:
///
/// ```
/// use booknav::cli::run;
///
/// fn main() {
///     run(|| {
///         // Do stuff here, including using the ? operator with reckless abandon.
///         // ...
///         // You must however return Ok(())
///         Ok(())
///     });
/// }
/// ```
pub fn run(main: fn() -> Result<(), ::failure::Error>) {
    init_logging();
    if let Err(e) = main() {
        error!("Error running booknav");
        for cause in e.iter_chain() {
            error!("{}", cause);
        }
        if ::std::env::var("RUST_BACKTRACE").is_ok() {
            error!("{:?}", e.backtrace());
        }
        ::std::process::exit(1);
    }
}
