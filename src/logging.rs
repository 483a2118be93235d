use std::fmt::Display;

use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter, Metadata};

pub fn init_logger() {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let time = chrono::Local::now().format("%H:%M:%S").to_string();

            out.finish(format_args!(
                "{} {} {:^9} {}",
                badge(record.level()),
                time.bright_black(),
                Target::from_str(record.target()),
                message
            ))
        })
        .filter(is_enabled)
        .chain(std::io::stdout())
        .apply()
        .expect("logging is initialized")
}

/// Spotiskill crates log from info up, everything else only warnings and errors
fn is_enabled(meta: &Metadata) -> bool {
    meta.level() <= Target::from_str(meta.target()).max_level()
}

#[derive(Debug, PartialEq)]
enum Target {
    External(String),
    App,
    Server,
    Catalog,
    Core,
}

impl Target {
    fn from_str(str: &str) -> Self {
        let module = str.split("::").next().unwrap_or_default();

        match module {
            "spotiskill" => Self::App,
            "spotiskill_core" => Self::Core,
            "spotiskill_catalog" => Self::Catalog,
            "spotiskill_server" => Self::Server,
            other => Target::External(other.to_string()),
        }
    }

    fn max_level(&self) -> LevelFilter {
        match self {
            Self::External(_) => LevelFilter::Warn,
            _ => LevelFilter::Info,
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = match self {
            Target::External(x) => x.as_str().clear(),
            Target::App => "APP".bright_white(),
            Target::Server => "SERVER".bright_green(),
            Target::Catalog => "CATALOG".bright_purple(),
            Target::Core => "CORE".blue(),
        };

        Display::fmt(&result, f)
    }
}

fn badge(level: Level) -> ColoredString {
    let label = match level {
        Level::Error => " ERR ",
        Level::Warn => " WRN ",
        Level::Info => " INF ",
        Level::Debug => " DBG ",
        Level::Trace => " TRC ",
    };

    match level {
        Level::Error => label.black().on_red().bold(),
        Level::Warn => label.black().on_yellow().bold(),
        Level::Info => label.black().on_blue().bold(),
        Level::Debug => label.white().on_black(),
        Level::Trace => label.normal(),
    }
}
