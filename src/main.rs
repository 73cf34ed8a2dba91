use clap::Parser;
use ipcalc::cli::{output_format, parse_error_code, run, Cli};
use ipcalc::config::Config;
use ipcalc::output::{paint, OutputFormat, Style};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::io::IsTerminal;
use std::process::ExitCode;

/// Use the YAML log config when present (and not verbose), else log to stderr.
fn init_logging(config: &Config, verbose: bool) -> Result<(), Box<dyn Error>> {
    if let Some(path) = config.log_config_file(verbose) {
        log4rs::init_file(path, Default::default())?;
        return Ok(());
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {l} {t} - {m}{n}")))
        .build();
    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(log_config)?;
    Ok(())
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print()?;
            return Ok(ExitCode::from(parse_error_code(&e)));
        }
    };
    let config = Config::from_env();
    init_logging(&config, cli.verbose)?;
    log::debug!("#Start main() {config:?}");

    let format = output_format(&cli, &config, std::io::stdout().is_terminal());
    colored::control::set_override(format.use_color);

    match run(&cli, &config, &format) {
        Ok(text) => {
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            log::warn!("failed: {e}");
            let stderr_format = OutputFormat {
                use_html: false,
                ..format
            };
            eprintln!("{}", paint(&format!("Error: {e}"), Style::Error, &stderr_format));
            Ok(ExitCode::from(1))
        }
    }
}
