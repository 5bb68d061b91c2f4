use log::{debug, info, LevelFilter};
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config as LogConfig, Root},
    encode::pattern::PatternEncoder,
};

use crate::{
    error::{Error, Result},
    Config,
};

/// Pattern used by the built-in console logger.
const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

/// Set up global logging.
///
/// If the configured log4rs file exists it is used as-is; otherwise a console
/// logger writing to stderr at the configured level is installed, keeping stdout
/// free for results.
pub fn init(config: &Config) -> Result<()> {
    let path = config.log_config();
    if path.exists() {
        log4rs::init_file(path, Default::default()).map_err(|e| Error::Logging(e.to_string()))?;
        info!("Initialised logging from {}", path.display());
    } else {
        log4rs::init_config(console_config(config.log_level())?)
            .map_err(|e| Error::Logging(e.to_string()))?;
        debug!("Initialised console logging");
    }
    Ok(())
}

/// Build a log4rs config with a single stderr appender.
fn console_config(level: LevelFilter) -> Result<LogConfig> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| Error::Logging(e.to_string()))
}
