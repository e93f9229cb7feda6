/// The current application version of Reelcap.
pub const VERSION: &str = "0.1.0";

pub mod core;

#[cfg(feature = "testing")]
pub mod testing {
    use log::LevelFilter;
    use log4rs::append::console::ConsoleAppender;
    use log4rs::config::{Appender, Logger, Root};
    use log4rs::encode::pattern::PatternEncoder;
    use log4rs::Config;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initializes the logger with the specified log level.
    #[macro_export]
    macro_rules! init_logger {
        ($level:expr) => {
            reelcap_core::testing::init_logger_level($level)
        };
        () => {
            reelcap_core::testing::init_logger_level(log::LevelFilter::Trace)
        };
    }

    /// Initializes the logger with the specified log level.
    pub fn init_logger_level(level: LevelFilter) {
        INIT.call_once(|| {
            log4rs::init_config(
                Config::builder()
                    .appender(Appender::builder().build(
                        "stdout",
                        Box::new(
                            ConsoleAppender::builder()
                                .encoder(Box::new(PatternEncoder::new("\x1B[37m{d(%Y-%m-%d %H:%M:%S%.3f)}\x1B[0m {h({l:>5.5})} \x1B[35m{I:>6.6}\x1B[0m \x1B[37m---\x1B[0m \x1B[36m{t:<35.35}\x1B[0m \x1B[37m:\x1B[0m {m}{n}")))
                                .build(),
                        ),
                    ))
                    .logger(Logger::builder().build("fontdb", LevelFilter::Info))
                    .build(Root::builder().appender("stdout").build(level))
                    .unwrap(),
            )
            .unwrap();
        })
    }
}
