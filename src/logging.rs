use std::path::Path;

pub fn setup_logger(log_level: log::LevelFilter, log_dir: &Path) -> Result<(), fern::InitError> {
    if log_level == log::LevelFilter::Error || log_level == log::LevelFilter::Off {
        println!("\x1B[{}mWARNING: Important messages will be hidden. Please consider setting log_level to \"info\" or \"warn\" in the config file.\x1B[0m",
            fern::colors::Color::Yellow.to_fg_str(),
        );
    }

    if log_level == log::LevelFilter::Off {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)?;

    // Colors for the different log levels
    let colors = fern::colors::ColoredLevelConfig::new()
        .error(fern::colors::Color::Red)
        .warn(fern::colors::Color::Yellow)
        .info(fern::colors::Color::White)
        .debug(fern::colors::Color::Blue)
        .trace(fern::colors::Color::Magenta);

    let fmt_str = |message: &std::fmt::Arguments, record: &log::Record| -> String {
        format!(
            "[{}][{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            message
        )
    };

    // Log to file (without colors)
    let file = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!("{}", fmt_str(message, record)))
        })
        .chain(fern::log_file(log_dir.join(format!(
            "{}.log",
            chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
        )))?);

    // Log to stdout (with colors)
    let color = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}{}\x1B[0m",
                format_args!("\x1B[{}m", colors.get_color(&record.level()).to_fg_str()),
                fmt_str(message, record)
            ))
        })
        .chain(std::io::stdout());

    fern::Dispatch::new()
        .chain(file)
        .chain(color)
        .level(log_level)
        .apply()?;
    Ok(())
}
