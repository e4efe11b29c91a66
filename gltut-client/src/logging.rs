//! Logger setup.

use log::LevelFilter;

/// Installs a `fern` logger writing timestamped lines to stdout.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    dispatch(level).chain(std::io::stdout()).apply()
}

/// The formatting and level filters, without an output.
///
/// `glow` and `sdl2` are capped at `warn` so `debug` output stays readable.
pub fn dispatch(level: LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("glow", level.min(LevelFilter::Warn))
        .level_for("sdl2", level.min(LevelFilter::Warn))
}
