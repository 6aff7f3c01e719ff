use qrmenu_error::{QMError, QMResult};
use qrmenu_models::constants::LOG_DIR;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{subscriber::set_global_default, Level};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    filter::DynFilterFn,
    fmt::{self},
    layer::SubscriberExt,
    Layer, Registry,
};

pub struct Logger {
    level: Arc<Mutex<Level>>,
    _file_guard: Option<WorkerGuard>,
}

/// A poisoned lock still holds a valid level.
fn lock(level: &Mutex<Level>) -> MutexGuard<'_, Level> {
    level.lock().unwrap_or_else(|e| e.into_inner())
}

impl Logger {
    pub fn new(level: Option<Level>) -> Self {
        Logger {
            level: Arc::new(Mutex::new(level.unwrap_or(Level::INFO))),
            _file_guard: None,
        }
    }

    /// Changes the level of both outputs at runtime.
    #[inline]
    pub fn set_level(&self, new_level: Level) {
        *lock(&self.level) = new_level;
    }

    #[inline]
    pub fn get_level(&self) -> Level {
        *lock(&self.level)
    }

    /// Installs the global subscriber: console plus a daily rolling
    /// `logs/qrmenu.log`, both filtered by the shared level.
    pub fn initialize(&mut self) -> QMResult<()> {
        let file_appender = rolling::daily(LOG_DIR, "qrmenu.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        self._file_guard = Some(guard);

        let console_filter = {
            let level = Arc::clone(&self.level);
            DynFilterFn::new(move |metadata, _| metadata.level() <= &*lock(&level))
        };

        let file_filter = {
            let level = Arc::clone(&self.level);
            DynFilterFn::new(move |metadata, _| metadata.level() <= &*lock(&level))
        };

        let console_layer = {
            #[cfg(debug_assertions)]
            let layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stdout)
                .with_file(true)
                .with_line_number(true);

            #[cfg(not(debug_assertions))]
            let layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_file(false)
                .with_line_number(false);

            layer.with_filter(console_filter)
        };

        let file_layer = {
            #[cfg(debug_assertions)]
            let layer = fmt::layer()
                .pretty()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true);

            #[cfg(not(debug_assertions))]
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(false)
                .with_line_number(false);

            layer.with_filter(file_filter)
        };

        let subscriber = Registry::default().with(console_layer).with(file_layer);
        set_global_default(subscriber).map_err(|_| QMError::from("Failed to set logger"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_can_be_changed() {
        let logger = Logger::new(None);
        assert_eq!(logger.get_level(), Level::INFO);
        logger.set_level(Level::WARN);
        assert_eq!(logger.get_level(), Level::WARN);
    }
}
