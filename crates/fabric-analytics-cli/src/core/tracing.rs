use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::Layer;

use crate::core::context::configuration::VerbosityConfiguration;

/// Human readable logs on stderr, stdout only carries the response
pub struct Fmt;

impl Fmt {
    pub fn layer<S>(verbosity: &VerbosityConfiguration) -> impl Layer<S>
    where
        S: for<'span> tracing_subscriber::registry::LookupSpan<'span> + tracing::Subscriber,
    {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .compact()
            .with_filter(verbosity.filter())
    }
}

impl VerbosityConfiguration {
    pub fn filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_level_filter() {
        assert_eq!(VerbosityConfiguration::Info.filter(), LevelFilter::INFO);
        assert_eq!(VerbosityConfiguration::Debug.filter(), LevelFilter::DEBUG);
        assert_eq!(VerbosityConfiguration::Error.filter(), LevelFilter::ERROR);
    }
}
