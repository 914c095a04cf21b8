use num_traits::PrimInt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    None,
    Some,
    Very,
}

impl<X> From<X> for Verbosity
where
    X: PrimInt,
{
    fn from(value: X) -> Self {
        if value < X::one() {
            Verbosity::None
        } else if value < X::one() + X::one() {
            Verbosity::Some
        } else {
            Verbosity::Very
        }
    }
}

impl Verbosity {
    fn directive(self) -> &'static str {
        match self {
            Verbosity::None => "warn",
            Verbosity::Some => "info",
            Verbosity::Very => "debug",
        }
    }

    /// Installs the global log subscriber, writing to stderr. `RUST_LOG`,
    /// when set, takes precedence over the verbosity level.
    pub fn init_logging(self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.directive()));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(self == Verbosity::Very)
            .init();
    }
}
