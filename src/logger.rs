use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "AMMO_TESTER_LOG";

const RUST_LOG_ENV: &str = "RUST_LOG";

/// Installs the global stderr subscriber. A second call only reports that a
/// subscriber already exists.
pub fn init_logging(verbose: bool) {
    let directive = filter_directive(
        std::env::var(LOG_ENV).ok(),
        std::env::var(RUST_LOG_ENV).ok(),
        verbose,
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!("Ignoring log filter '{}': {}", directive, err);
        EnvFilter::new(default_level(false))
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Logging already initialized: {}", err);
    }
}

fn filter_directive(app_log: Option<String>, rust_log: Option<String>, verbose: bool) -> String {
    app_log
        .into_iter()
        .chain(rust_log)
        .map(|value| value.trim().to_owned())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| default_level(verbose).to_owned())
}

const fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_variable_wins_over_rust_log() -> Result<(), String> {
        let directive = filter_directive(
            Some("ammo_tester=trace".to_owned()),
            Some("warn".to_owned()),
            false,
        );
        if directive != "ammo_tester=trace" {
            return Err(format!("Unexpected directive: {}", directive));
        }
        Ok(())
    }

    #[test]
    fn blank_variables_fall_through() -> Result<(), String> {
        let directive = filter_directive(Some("  ".to_owned()), Some("warn".to_owned()), true);
        if directive != "warn" {
            return Err(format!("Expected RUST_LOG, got {}", directive));
        }
        let directive = filter_directive(Some(String::new()), None, true);
        if directive != "debug" {
            return Err(format!("Expected verbose default, got {}", directive));
        }
        Ok(())
    }

    #[test]
    fn quiet_default_is_info() -> Result<(), String> {
        let directive = filter_directive(None, None, false);
        if directive != "info" {
            return Err(format!("Unexpected directive: {}", directive));
        }
        if EnvFilter::try_new(&directive).is_err() {
            return Err("Default directive must parse".to_owned());
        }
        Ok(())
    }

    #[test]
    fn repeated_init_does_not_panic() {
        init_logging(false);
        init_logging(true);
    }
}
