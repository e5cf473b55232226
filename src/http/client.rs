use std::time::Duration;

use reqwest::Client;

use crate::args::{DEFAULT_USER_AGENT, TesterArgs};
use crate::error::AppResult;

/// Idle connections are dropped after this long without a job.
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Builds the shared client. The per-request timeout is applied on each call,
/// so only the connect phase is bounded here.
///
/// # Errors
///
/// Returns an error when the TLS backend or connection pool cannot be
/// initialised.
pub fn build_client(args: &TesterArgs) -> AppResult<Client> {
    let client = Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .connect_timeout(args.timeout)
        .pool_max_idle_per_host(args.connections.get())
        .pool_idle_timeout(Some(POOL_IDLE_TIMEOUT))
        .build()?;
    Ok(client)
}
