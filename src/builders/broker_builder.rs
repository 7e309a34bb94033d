//! Build a broker from configuration.

use anyhow::{anyhow, Context};

use crate::config::BrokerConfig;
use crate::core::{AppResult, Broker};

/// Build a broker from `cfg`, creating every declared queue.
///
/// # Errors
///
/// Fails if the configuration does not validate.
pub fn build_broker(cfg: &BrokerConfig) -> AppResult<Broker> {
    cfg.validate().map_err(|e| anyhow!("config invalid: {e}"))?;

    let broker = Broker::with_defaults(cfg.job_defaults());
    for name in &cfg.queues {
        broker
            .create_queue(name)
            .with_context(|| format!("creating declared queue `{name}`"))?;
    }

    tracing::info!(queues = cfg.queues.len(), "broker built");
    Ok(broker)
}
