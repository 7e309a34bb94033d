//! `job-broker` server: loads configuration from the environment and serves
//! the broker over HTTP until ctrl-c.

use std::sync::Arc;

use anyhow::anyhow;
use job_broker::builders::build_broker;
use job_broker::config::BrokerConfig;
use job_broker::core::AppResult;
use job_broker::runtime::http;
use job_broker::util::init_tracing;

fn main() -> AppResult<()> {
    init_tracing();

    let cfg = BrokerConfig::from_env().map_err(|e| anyhow!(e))?;
    let broker = Arc::new(build_broker(&cfg)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(cfg.worker_threads)
        .enable_all()
        .build()?;
    runtime.block_on(http::serve(broker, &cfg.bind_addr))
}
