use anyhow::Context;
use marche::domain::config::ApiConfig;
use marche::kernel::config::load_config;
use marche_logger::Logger;
use marche_server::Server;

#[marche_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg: ApiConfig = load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build().await?.run().await
}
