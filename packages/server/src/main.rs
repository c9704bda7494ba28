#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::env;

use user_admin_env_utils::default_env_usize;
use user_admin_server::ServerConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _layer = user_admin_logging::init(Some("user_admin_server.log"))?;

    let args: Vec<String> = env::args().collect();
    let config = ServerConfig::from_env(args.get(1).map(String::as_str))?;

    let threads = default_env_usize("MAX_THREADS", 64).unwrap_or(64);
    log::debug!("Running with {threads} max blocking threads");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .max_blocking_threads(threads)
        .build()?;

    actix_web::rt::System::with_tokio_rt(|| runtime).block_on(async move {
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await?;
            log::debug!("Received ctrl-c");
            Ok::<_, std::io::Error>(())
        });

        user_admin_server::run(config).await
    })?;

    Ok(())
}
