use devserve::config::{AppState, Config};
use devserve::handler::Dispatcher;
use devserve::{logger, server};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg);

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let dispatcher = Dispatcher::from_current_exe()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&listener.local_addr()?, dispatcher.base_dir(), &cfg);

    let shutdown = Arc::new(server::ShutdownSignal::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown))?;

    let state = Arc::new(AppState::new(cfg, dispatcher));

    // LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local.run_until(server::run(listener, state, shutdown)).await;
    Ok(())
}
