mod frontend;

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .expect("failed to build logger instance");

    let channels = voxcard_bridge::BridgeChannels::default();
    voxcard_backend::run(channels.backend_rx, channels.backend_tx);
    frontend::run(channels.frontend_rx, channels.frontend_tx).expect("failed to run frontend");
}
