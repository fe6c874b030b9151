//! Tailsocket TUI entry point.

use clap::Parser;
use tailsocket_app::{App, ConnectionManager, Runtime};
use tailsocket_client::WsConnector;
use tailsocket_tui::{Args, TerminalDriver, logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logging::init(&args.log_level, &args.log_file)?;
    let config = args.session_config()?;

    tracing::info!(host_port = %config.host_port, secure = config.secure, "tailsocket starting");

    let (mut connector, transport_events) = WsConnector::new()?;
    let driver = TerminalDriver::new(transport_events)?;

    let manager =
        ConnectionManager::open_with_buffer(config.into_session(), &mut connector, args.log_buffer());
    let app = App::new(manager);

    Ok(Runtime::new(driver, app).run().await?)
}
