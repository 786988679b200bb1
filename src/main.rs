use scholaradmin::setup::{self, Config};
use tokio::net::TcpListener;
use tracing::{error, Level};

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    let config = Config::from_env();
    setup::initialise_logging(
        config
            .as_ref()
            .map(|config| config.log_level)
            .unwrap_or(Level::INFO),
    );
    setup::report_environmental_variables(dotenv);
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            panic!();
        }
    };

    let app = setup::create_app(&config);
    let listener = match TcpListener::bind(config.socket_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Error binding to {}: {e}", config.socket_addr());
            panic!();
        }
    };
    setup::report_listener_socket_addr(&listener);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        panic!();
    }
}
