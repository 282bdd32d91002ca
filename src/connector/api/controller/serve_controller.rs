use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::connector::http;

use super::super::Container;

pub struct ServeController<'a> {
    container: &'a Container,
}

impl<'a> ServeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn serve(&self, bind: String, port: u16) -> Result<String> {
        let addr = format!("{bind}:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        info!(
            "Provider deadline {:?}{}",
            self.container.provider_timeout(),
            if self.container.mock_provider() {
                " (mock provider)"
            } else {
                ""
            }
        );

        let shutdown = CancellationToken::new();
        tokio::spawn(cancel_on_signal(shutdown.clone()));

        http::serve(listener, self.container.app_state(), shutdown).await?;

        Ok("Server stopped.".to_string())
    }
}

async fn cancel_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
    token.cancel();
}
