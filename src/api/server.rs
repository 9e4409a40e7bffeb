// HTTP server wrapping the catalog endpoints

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;

use crate::api::{handlers::AppState, routes};
use crate::config::StorefrontConfig;

pub struct ApiServer {
    pub host: String,
    pub port: u16,
    config: StorefrontConfig,
}

impl ApiServer {
    /// Create a server listening where the configuration says
    pub fn new(config: StorefrontConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            config,
        }
    }

    /// Override the listen address
    pub fn bind_to(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Start the HTTP server and run until shutdown
    pub async fn run(self) -> std::io::Result<()> {
        let bind_addr = self.bind_addr();
        info!("Starting storefront API on {}", bind_addr);

        let state = web::Data::new(AppState::new(self.config));

        HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(Logger::default())
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)?
        .run()
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_overrides() {
        let server = ApiServer::new(StorefrontConfig::default());
        assert_eq!(server.bind_addr(), "127.0.0.1:3000");

        let server = server.bind_to(Some("0.0.0.0".to_string()), None);
        assert_eq!(server.bind_addr(), "0.0.0.0:3000");

        let server = server.bind_to(None, Some(8080));
        assert_eq!(server.bind_addr(), "0.0.0.0:8080");
    }
}
