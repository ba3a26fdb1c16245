//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mount_gateway::admin::{self, AdminState};
use mount_gateway::config::{GatewayConfig, MountConfig};
use mount_gateway::{HttpServer, Shutdown};

/// A gateway (and optionally its admin API) running on ephemeral ports.
pub struct TestGateway {
    pub addr: SocketAddr,
    #[allow(dead_code)]
    pub admin_addr: Option<SocketAddr>,
    pub shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn config_with_mounts(mounts: &[(&str, &str)]) -> GatewayConfig {
    GatewayConfig {
        mounts: mounts
            .iter()
            .map(|(what, where_)| MountConfig::new(*what, *where_))
            .collect(),
        ..Default::default()
    }
}

/// Start the gateway on 127.0.0.1:0, plus the admin API when enabled.
pub async fn start_gateway(config: GatewayConfig) -> TestGateway {
    let shutdown = Shutdown::new();
    let admin_enabled = config.admin.enabled;
    let api_key = config.admin.api_key.clone();

    let server = HttpServer::from_config(config).expect("valid mounts");
    let resolver = server.resolver().clone();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    let admin_addr = if admin_enabled {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let admin_addr = listener.local_addr().unwrap();
        let state = AdminState {
            resolver,
            api_key: Arc::from(api_key.as_str()),
        };
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = admin::serve(listener, state, rx).await;
        });
        Some(admin_addr)
    } else {
        None
    };

    tokio::time::sleep(Duration::from_millis(50)).await;

    TestGateway {
        addr,
        admin_addr,
        shutdown,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
