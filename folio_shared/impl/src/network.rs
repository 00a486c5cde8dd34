use std::{sync::Arc, time::Duration};

use folio_shared_contracts::network::NetworkService;
use folio_utils::diag::diag;
use tokio::{net::TcpStream, sync::watch};

/// Connectivity state backed by a watch channel. The process starts out
/// online; [`run_probe`](NetworkWatchServiceImpl::run_probe) keeps the state
/// current by periodically opening a TCP connection to a well-known target.
#[derive(Debug, Clone)]
pub struct NetworkWatchServiceImpl {
    tx: Arc<watch::Sender<bool>>,
}

#[derive(Debug, Clone)]
pub struct NetworkProbeConfig {
    /// `host:port` to connect to, e.g. the delivery API's host.
    pub target: Arc<str>,
    pub interval: Duration,
    pub connect_timeout: Duration,
}

impl Default for NetworkWatchServiceImpl {
    fn default() -> Self {
        Self {
            tx: Arc::new(watch::channel(true).0),
        }
    }
}

impl NetworkWatchServiceImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_online(&self, online: bool) {
        let was_online = self.tx.send_replace(online);
        if was_online && !online {
            diag().warn("Network connection lost", "NetworkMonitor");
        } else if !was_online && online {
            diag().info("Network connection restored", "NetworkMonitor");
        }
    }

    /// Probes the target on a fixed interval until the task is dropped.
    pub async fn run_probe(self, config: NetworkProbeConfig) {
        loop {
            self.set_online(Self::probe(&config.target, config.connect_timeout).await);
            tokio::time::sleep(config.interval).await;
        }
    }

    async fn probe(target: &str, connect_timeout: Duration) -> bool {
        tokio::time::timeout(connect_timeout, TcpStream::connect(target))
            .await
            .is_ok_and(|connection| connection.is_ok())
    }
}

impl NetworkService for NetworkWatchServiceImpl {
    fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    fn watch(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
