use tokio::sync::watch;

/// Browser-style connectivity signal: a synchronous "am I online" query for
/// the submit path plus a watch channel for online/offline transitions (the
/// network-status banner's data source).
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NetworkService: Send + Sync + 'static {
    fn is_online(&self) -> bool;

    fn watch(&self) -> watch::Receiver<bool>;
}

#[cfg(feature = "mock")]
impl MockNetworkService {
    pub fn with_is_online(mut self, online: bool) -> Self {
        self.expect_is_online().once().return_const(online);
        self
    }
}
