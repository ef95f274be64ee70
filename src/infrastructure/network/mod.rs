use async_trait::async_trait;

use crate::application::services::network::NetworkMonitor;

/// Hosts without a connectivity signal treat the network as always available;
/// transport failures then surface through the normal retry path.
pub struct AlwaysOnline;

#[async_trait]
impl NetworkMonitor for AlwaysOnline {
    async fn is_online(&self) -> bool {
        true
    }
}
