use crate::instance::PubSubInstance;
use crate::provisioner::pubsub;
use config::PubSubConfig;
use initiator::DockerContainer;
use tokio::sync::OnceCell;

static PUBSUB: OnceCell<Option<PubSubInstance<DockerContainer>>> = OnceCell::const_new();

/// Shared emulator, started once per test process on first use.
///
/// Configuration comes from the optional `PUBSUB_FIXTURE_CONFIG_FILE`, then
/// the `PUBSUB_FIXTURE_*` variables, on top of the defaults. Returns `None`
/// when the container cannot be started (usually because Docker is
/// unavailable), so callers can skip instead of failing.
pub async fn shared_pubsub() -> Option<&'static PubSubInstance<DockerContainer>> {
    PUBSUB
        .get_or_init(|| async {
            let config = match config::load_layered(PubSubConfig::default()) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Invalid Pub/Sub fixture configuration: {}", e);
                    return None;
                }
            };

            match pubsub(config).await {
                Ok(instance) => {
                    tracing::info!(
                        "Pub/Sub fixture started at {} for project {}",
                        instance.host(),
                        instance.project()
                    );
                    Some(instance)
                }
                Err(e) => {
                    tracing::warn!("Failed to start Pub/Sub emulator container: {:?}", e);
                    None
                }
            }
        })
        .await
        .as_ref()
}
