use std::sync::Arc;

use greenayu_core::feature::fertilizer::Fertilizer;
use greenayu_core::feature::identify::IdentifyHealth;
use greenayu_core::feature::parts::PartsQuality;
use greenayu_core::feature::shelf_life::ShelfLife;
use greenayu_core::feature::yield_forecast::YieldForecast;
use greenayu_core::{FeatureAdapter, Transport};

use super::http::HttpTransport;
use crate::types::Result;
use crate::utils::toml_config::BackendConfig;

/// The five feature adapters over one shared transport.
///
/// Each adapter keeps its own state, so a pending shelf-life prediction does
/// not block an identification.
pub struct Workbench {
    pub identify: FeatureAdapter<IdentifyHealth>,
    pub fertilizer: FeatureAdapter<Fertilizer>,
    pub yield_forecast: FeatureAdapter<YieldForecast>,
    pub shelf_life: FeatureAdapter<ShelfLife>,
    pub parts: FeatureAdapter<PartsQuality>,
}

impl Workbench {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            identify: FeatureAdapter::new(transport.clone()),
            fertilizer: FeatureAdapter::new(transport.clone()),
            yield_forecast: FeatureAdapter::new(transport.clone()),
            shelf_life: FeatureAdapter::new(transport.clone()),
            parts: FeatureAdapter::new(transport),
        }
    }

    /// Workbench talking HTTP to `config.base_url`.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::from_config(config)?)))
    }

    /// Returns every adapter to idle. Pending requests keep their adapter
    /// busy until they settle, and their outcomes are dropped.
    pub fn reset_all(&self) {
        self.identify.reset();
        self.fertilizer.reset();
        self.yield_forecast.reset();
        self.shelf_life.reset();
        self.parts.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenayu_core::feature::fertilizer::FertilizerInput;
    use greenayu_core::{AdapterState, FeatureKind};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn adapters_keep_separate_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/fertilizer"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"recommended_fertilizer": "DAP"})),
            )
            .mount(&server)
            .await;

        let config = BackendConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        };
        let bench = Workbench::from_config(&config).unwrap();

        let result = bench.fertilizer.submit(&FertilizerInput::default()).await.unwrap();

        assert_eq!(result.recommended_fertilizer, "DAP");
        assert_eq!(bench.fertilizer.kind(), FeatureKind::Fertilizer);
        assert!(matches!(bench.fertilizer.state(), AdapterState::Success(_)));
        assert!(matches!(bench.shelf_life.state(), AdapterState::Idle));

        bench.reset_all();
        assert!(matches!(bench.fertilizer.state(), AdapterState::Idle));
    }
}
