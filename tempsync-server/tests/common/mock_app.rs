use std::sync::Arc;

use axum::Router;
use serde_json::Value;
use tokio::sync::broadcast;

use tempsync_server::app::create_app;
use tempsync_server::configs::{Storage, TempStick};
use tempsync_server::errors::{DEFAULT_ISSUE_TRACKER, ErrorReporter};
use tempsync_server::services::{AccessoryService, DiscoveryService};
use tempsync_server::tests::MockSensorSource;

pub struct MockApp {
    pub accessory_service: Arc<AccessoryService>,
    pub discovery: Arc<DiscoveryService>,
    pub source: Arc<MockSensorSource>,
    pub router: Router,
}

impl MockApp {
    pub async fn new(devices: Vec<Value>) -> Self {
        let (sender, _receiver) = broadcast::channel(100);
        let accessory_service = Arc::new(
            AccessoryService::restore(Storage::in_memory(), sender, ErrorReporter::default())
                .await
                .unwrap(),
        );

        let source = Arc::new(MockSensorSource::new(devices));
        let discovery = Arc::new(DiscoveryService::new(
            source.clone(),
            accessory_service.clone(),
            &test_settings("http://localhost/api/v1/"),
        ));

        let router = create_app(accessory_service.clone());

        Self {
            accessory_service,
            discovery,
            source,
            router,
        }
    }

    pub async fn discovered(self) -> Self {
        self.discovery.run_discovery().await.unwrap();
        self
    }
}

pub fn test_settings(api_url: &str) -> TempStick {
    TempStick {
        api_url: api_url.into(),
        api_key: "test-key".into(),
        delay: 0,
        request_timeout: None,
        rediscover_interval: None,
        issue_tracker: DEFAULT_ISSUE_TRACKER.into(),
    }
}
