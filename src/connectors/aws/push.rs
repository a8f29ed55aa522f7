//! Push notifications over SNS mobile endpoints and topics.
//!
//! Every provider-side resource is resolved with check-then-create: the
//! existing resources of that kind are listed and matched first, and the
//! create call is only issued when nothing matches. Listings are read as a
//! single page. Two concurrent calls for the same resource can both miss and
//! both create; the provider keeps whichever arrives last.
//!
//! Device registration by application id needs the id to ARN map built by
//! [`SnsPushNotificationConnector::start`], so only the returned
//! [`StartedSnsPushConnector`] implements [`PushNotificationConnector`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::connectors::operation_failed;
use crate::error::{BoxError, ErrorData, Guards, MessagingError, MessagingResult};
use crate::logging::Logger;
use crate::metrics::{MessagingMetrics, ResourceOutcome};
use crate::models::{PushNotificationConnector, PushTopicConnector};

use super::client::{AwsSnsApi, PublishRequest, SnsApi};
use super::config::{AwsApplicationSettings, AwsConnectorConfig};

const COMPONENT: &str = "SnsPushNotificationConnector";

/// Subscription protocol for mobile endpoints
const APPLICATION_PROTOCOL: &str = "application";

/// Endpoint attribute holding the device token
const TOKEN_ATTRIBUTE: &str = "Token";

/// Map of configured application id to platform application ARN
pub type ApplicationAddresses = HashMap<String, String>;

/// Build the SNS `json` message body: a plain default plus a GCM notification
pub fn push_message_payload(title: &str, message: &str) -> Result<String, serde_json::Error> {
    let gcm = serde_json::to_string(&json!({
        "notification": {
            "title": title,
            "body": message,
        }
    }))?;
    serde_json::to_string(&json!({
        "default": message,
        "GCM": gcm,
    }))
}

#[derive(Clone)]
pub struct SnsPushNotificationConnector {
    api: Arc<dyn SnsApi>,
    applications: Vec<AwsApplicationSettings>,
    logger: Logger,
}

impl SnsPushNotificationConnector {
    pub fn new(
        api: Arc<dyn SnsApi>,
        applications: Vec<AwsApplicationSettings>,
        logger: Logger,
    ) -> Self {
        Self {
            api,
            applications,
            logger,
        }
    }

    /// Validate the configuration and build an SNS client from it
    pub async fn connect(config: &AwsConnectorConfig, logger: Logger) -> MessagingResult<Self> {
        config.validate(COMPONENT)?;
        let api = AwsSnsApi::from_config(config).await;
        tracing::info!(
            region = %config.region,
            applications = config.applications.len(),
            "SNS push notification connector created"
        );
        Ok(Self::new(Arc::new(api), config.applications.clone(), logger))
    }

    /// Resolve or create every configured application.
    ///
    /// Fails on the first application that cannot be resolved.
    pub async fn start(&self) -> MessagingResult<StartedSnsPushConnector> {
        let mut applications = ApplicationAddresses::with_capacity(self.applications.len());

        for settings in &self.applications {
            let resolved = self
                .create_platform_application(
                    &settings.application_id,
                    &settings.platform_type,
                    &settings.platform_credentials,
                )
                .await;

            match resolved {
                Ok(arn) => {
                    tracing::info!(
                        application_id = %settings.application_id,
                        application_arn = %arn,
                        "Push application resolved"
                    );
                    applications.insert(settings.application_id.clone(), arn);
                }
                Err(err) => {
                    return Err(self
                        .failed(
                            "push",
                            "applicationRegistrationFailed",
                            ErrorData::new().with("value", settings.application_id.as_str()),
                            err,
                        )
                        .await)
                }
            }
        }

        Ok(StartedSnsPushConnector {
            connector: self.clone(),
            applications,
        })
    }

    /// Register a device token with a platform application ARN
    pub async fn register_device(
        &self,
        application_address: &str,
        device_token: &str,
    ) -> MessagingResult<String> {
        Guards::string_value(COMPONENT, "application_address", application_address)?;
        Guards::string_value(COMPONENT, "device_token", device_token)?;

        self.logger.info(COMPONENT, "deviceRegistering").await;

        let data = || {
            ErrorData::new()
                .with("property", "applicationAddress")
                .with("value", application_address)
        };

        let existing = match self
            .check_device_token(application_address, device_token)
            .await
        {
            Ok(existing) => existing,
            Err(err) => {
                return Err(self
                    .failed("push", "deviceTokenRegisterFailed", data(), err)
                    .await)
            }
        };
        if let Some(endpoint_arn) = existing {
            MessagingMetrics::record_resource("endpoint", ResourceOutcome::Reused);
            return Ok(endpoint_arn);
        }

        match self
            .api
            .create_platform_endpoint(application_address, device_token)
            .await
            .and_then(|response| {
                response.into_identifier("CreatePlatformEndpoint", "EndpointArn")
            }) {
            Ok(endpoint_arn) => {
                MessagingMetrics::record_resource("endpoint", ResourceOutcome::Created);
                Ok(endpoint_arn)
            }
            Err(err) => Err(self
                .failed("push", "deviceTokenRegisterFailed", data(), err)
                .await),
        }
    }

    /// Publish a notification to a single device endpoint
    pub async fn send_single_push_notification(
        &self,
        device_address: &str,
        title: &str,
        message: &str,
    ) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "device_address", device_address)?;
        Guards::string_value(COMPONENT, "title", title)?;
        Guards::string_value(COMPONENT, "message", message)?;

        self.logger.info(COMPONENT, "pushNotificationSending").await;

        let result = self
            .publish_notification(
                PublishRequest {
                    target_arn: Some(device_address.to_string()),
                    ..Default::default()
                },
                title,
                message,
            )
            .await;

        match result {
            Ok(()) => {
                MessagingMetrics::record_sent("push");
                Ok(true)
            }
            Err(err) => Err(self
                .failed(
                    "push",
                    "sendPushNotificationFailed",
                    ErrorData::new().with("value", device_address),
                    err,
                )
                .await),
        }
    }

    async fn publish_notification(
        &self,
        mut request: PublishRequest,
        title: &str,
        message: &str,
    ) -> Result<(), BoxError> {
        request.message = push_message_payload(title, message)?;
        request.message_structure = Some("json".to_string());

        self.api
            .publish(request)
            .await?
            .into_output("Publish")?;
        Ok(())
    }

    async fn check_platform_application(&self, app_name: &str) -> MessagingResult<Option<String>> {
        self.logger.info(COMPONENT, "platformAppChecking").await;

        let applications = self
            .api
            .list_platform_applications()
            .await
            .and_then(|response| response.into_output("ListPlatformApplications"))
            .map_err(|err| check_failed("platformAppCheckFailed", app_name, err))?;

        Ok(applications
            .into_iter()
            .find(|app| app.arn.contains(app_name))
            .map(|app| app.arn))
    }

    async fn check_device_token(
        &self,
        application_address: &str,
        device_token: &str,
    ) -> MessagingResult<Option<String>> {
        self.logger.info(COMPONENT, "deviceTokenChecking").await;

        let endpoints = self
            .api
            .list_endpoints_by_platform_application(application_address)
            .await
            .and_then(|response| response.into_output("ListEndpointsByPlatformApplication"))
            .map_err(|err| check_failed("deviceTokenCheckFailed", device_token, err))?;

        Ok(endpoints
            .into_iter()
            .find(|endpoint| {
                endpoint.attributes.get(TOKEN_ATTRIBUTE).map(String::as_str) == Some(device_token)
            })
            .map(|endpoint| endpoint.arn))
    }

    async fn check_topic(&self, topic_name: &str) -> MessagingResult<Option<String>> {
        self.logger.info(COMPONENT, "topicChecking").await;

        let topics = self
            .api
            .list_topics()
            .await
            .and_then(|response| response.into_output("ListTopics"))
            .map_err(|err| check_failed("topicCheckFailed", topic_name, err))?;

        let suffix = format!(":{}", topic_name);
        Ok(topics
            .into_iter()
            .find(|topic| topic.arn.ends_with(&suffix))
            .map(|topic| topic.arn))
    }

    async fn check_subscription(
        &self,
        topic_address: &str,
        device_address: &str,
    ) -> MessagingResult<Option<String>> {
        self.logger.info(COMPONENT, "subscriptionChecking").await;

        let subscriptions = self
            .api
            .list_subscriptions_by_topic(topic_address)
            .await
            .and_then(|response| response.into_output("ListSubscriptionsByTopic"))
            .map_err(|err| {
                MessagingError::operation_with_cause(
                    COMPONENT,
                    "subscriptionCheckFailed",
                    ErrorData::new()
                        .with("topic", topic_address)
                        .with("device", device_address),
                    err,
                )
            })?;

        Ok(subscriptions
            .into_iter()
            .find(|subscription| {
                subscription.protocol.as_deref() == Some(APPLICATION_PROTOCOL)
                    && subscription.endpoint.as_deref() == Some(device_address)
            })
            .map(|subscription| subscription.arn.unwrap_or_default()))
    }

    async fn failed(
        &self,
        channel: &str,
        key: &'static str,
        data: ErrorData,
        cause: impl Into<BoxError>,
    ) -> MessagingError {
        operation_failed(&self.logger, COMPONENT, channel, key, data, cause).await
    }
}

fn check_failed(key: &'static str, value: &str, cause: impl Into<BoxError>) -> MessagingError {
    MessagingError::operation_with_cause(COMPONENT, key, ErrorData::new().with("value", value), cause)
}

#[async_trait]
impl PushTopicConnector for SnsPushNotificationConnector {
    async fn create_platform_application(
        &self,
        app_name: &str,
        platform_type: &str,
        platform_credentials: &str,
    ) -> MessagingResult<String> {
        Guards::string_value(COMPONENT, "app_name", app_name)?;
        Guards::string_value(COMPONENT, "platform_type", platform_type)?;
        Guards::string_value(COMPONENT, "platform_credentials", platform_credentials)?;

        let data = || ErrorData::new().with("value", app_name);

        let existing = match self.check_platform_application(app_name).await {
            Ok(existing) => existing,
            Err(err) => {
                return Err(self
                    .failed("push", "platformAppCreationFailed", data(), err)
                    .await)
            }
        };
        if let Some(application_arn) = existing {
            MessagingMetrics::record_resource("application", ResourceOutcome::Reused);
            return Ok(application_arn);
        }

        self.logger.info(COMPONENT, "platformAppCreating").await;

        match self
            .api
            .create_platform_application(app_name, platform_type, platform_credentials)
            .await
            .and_then(|response| {
                response.into_identifier("CreatePlatformApplication", "PlatformApplicationArn")
            }) {
            Ok(application_arn) => {
                MessagingMetrics::record_resource("application", ResourceOutcome::Created);
                Ok(application_arn)
            }
            Err(err) => Err(self
                .failed("push", "platformAppCreationFailed", data(), err)
                .await),
        }
    }

    async fn create_topic(&self, topic_name: &str) -> MessagingResult<String> {
        Guards::string_value(COMPONENT, "topic_name", topic_name)?;

        self.logger.info(COMPONENT, "topicCreating").await;

        let data = || ErrorData::new().with("value", topic_name);

        let existing = match self.check_topic(topic_name).await {
            Ok(existing) => existing,
            Err(err) => return Err(self.failed("topic", "createTopicFailed", data(), err).await),
        };
        if let Some(topic_arn) = existing {
            MessagingMetrics::record_resource("topic", ResourceOutcome::Reused);
            return Ok(topic_arn);
        }

        match self
            .api
            .create_topic(topic_name)
            .await
            .and_then(|response| response.into_identifier("CreateTopic", "TopicArn"))
        {
            Ok(topic_arn) => {
                MessagingMetrics::record_resource("topic", ResourceOutcome::Created);
                Ok(topic_arn)
            }
            Err(err) => Err(self.failed("topic", "createTopicFailed", data(), err).await),
        }
    }

    async fn subscribe_to_topic(
        &self,
        topic_address: &str,
        device_address: &str,
    ) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "topic_address", topic_address)?;
        Guards::string_value(COMPONENT, "device_address", device_address)?;

        self.logger.info(COMPONENT, "topicSubscribing").await;

        let data = || {
            ErrorData::new()
                .with("topic", topic_address)
                .with("device", device_address)
        };

        match self.check_subscription(topic_address, device_address).await {
            Ok(Some(_)) => {
                MessagingMetrics::record_resource("subscription", ResourceOutcome::Reused);
                return Ok(true);
            }
            Ok(None) => {}
            Err(err) => {
                return Err(self
                    .failed("topic", "subscribeToTopicFailed", data(), err)
                    .await)
            }
        }

        match self
            .api
            .subscribe(topic_address, APPLICATION_PROTOCOL, device_address)
            .await
            .and_then(|response| response.into_identifier("Subscribe", "SubscriptionArn"))
        {
            Ok(_) => {
                MessagingMetrics::record_resource("subscription", ResourceOutcome::Created);
                Ok(true)
            }
            Err(err) => Err(self
                .failed("topic", "subscribeToTopicFailed", data(), err)
                .await),
        }
    }

    async fn publish_to_topic(
        &self,
        topic_address: &str,
        title: &str,
        message: &str,
    ) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "topic_address", topic_address)?;
        Guards::string_value(COMPONENT, "title", title)?;
        Guards::string_value(COMPONENT, "message", message)?;

        self.logger.info(COMPONENT, "topicPublishing").await;

        let result = self
            .publish_notification(
                PublishRequest {
                    topic_arn: Some(topic_address.to_string()),
                    ..Default::default()
                },
                title,
                message,
            )
            .await;

        match result {
            Ok(()) => {
                MessagingMetrics::record_sent("topic");
                Ok(true)
            }
            Err(err) => Err(self
                .failed(
                    "topic",
                    "sendTopicPushNotificationFailed",
                    ErrorData::new().with("topic", topic_address),
                    err,
                )
                .await),
        }
    }
}

/// A push connector whose configured applications have been resolved
#[derive(Clone)]
pub struct StartedSnsPushConnector {
    connector: SnsPushNotificationConnector,
    applications: ApplicationAddresses,
}

impl StartedSnsPushConnector {
    /// ARN of a configured application
    pub fn application_address(&self, application_id: &str) -> Option<&str> {
        self.applications.get(application_id).map(String::as_str)
    }

    pub fn applications(&self) -> &ApplicationAddresses {
        &self.applications
    }

    pub fn connector(&self) -> &SnsPushNotificationConnector {
        &self.connector
    }
}

#[async_trait]
impl PushNotificationConnector for StartedSnsPushConnector {
    async fn register_device(
        &self,
        application_id: &str,
        device_token: &str,
    ) -> MessagingResult<String> {
        Guards::string_value(COMPONENT, "application_id", application_id)?;
        Guards::string_value(COMPONENT, "device_token", device_token)?;

        let application_address = self.application_address(application_id).ok_or_else(|| {
            MessagingError::ApplicationNotFound {
                application_id: application_id.to_string(),
            }
        })?;

        self.connector
            .register_device(application_address, device_token)
            .await
    }

    async fn send_single_push_notification(
        &self,
        device_address: &str,
        title: &str,
        message: &str,
    ) -> MessagingResult<bool> {
        self.connector
            .send_single_push_notification(device_address, title, message)
            .await
    }
}

#[async_trait]
impl PushTopicConnector for StartedSnsPushConnector {
    async fn create_platform_application(
        &self,
        app_name: &str,
        platform_type: &str,
        platform_credentials: &str,
    ) -> MessagingResult<String> {
        self.connector
            .create_platform_application(app_name, platform_type, platform_credentials)
            .await
    }

    async fn create_topic(&self, topic_name: &str) -> MessagingResult<String> {
        self.connector.create_topic(topic_name).await
    }

    async fn subscribe_to_topic(
        &self,
        topic_address: &str,
        device_address: &str,
    ) -> MessagingResult<bool> {
        self.connector
            .subscribe_to_topic(topic_address, device_address)
            .await
    }

    async fn publish_to_topic(
        &self,
        topic_address: &str,
        title: &str,
        message: &str,
    ) -> MessagingResult<bool> {
        self.connector
            .publish_to_topic(topic_address, title, message)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::aws::{
        PlatformApplication, PlatformEndpoint, ProviderError, ProviderResponse, ProviderResult,
        Subscription, Topic,
    };
    use crate::logging::MemoryLoggingConnector;
    use pretty_assertions::assert_eq;
    use tokio::sync::Mutex;

    const ARN_PREFIX: &str = "arn:aws:sns:eu-central-1:000000000000";

    #[derive(Default)]
    struct FakeState {
        applications: Vec<String>,
        endpoints: HashMap<String, Vec<PlatformEndpoint>>,
        topics: Vec<String>,
        subscriptions: HashMap<String, Vec<Subscription>>,
        published: Vec<PublishRequest>,
        application_creates: usize,
        endpoint_creates: usize,
        topic_creates: usize,
        subscribe_calls: usize,
    }

    /// Stateful SNS stand-in with switchable failures
    #[derive(Default)]
    struct FakeSns {
        state: Mutex<FakeState>,
        fail_listing: bool,
        publish_status: Option<u16>,
    }

    impl FakeSns {
        fn failing_listings() -> Self {
            Self {
                fail_listing: true,
                ..Default::default()
            }
        }

        fn listing<T>(&self, operation: &'static str, items: T) -> ProviderResult<T> {
            if self.fail_listing {
                return Err(ProviderError::Sdk {
                    operation,
                    message: "throttled".to_string(),
                });
            }
            Ok(ProviderResponse::ok(items))
        }
    }

    #[async_trait]
    impl SnsApi for FakeSns {
        async fn list_platform_applications(&self) -> ProviderResult<Vec<PlatformApplication>> {
            let state = self.state.lock().await;
            let applications = state
                .applications
                .iter()
                .map(|arn| PlatformApplication { arn: arn.clone() })
                .collect();
            self.listing("ListPlatformApplications", applications)
        }

        async fn create_platform_application(
            &self,
            name: &str,
            platform: &str,
            _platform_credentials: &str,
        ) -> ProviderResult<Option<String>> {
            let mut state = self.state.lock().await;
            state.application_creates += 1;
            let arn = format!("{}:app/{}/{}", ARN_PREFIX, platform, name);
            state.applications.push(arn.clone());
            Ok(ProviderResponse::ok(Some(arn)))
        }

        async fn list_endpoints_by_platform_application(
            &self,
            application_arn: &str,
        ) -> ProviderResult<Vec<PlatformEndpoint>> {
            let state = self.state.lock().await;
            let endpoints = state
                .endpoints
                .get(application_arn)
                .cloned()
                .unwrap_or_default();
            self.listing("ListEndpointsByPlatformApplication", endpoints)
        }

        async fn create_platform_endpoint(
            &self,
            application_arn: &str,
            token: &str,
        ) -> ProviderResult<Option<String>> {
            let mut state = self.state.lock().await;
            state.endpoint_creates += 1;
            let arn = format!("{}/endpoint-{}", application_arn, state.endpoint_creates);
            let endpoint = PlatformEndpoint {
                arn: arn.clone(),
                attributes: HashMap::from([(TOKEN_ATTRIBUTE.to_string(), token.to_string())]),
            };
            state
                .endpoints
                .entry(application_arn.to_string())
                .or_default()
                .push(endpoint);
            Ok(ProviderResponse::ok(Some(arn)))
        }

        async fn list_topics(&self) -> ProviderResult<Vec<Topic>> {
            let state = self.state.lock().await;
            let topics = state
                .topics
                .iter()
                .map(|arn| Topic { arn: arn.clone() })
                .collect();
            self.listing("ListTopics", topics)
        }

        async fn create_topic(&self, name: &str) -> ProviderResult<Option<String>> {
            let mut state = self.state.lock().await;
            state.topic_creates += 1;
            let arn = format!("{}:{}", ARN_PREFIX, name);
            state.topics.push(arn.clone());
            Ok(ProviderResponse::ok(Some(arn)))
        }

        async fn list_subscriptions_by_topic(
            &self,
            topic_arn: &str,
        ) -> ProviderResult<Vec<Subscription>> {
            let state = self.state.lock().await;
            let subscriptions = state
                .subscriptions
                .get(topic_arn)
                .cloned()
                .unwrap_or_default();
            self.listing("ListSubscriptionsByTopic", subscriptions)
        }

        async fn subscribe(
            &self,
            topic_arn: &str,
            protocol: &str,
            endpoint: &str,
        ) -> ProviderResult<Option<String>> {
            let mut state = self.state.lock().await;
            state.subscribe_calls += 1;
            let arn = format!("{}:sub-{}", topic_arn, state.subscribe_calls);
            state
                .subscriptions
                .entry(topic_arn.to_string())
                .or_default()
                .push(Subscription {
                    arn: Some(arn.clone()),
                    protocol: Some(protocol.to_string()),
                    endpoint: Some(endpoint.to_string()),
                });
            Ok(ProviderResponse::ok(Some(arn)))
        }

        async fn publish(&self, request: PublishRequest) -> ProviderResult<Option<String>> {
            self.state.lock().await.published.push(request);
            Ok(ProviderResponse::with_status(
                self.publish_status.unwrap_or(200),
                Some("message-id".to_string()),
            ))
        }
    }

    fn application(id: &str) -> AwsApplicationSettings {
        AwsApplicationSettings {
            application_id: id.to_string(),
            platform_type: "GCM".to_string(),
            platform_credentials: "server-key".to_string(),
        }
    }

    fn connector(api: Arc<FakeSns>) -> SnsPushNotificationConnector {
        SnsPushNotificationConnector::new(api, vec![application("mobile-app")], Logger::disabled())
    }

    #[tokio::test]
    async fn test_create_platform_application_is_idempotent() {
        let api = Arc::new(FakeSns::default());
        let connector = connector(api.clone());

        let first = connector
            .create_platform_application("mobile-app", "GCM", "server-key")
            .await
            .unwrap();
        let second = connector
            .create_platform_application("mobile-app", "GCM", "server-key")
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(api.state.lock().await.application_creates, 1);
    }

    #[tokio::test]
    async fn test_register_device_reuses_endpoint_for_same_token() {
        let api = Arc::new(FakeSns::default());
        let connector = connector(api.clone());
        let app = connector
            .create_platform_application("mobile-app", "GCM", "server-key")
            .await
            .unwrap();

        let first = connector.register_device(&app, "token-1").await.unwrap();
        let second = connector.register_device(&app, "token-1").await.unwrap();
        let other = connector.register_device(&app, "token-2").await.unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(api.state.lock().await.endpoint_creates, 2);
    }

    #[tokio::test]
    async fn test_create_topic_matches_name_suffix() {
        let api = Arc::new(FakeSns::default());
        api.state
            .lock()
            .await
            .topics
            .push(format!("{}:breaking-news", ARN_PREFIX));
        let connector = connector(api.clone());

        // "breaking-news" ends with "news" but not with ":news"
        let news = connector.create_topic("news").await.unwrap();
        assert_eq!(news, format!("{}:news", ARN_PREFIX));

        let again = connector.create_topic("news").await.unwrap();
        assert_eq!(again, news);
        assert_eq!(api.state.lock().await.topic_creates, 1);
    }

    #[tokio::test]
    async fn test_subscribe_to_topic_is_idempotent() {
        let api = Arc::new(FakeSns::default());
        let connector = connector(api.clone());
        let topic = connector.create_topic("news").await.unwrap();

        assert!(connector.subscribe_to_topic(&topic, "arn:device").await.unwrap());
        assert!(connector.subscribe_to_topic(&topic, "arn:device").await.unwrap());
        assert_eq!(api.state.lock().await.subscribe_calls, 1);
    }

    #[tokio::test]
    async fn test_listing_failure_is_hard_error() {
        let api = Arc::new(FakeSns::failing_listings());
        let connector = connector(api.clone());

        let err = connector.create_topic("news").await.unwrap_err();
        assert_eq!(err.operation_key(), Some("createTopicFailed"));
        assert_eq!(err.operation_data().and_then(|d| d.get("value")), Some("news"));
        assert_eq!(api.state.lock().await.topic_creates, 0);

        let err = connector
            .subscribe_to_topic("arn:topic", "arn:device")
            .await
            .unwrap_err();
        assert_eq!(err.operation_key(), Some("subscribeToTopicFailed"));
        let data = err.operation_data().unwrap();
        assert_eq!(data.get("topic"), Some("arn:topic"));
        assert_eq!(data.get("device"), Some("arn:device"));
    }

    #[tokio::test]
    async fn test_check_error_is_wrapped_in_creation_error() {
        let api = Arc::new(FakeSns::failing_listings());
        let connector = connector(api);

        let err = connector
            .create_platform_application("mobile-app", "GCM", "server-key")
            .await
            .unwrap_err();
        assert_eq!(err.operation_key(), Some("platformAppCreationFailed"));

        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("platformAppCheckFailed"));
    }

    #[tokio::test]
    async fn test_push_notification_payload() {
        let api = Arc::new(FakeSns::default());
        let connector = connector(api.clone());

        assert!(connector
            .send_single_push_notification("arn:device", "Hello", "World")
            .await
            .unwrap());

        let state = api.state.lock().await;
        let request = &state.published[0];
        assert_eq!(request.target_arn.as_deref(), Some("arn:device"));
        assert_eq!(request.message_structure.as_deref(), Some("json"));

        let body: serde_json::Value = serde_json::from_str(&request.message).unwrap();
        assert_eq!(body["default"], "World");
        let gcm: serde_json::Value =
            serde_json::from_str(body["GCM"].as_str().unwrap()).unwrap();
        assert_eq!(gcm["notification"]["title"], "Hello");
        assert_eq!(gcm["notification"]["body"], "World");
    }

    #[tokio::test]
    async fn test_publish_to_topic_rejected_status() {
        let api = Arc::new(FakeSns {
            publish_status: Some(503),
            ..Default::default()
        });
        let memory = Arc::new(MemoryLoggingConnector::new());
        let connector = SnsPushNotificationConnector::new(
            api.clone(),
            vec![],
            Logger::new(memory.clone()),
        );

        let err = connector
            .publish_to_topic("arn:topic", "Hello", "World")
            .await
            .unwrap_err();
        assert_eq!(err.operation_key(), Some("sendTopicPushNotificationFailed"));
        assert_eq!(err.operation_data().and_then(|d| d.get("topic")), Some("arn:topic"));
        assert_eq!(
            memory.messages().await,
            vec!["topicPublishing", "sendTopicPushNotificationFailed"]
        );
        assert_eq!(
            api.state.lock().await.published[0].topic_arn.as_deref(),
            Some("arn:topic")
        );
    }

    #[tokio::test]
    async fn test_start_resolves_configured_applications() {
        let api = Arc::new(FakeSns::default());
        let connector = connector(api.clone());

        let started = connector.start().await.unwrap();
        let app = started.application_address("mobile-app").unwrap().to_string();
        assert!(app.contains("mobile-app"));

        let first = started.register_device("mobile-app", "token-1").await.unwrap();
        let second = started.register_device("mobile-app", "token-1").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(api.state.lock().await.endpoint_creates, 1);
    }

    #[tokio::test]
    async fn test_register_unknown_application_id_fails() {
        let api = Arc::new(FakeSns::default());
        let started = connector(api.clone()).start().await.unwrap();

        let err = started
            .register_device("unknown-app", "token-1")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MessagingError::ApplicationNotFound { ref application_id } if application_id == "unknown-app"
        ));
        assert_eq!(api.state.lock().await.endpoint_creates, 0);
    }

    #[tokio::test]
    async fn test_start_failure_names_application() {
        let api = Arc::new(FakeSns::failing_listings());
        let err = connector(api).start().await.err().unwrap();

        assert_eq!(err.operation_key(), Some("applicationRegistrationFailed"));
        assert_eq!(
            err.operation_data().and_then(|d| d.get("value")),
            Some("mobile-app")
        );
    }
}
