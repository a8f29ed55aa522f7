//! AWS connector integration tests against in-process SES and SNS fakes.
//!
//! The fakes keep provider-side state (applications, endpoints, topics,
//! subscriptions) so the check-then-create flows can be observed across calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ara_messaging_service::config::AwsApplicationSettings;
use ara_messaging_service::connectors::aws::{
    BulkEmailRequest, PlatformApplication, PlatformEndpoint, ProviderResponse, ProviderResult,
    PublishRequest, SesApi, SesEmailConnector, SimpleEmail, SnsApi, SnsPushNotificationConnector,
    Subscription, Topic,
};
use ara_messaging_service::error::MessagingError;
use ara_messaging_service::logging::Logger;
use ara_messaging_service::models::{
    EmailConnector, EmailRecipient, EmailTemplate, EmailTemplateConnector,
    PushNotificationConnector, PushTopicConnector,
};

const ARN_PREFIX: &str = "arn:aws:sns:eu-central-1:000000000000";

#[derive(Default)]
struct SnsState {
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

#[derive(Default)]
struct InMemorySns {
    state: Mutex<SnsState>,
}

#[async_trait]
impl SnsApi for InMemorySns {
    async fn list_platform_applications(&self) -> ProviderResult<Vec<PlatformApplication>> {
        let state = self.state.lock().await;
        let applications = state
            .applications
            .iter()
            .map(|arn| PlatformApplication { arn: arn.clone() })
            .collect();
        Ok(ProviderResponse::ok(applications))
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
        Ok(ProviderResponse::ok(endpoints))
    }

    async fn create_platform_endpoint(
        &self,
        application_arn: &str,
        token: &str,
    ) -> ProviderResult<Option<String>> {
        let mut state = self.state.lock().await;
        state.endpoint_creates += 1;
        let arn = format!("{}:endpoint/{}", ARN_PREFIX, state.endpoint_creates);
        state
            .endpoints
            .entry(application_arn.to_string())
            .or_default()
            .push(PlatformEndpoint {
                arn: arn.clone(),
                attributes: HashMap::from([("Token".to_string(), token.to_string())]),
            });
        Ok(ProviderResponse::ok(Some(arn)))
    }

    async fn list_topics(&self) -> ProviderResult<Vec<Topic>> {
        let state = self.state.lock().await;
        let topics = state
            .topics
            .iter()
            .map(|arn| Topic { arn: arn.clone() })
            .collect();
        Ok(ProviderResponse::ok(topics))
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
        Ok(ProviderResponse::ok(subscriptions))
    }

    async fn subscribe(
        &self,
        topic_arn: &str,
        protocol: &str,
        endpoint: &str,
    ) -> ProviderResult<Option<String>> {
        let mut state = self.state.lock().await;
        state.subscribe_calls += 1;
        let arn = format!("{}:subscription/{}", topic_arn, state.subscribe_calls);
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
        Ok(ProviderResponse::ok(Some("message-id".to_string())))
    }
}

fn mobile_app() -> AwsApplicationSettings {
    AwsApplicationSettings {
        application_id: "mobile-app".to_string(),
        platform_type: "GCM".to_string(),
        platform_credentials: "server-key".to_string(),
    }
}

fn push_connector(sns: Arc<InMemorySns>) -> SnsPushNotificationConnector {
    SnsPushNotificationConnector::new(sns, vec![mobile_app()], Logger::disabled())
}

// =============================================================================
// Push notifications
// =============================================================================

mod push_tests {
    use super::*;

    #[tokio::test]
    async fn test_same_token_registered_twice_reuses_endpoint() {
        let sns = Arc::new(InMemorySns::default());
        let started = push_connector(sns.clone()).start().await.unwrap();

        let first = started
            .register_device("mobile-app", "device-token")
            .await
            .unwrap();
        let second = started
            .register_device("mobile-app", "device-token")
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(sns.state.lock().await.endpoint_creates, 1);
    }

    #[tokio::test]
    async fn test_restart_reuses_platform_application() {
        let sns = Arc::new(InMemorySns::default());

        let first = push_connector(sns.clone()).start().await.unwrap();
        let second = push_connector(sns.clone()).start().await.unwrap();

        assert_eq!(
            first.application_address("mobile-app"),
            second.application_address("mobile-app")
        );
        assert_eq!(sns.state.lock().await.application_creates, 1);
    }

    #[tokio::test]
    async fn test_unknown_application_id() {
        let sns = Arc::new(InMemorySns::default());
        let started = push_connector(sns.clone()).start().await.unwrap();

        let err = started
            .register_device("other-app", "device-token")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MessagingError::ApplicationNotFound { ref application_id } if application_id == "other-app"
        ));
        assert_eq!(sns.state.lock().await.endpoint_creates, 0);
    }

    #[tokio::test]
    async fn test_push_payload_is_json_structured() {
        let sns = Arc::new(InMemorySns::default());
        let started = push_connector(sns.clone()).start().await.unwrap();
        let device = started
            .register_device("mobile-app", "device-token")
            .await
            .unwrap();

        started
            .send_single_push_notification(&device, "Hello", "World")
            .await
            .unwrap();

        let state = sns.state.lock().await;
        let request = &state.published[0];
        assert_eq!(request.target_arn.as_deref(), Some(device.as_str()));
        assert_eq!(request.message_structure.as_deref(), Some("json"));

        let body: serde_json::Value = serde_json::from_str(&request.message).unwrap();
        assert_eq!(body["default"], "World");
        let gcm: serde_json::Value =
            serde_json::from_str(body["GCM"].as_str().unwrap()).unwrap();
        assert_eq!(gcm["notification"]["title"], "Hello");
        assert_eq!(gcm["notification"]["body"], "World");
    }

    #[tokio::test]
    async fn test_topic_flow_is_idempotent() {
        let sns = Arc::new(InMemorySns::default());
        let started = push_connector(sns.clone()).start().await.unwrap();
        let device = started
            .register_device("mobile-app", "device-token")
            .await
            .unwrap();

        let topic = started.create_topic("news").await.unwrap();
        assert_eq!(started.create_topic("news").await.unwrap(), topic);

        assert!(started.subscribe_to_topic(&topic, &device).await.unwrap());
        assert!(started.subscribe_to_topic(&topic, &device).await.unwrap());

        assert!(started
            .publish_to_topic(&topic, "Breaking", "Something happened")
            .await
            .unwrap());

        let state = sns.state.lock().await;
        assert_eq!(state.topic_creates, 1);
        assert_eq!(state.subscribe_calls, 1);
        assert_eq!(state.published[0].topic_arn.as_deref(), Some(topic.as_str()));
    }
}

// =============================================================================
// Email
// =============================================================================

#[derive(Default)]
struct RecordingSes {
    emails: Mutex<Vec<SimpleEmail>>,
    templates: Mutex<Vec<String>>,
    bulk: Mutex<Vec<BulkEmailRequest>>,
}

#[async_trait]
impl SesApi for RecordingSes {
    async fn send_email(&self, email: SimpleEmail) -> ProviderResult<Option<String>> {
        self.emails.lock().await.push(email);
        Ok(ProviderResponse::ok(Some("message-id".to_string())))
    }

    async fn create_email_template(
        &self,
        name: &str,
        _subject: &str,
        _html: &str,
    ) -> ProviderResult<()> {
        self.templates.lock().await.push(name.to_string());
        Ok(ProviderResponse::ok(()))
    }

    async fn delete_email_template(&self, name: &str) -> ProviderResult<()> {
        let mut templates = self.templates.lock().await;
        let before = templates.len();
        templates.retain(|existing| existing != name);
        let status = if templates.len() < before { 200 } else { 404 };
        Ok(ProviderResponse::with_status(status, ()))
    }

    async fn send_bulk_email(&self, request: BulkEmailRequest) -> ProviderResult<()> {
        self.bulk.lock().await.push(request);
        Ok(ProviderResponse::ok(()))
    }
}

mod email_tests {
    use super::*;

    #[tokio::test]
    async fn test_custom_email_single_send_for_all_recipients() {
        let ses = Arc::new(RecordingSes::default());
        let connector = SesEmailConnector::new(ses.clone(), Logger::disabled());

        let recipients = vec!["a@example.com".to_string(), "b@example.com".to_string()];
        connector
            .send_custom_email("noreply@example.com", &recipients, "Hi", "<p>Hello</p>")
            .await
            .unwrap();

        let emails = ses.emails.lock().await;
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].to, recipients);
    }

    #[tokio::test]
    async fn test_template_lifecycle_and_bulk_send() {
        let ses = Arc::new(RecordingSes::default());
        let connector = SesEmailConnector::new(ses.clone(), Logger::disabled());

        let template = EmailTemplate::new("newsletter", "News", "en", "<p>Hi {{name}}</p>");
        connector.create_template(&template).await.unwrap();

        let recipients = vec![EmailRecipient::new("alice@example.com").with("name", "Alice")];
        connector
            .send_massive_email("noreply@example.com", "newsletter", &recipients)
            .await
            .unwrap();

        assert!(connector.delete_template("newsletter").await.unwrap());

        // Already gone: the provider answers 404
        let err = connector.delete_template("newsletter").await.unwrap_err();
        assert_eq!(err.operation_key(), Some("deleteTemplateFailed"));

        let bulk = ses.bulk.lock().await;
        assert_eq!(bulk[0].entries[0].to, "alice@example.com");
    }
}
