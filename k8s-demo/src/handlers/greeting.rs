use axum::Json;
use chrono::{SecondsFormat, Utc};
use common::GreetingResponse;

pub const MESSAGE: &str = "hello world from k8s-demo";
pub const SERVICE_NAME: &str = "k8s-demo-hello-world";

/// Greeting endpoint, ignores the request entirely
pub async fn greeting_handler() -> Json<GreetingResponse> {
    tracing::info!("local hit");

    Json(GreetingResponse {
        message: MESSAGE.to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use std::time::Duration;

    #[tokio::test]
    async fn test_greeting_handler() {
        let response = greeting_handler().await;
        let value = response.0;

        assert_eq!(value.message, "hello world from k8s-demo");
        assert_eq!(value.service, "k8s-demo-hello-world");
        assert!(value.timestamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&value.timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_greeting_timestamp_advances() {
        let first = greeting_handler().await.0.timestamp;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = greeting_handler().await.0.timestamp;

        let first = DateTime::parse_from_rfc3339(&first).unwrap();
        let second = DateTime::parse_from_rfc3339(&second).unwrap();
        assert!(second > first);
    }
}
