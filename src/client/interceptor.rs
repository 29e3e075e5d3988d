//! Client-side request interception.
//!
//! `ClientInterceptor` is a dispatcher that client code sends requests
//! through. While installed it rewrites request URLs with the first matching
//! rule, steering calls away from proxy routes toward local mock endpoints.
//! Uninstalled, it passes requests straight to the wrapped transport.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::client::transport::{ClientResponse, OutboundRequest, Transport, TransportError};

/// Proxy routes and the mock endpoints that stand in for them, in priority order.
pub const DEFAULT_REDIRECTS: [(&str, &str); 8] = [
    ("/api/proxy/generate-activities", "/api/generate-activities"),
    ("/api/proxy/activities", "/api/activities"),
    ("/api/proxy/lesson-plans", "/api/lesson-plans"),
    ("/api/proxy/rubrics", "/api/rubrics"),
    ("/api/proxy/generate-lesson", "/api/generate-lesson"),
    ("/api/proxy/health", "/api/health"),
    ("/api/proxy/check-db", "/api/direct-test"),
    ("/api/proxy/test-openai-key", "/api/health"),
];

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;
type Rewrite = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A pure predicate/rewrite pair over URLs.
#[derive(Clone)]
pub struct InterceptionRule {
    label: String,
    predicate: Predicate,
    rewrite: Rewrite,
}

impl fmt::Debug for InterceptionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptionRule").field("label", &self.label).finish()
    }
}

impl InterceptionRule {
    pub fn new<P, R>(label: impl Into<String>, predicate: P, rewrite: R) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
        R: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
            rewrite: Arc::new(rewrite),
        }
    }

    /// Matches URLs containing `pattern`; replaces its first occurrence.
    pub fn redirect(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let replacement = replacement.into();
        let label = format!("{} -> {}", pattern, replacement);
        let needle = pattern.clone();
        Self::new(
            label,
            move |url| url.contains(needle.as_str()),
            move |url| url.replacen(pattern.as_str(), &replacement, 1),
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, url: &str) -> bool {
        (self.predicate)(url)
    }

    pub fn rewrite(&self, url: &str) -> String {
        (self.rewrite)(url)
    }
}

/// The stock redirect table.
pub fn default_rules() -> Vec<InterceptionRule> {
    DEFAULT_REDIRECTS
        .iter()
        .map(|(pattern, replacement)| InterceptionRule::redirect(*pattern, *replacement))
        .collect()
}

/// Apply the first matching rule, if any.
pub fn rewrite_url(rules: &[InterceptionRule], url: &str) -> Option<String> {
    rules
        .iter()
        .find(|rule| rule.matches(url))
        .map(|rule| rule.rewrite(url))
}

/// Request dispatcher with switchable URL rewriting.
pub struct ClientInterceptor {
    transport: Arc<dyn Transport>,
    rules: Vec<InterceptionRule>,
    installed: AtomicBool,
}

impl ClientInterceptor {
    /// Dispatcher with the default redirect table, not yet installed.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_rules(transport, default_rules())
    }

    pub fn with_rules(transport: Arc<dyn Transport>, rules: Vec<InterceptionRule>) -> Self {
        Self {
            transport,
            rules,
            installed: AtomicBool::new(false),
        }
    }

    /// Start rewriting. Returns false if it was already installed.
    pub fn install(&self) -> bool {
        let newly = !self.installed.swap(true, Ordering::SeqCst);
        if newly {
            tracing::debug!(rules = self.rules.len(), "Client interceptor installed");
        }
        newly
    }

    /// Stop rewriting. Returns false if it was not installed.
    pub fn uninstall(&self) -> bool {
        let was = self.installed.swap(false, Ordering::SeqCst);
        if was {
            tracing::debug!("Client interceptor removed, requests pass through");
        }
        was
    }

    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    pub fn rules(&self) -> &[InterceptionRule] {
        &self.rules
    }

    /// URL a request for `url` would actually be sent to.
    pub fn target_for(&self, url: &str) -> String {
        if !self.is_installed() {
            return url.to_string();
        }
        rewrite_url(&self.rules, url).unwrap_or_else(|| url.to_string())
    }

    pub async fn dispatch(&self, mut request: OutboundRequest) -> Result<ClientResponse, TransportError> {
        let target = self.target_for(&request.url);
        if target != request.url {
            tracing::info!(from = %request.url, to = %target, "Redirecting request");
            request.url = target;
        }
        self.transport.send(request).await
    }
}

#[async_trait]
impl Transport for ClientInterceptor {
    async fn send(&self, request: OutboundRequest) -> Result<ClientResponse, TransportError> {
        self.dispatch(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: OutboundRequest) -> Result<ClientResponse, TransportError> {
            self.seen.lock().unwrap().push(request.url);
            Ok(ClientResponse {
                status: StatusCode::OK,
                body: b"{}".to_vec(),
            })
        }
    }

    #[test]
    fn proxy_route_is_redirected_and_health_is_not() {
        let rules = default_rules();
        assert_eq!(
            rewrite_url(&rules, "/api/proxy/generate-activities").as_deref(),
            Some("/api/generate-activities")
        );
        assert_eq!(rewrite_url(&rules, "/api/health"), None);
    }

    #[test]
    fn absolute_urls_keep_origin_and_query() {
        let rules = default_rules();
        assert_eq!(
            rewrite_url(&rules, "http://localhost:3000/api/proxy/rubrics?limit=5").as_deref(),
            Some("http://localhost:3000/api/rubrics?limit=5")
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = vec![
            InterceptionRule::redirect("/api/proxy", "/first"),
            InterceptionRule::redirect("/api/proxy/health", "/second"),
        ];
        assert_eq!(rewrite_url(&rules, "/api/proxy/health").as_deref(), Some("/first/health"));
    }

    #[test]
    fn custom_predicates_are_supported() {
        let rule = InterceptionRule::new(
            "uppercase",
            |url| url.ends_with("/shout"),
            |url| url.to_uppercase(),
        );
        assert!(rule.matches("/api/shout"));
        assert_eq!(rewrite_url(&[rule], "/api/shout").as_deref(), Some("/API/SHOUT"));
    }

    #[test]
    fn install_and_uninstall_are_idempotent() {
        let interceptor = ClientInterceptor::new(Arc::new(Recorder::default()));
        assert!(!interceptor.is_installed());
        assert!(interceptor.install());
        assert!(!interceptor.install());
        assert!(interceptor.uninstall());
        assert!(!interceptor.uninstall());
    }

    #[tokio::test]
    async fn dispatch_rewrites_only_while_installed() {
        let recorder = Arc::new(Recorder::default());
        let interceptor = ClientInterceptor::new(recorder.clone());

        interceptor.dispatch(OutboundRequest::get("/api/proxy/health")).await.unwrap();
        interceptor.install();
        interceptor.dispatch(OutboundRequest::get("/api/proxy/health")).await.unwrap();
        interceptor.dispatch(OutboundRequest::get("/api/health")).await.unwrap();
        interceptor.uninstall();
        interceptor.dispatch(OutboundRequest::get("/api/proxy/health")).await.unwrap();

        let seen = recorder.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec!["/api/proxy/health", "/api/health", "/api/health", "/api/proxy/health"]
        );
    }
}
