use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::csrf::{CSRF_HEADER, CsrfLookup, CsrfResolver};
use crate::error::AdminError;
use crate::notify::NotificationKind;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    /// Sets a header, replacing any existing one with the same name
    /// (compared case-insensitively).
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_string(&self) -> Result<Option<String>, AdminError> {
        self.body
            .as_ref()
            .map(|body| {
                serde_json::to_string(body)
                    .map_err(|error| AdminError::Decode(format!("request body: {error}")))
            })
            .transpose()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AdminError> {
        serde_json::from_str(&self.body).map_err(|error| AdminError::Decode(error.to_string()))
    }
}

/// One HTTP round trip. No timeout, retry or cancellation is applied.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<HttpResponse, AdminError>;
}

/// Surface for transient operator feedback (toasts).
pub trait Notifier {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Extension point for pages that want to react to refreshed data.
pub trait UiUpdater {
    fn update(&self, endpoint: &str, data: &Value);
}

/// Default updater: the payload is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlyUpdater;

impl UiUpdater for LogOnlyUpdater {
    fn update(&self, endpoint: &str, data: &Value) {
        tracing::info!(endpoint, %data, "updating UI with data");
    }
}

/// Generic JSON helper that attaches the CSRF header to every call.
pub struct AdminClient<T> {
    transport: T,
    csrf: CsrfResolver,
}

impl<T: HttpTransport> AdminClient<T> {
    pub fn new(transport: T, csrf: CsrfResolver) -> Self {
        Self { transport, csrf }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Adds the JSON content type and a freshly resolved CSRF token.
    /// Headers already on the request win over these defaults.
    pub fn authenticate(&self, mut request: ApiRequest, lookup: &dyn CsrfLookup) -> ApiRequest {
        let caller_headers = std::mem::take(&mut request.headers);
        request = request
            .with_header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE)
            .with_header(CSRF_HEADER, self.csrf.header_value(lookup));
        for (name, value) in caller_headers {
            request = request.with_header(&name, value);
        }
        request
    }

    /// Any non-2xx status is a failure regardless of body. Failures are
    /// logged, toasted and returned to the caller.
    pub async fn request_json(
        &self,
        request: ApiRequest,
        lookup: &dyn CsrfLookup,
        notifier: &dyn Notifier,
    ) -> Result<Value, AdminError> {
        let url = request.url.clone();
        let result = self.send_checked(self.authenticate(request, lookup)).await;
        if let Err(error) = &result {
            tracing::error!(url = %url, error = %error, "request failed");
            notifier.notify(error.toast_text(), NotificationKind::Error);
        }
        result
    }

    /// Fetches `endpoint` and hands the payload to `updater`. Errors are
    /// logged here as well as returned.
    pub async fn refresh_data(
        &self,
        endpoint: &str,
        lookup: &dyn CsrfLookup,
        notifier: &dyn Notifier,
        updater: &dyn UiUpdater,
    ) -> Result<(), AdminError> {
        match self
            .request_json(ApiRequest::get(endpoint), lookup, notifier)
            .await
        {
            Ok(data) => {
                updater.update(endpoint, &data);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(endpoint, error = %error, "failed to refresh data");
                Err(error)
            }
        }
    }

    async fn send_checked(&self, request: ApiRequest) -> Result<Value, AdminError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(AdminError::HttpStatus {
                status: response.status,
            });
        }
        response.json()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// Transport that records requests and replays canned responses.
    #[derive(Default)]
    pub(crate) struct ScriptedTransport {
        pub(crate) sent: RefCell<Vec<ApiRequest>>,
        pub(crate) replies: RefCell<VecDeque<Result<HttpResponse, AdminError>>>,
    }

    impl ScriptedTransport {
        pub(crate) fn replying(reply: Result<HttpResponse, AdminError>) -> Self {
            let transport = Self::default();
            transport.replies.borrow_mut().push_back(reply);
            transport
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<HttpResponse, AdminError> {
            self.sent.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(AdminError::Network("no scripted reply".to_string())))
        }
    }

    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub(crate) toasts: RefCell<Vec<(String, NotificationKind)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, kind: NotificationKind) {
            self.toasts.borrow_mut().push((message.to_string(), kind));
        }
    }

    pub(crate) struct StaticPage {
        pub(crate) field: Option<String>,
        pub(crate) cookies: Option<String>,
    }

    impl CsrfLookup for StaticPage {
        fn form_field_value(&self, _name: &str) -> Option<String> {
            self.field.clone()
        }

        fn cookie_string(&self) -> Option<String> {
            self.cookies.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use serde_json::json;

    use super::testing::{RecordingNotifier, ScriptedTransport, StaticPage};
    use super::*;
    use crate::config::AdminConfig;

    fn page() -> StaticPage {
        StaticPage {
            field: Some("token-123".to_string()),
            cookies: None,
        }
    }

    fn client(reply: Result<HttpResponse, AdminError>) -> AdminClient<ScriptedTransport> {
        AdminClient::new(
            ScriptedTransport::replying(reply),
            CsrfResolver::form_only(&AdminConfig::default()),
        )
    }

    #[derive(Default)]
    struct CapturingUpdater {
        seen: RefCell<Vec<Value>>,
    }

    impl UiUpdater for CapturingUpdater {
        fn update(&self, _endpoint: &str, data: &Value) {
            self.seen.borrow_mut().push(data.clone());
        }
    }

    #[test]
    fn attaches_json_and_csrf_headers() {
        let client = client(Ok(HttpResponse {
            status: 200,
            body: r#"{"ok":true}"#.to_string(),
        }));
        let notifier = RecordingNotifier::default();
        let value = block_on(client.request_json(ApiRequest::get("/stats/"), &page(), &notifier))
            .expect("request succeeds");
        assert_eq!(value, json!({"ok": true}));

        let sent = client.transport().sent.borrow();
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].header("content-type"), Some("application/json"));
        assert_eq!(sent[0].header("X-CSRFToken"), Some("token-123"));
        assert!(notifier.toasts.borrow().is_empty());
    }

    #[test]
    fn caller_headers_override_defaults() {
        let client = client(Err(AdminError::Network("unused".to_string())));
        let request = ApiRequest::get("/x/").with_header("content-type", "text/plain");
        let request = client.authenticate(request, &page());
        assert_eq!(request.header("Content-Type"), Some("text/plain"));
        assert_eq!(request.headers.len(), 2);
    }

    #[test]
    fn non_success_status_toasts_and_rethrows() {
        let client = client(Ok(HttpResponse {
            status: 500,
            body: r#"{"success":true}"#.to_string(),
        }));
        let notifier = RecordingNotifier::default();
        let error = block_on(client.request_json(ApiRequest::get("/x/"), &page(), &notifier))
            .expect_err("500 is a failure");
        assert_eq!(error, AdminError::HttpStatus { status: 500 });
        assert_eq!(
            notifier.toasts.borrow().as_slice(),
            &[(
                "Request failed. Please try again.".to_string(),
                NotificationKind::Error
            )]
        );
    }

    #[test]
    fn transport_errors_are_rethrown() {
        let client = client(Err(AdminError::Network("offline".to_string())));
        let notifier = RecordingNotifier::default();
        let error = block_on(client.request_json(ApiRequest::get("/x/"), &page(), &notifier))
            .expect_err("offline");
        assert!(matches!(error, AdminError::Network(_)));
        assert_eq!(notifier.toasts.borrow().len(), 1);
    }

    #[test]
    fn refresh_data_hands_payload_to_updater() {
        let client = client(Ok(HttpResponse {
            status: 200,
            body: r#"{"count":3}"#.to_string(),
        }));
        let notifier = RecordingNotifier::default();
        let updater = CapturingUpdater::default();
        block_on(client.refresh_data("/stats/", &page(), &notifier, &updater))
            .expect("refresh succeeds");
        assert_eq!(updater.seen.borrow().as_slice(), &[json!({"count": 3})]);
    }

    #[test]
    fn refresh_data_skips_updater_on_failure() {
        let client = client(Ok(HttpResponse {
            status: 200,
            body: "<html>".to_string(),
        }));
        let notifier = RecordingNotifier::default();
        let updater = CapturingUpdater::default();
        let result = block_on(client.refresh_data("/stats/", &page(), &notifier, &updater));
        assert!(matches!(result, Err(AdminError::Decode(_))));
        assert!(updater.seen.borrow().is_empty());
    }
}
