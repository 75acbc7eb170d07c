use super::*;

/// `HttpTransport` over the browser `fetch` API.
pub(crate) struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<HttpResponse, AdminError> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Patch => Request::patch(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match request.body_string()? {
            Some(body) => builder
                .body(body)
                .map_err(map_network_error)?
                .send()
                .await
                .map_err(map_network_error)?,
            None => builder.send().await.map_err(map_network_error)?,
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| AdminError::Decode(format!("failed to read response body: {error}")))?;
        Ok(HttpResponse { status, body })
    }
}

fn map_network_error(error: gloo_net::Error) -> AdminError {
    AdminError::Network(error.to_string())
}

/// Reads CSRF tokens from the live page on every call.
pub(super) struct DomCsrfLookup;

impl CsrfLookup for DomCsrfLookup {
    fn form_field_value(&self, name: &str) -> Option<String> {
        let field = query(&format!("[name={name}]"))?;
        Some(control_value(&field))
    }

    fn cookie_string(&self) -> Option<String> {
        document()
            .ok()?
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()?
            .cookie()
            .ok()
    }
}

/// Routes client-side failures into the toast system.
pub(super) struct ToastNotifier<'a>(pub(super) &'a Rc<AdminController>);

impl Notifier for ToastNotifier<'_> {
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.0.show_notification(message, kind, None);
    }
}
