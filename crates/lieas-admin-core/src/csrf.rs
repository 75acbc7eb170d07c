use crate::config::AdminConfig;

pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Where a CSRF token may be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsrfSource {
    /// Hidden form input with this `name`.
    FormField(String),
    /// Cookie with this name.
    Cookie(String),
}

/// Read access to the places a token can live.
pub trait CsrfLookup {
    /// `Some` when the field exists, even if its value is empty.
    fn form_field_value(&self, name: &str) -> Option<String>;
    /// Raw `document.cookie` style string.
    fn cookie_string(&self) -> Option<String>;
}

/// Ordered fallback list; the first source that yields a value wins.
/// Nothing is cached, every call re-reads the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfResolver {
    sources: Vec<CsrfSource>,
}

impl CsrfResolver {
    pub fn new(sources: Vec<CsrfSource>) -> Self {
        Self { sources }
    }

    pub fn form_only(config: &AdminConfig) -> Self {
        Self::new(vec![CsrfSource::FormField(config.csrf_field_name.clone())])
    }

    pub fn form_then_cookie(config: &AdminConfig) -> Self {
        Self::new(vec![
            CsrfSource::FormField(config.csrf_field_name.clone()),
            CsrfSource::Cookie(config.csrf_cookie_name.clone()),
        ])
    }

    pub fn sources(&self) -> &[CsrfSource] {
        &self.sources
    }

    pub fn resolve(&self, lookup: &dyn CsrfLookup) -> Option<String> {
        self.sources.iter().find_map(|source| match source {
            CsrfSource::FormField(name) => lookup.form_field_value(name),
            CsrfSource::Cookie(name) => lookup
                .cookie_string()
                .and_then(|cookies| cookie_value(&cookies, name)),
        })
    }

    /// Header value to send; an unresolved token is sent as empty.
    pub fn header_value(&self, lookup: &dyn CsrfLookup) -> String {
        self.resolve(lookup).unwrap_or_default()
    }
}

/// Finds `name` in a `k=v; k2=v2` cookie string and percent-decodes it.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() || name.is_empty() {
        return None;
    }
    let prefix = format!("{name}=");
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|raw| {
            urlencoding::decode(raw)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakePage {
        field: Option<String>,
        cookies: Option<String>,
    }

    impl CsrfLookup for FakePage {
        fn form_field_value(&self, name: &str) -> Option<String> {
            (name == "csrfmiddlewaretoken")
                .then(|| self.field.clone())
                .flatten()
        }

        fn cookie_string(&self) -> Option<String> {
            self.cookies.clone()
        }
    }

    #[test]
    fn cookie_parsing_trims_and_decodes() {
        assert_eq!(
            cookie_value("a=1; csrftoken=abc%3D", "csrftoken"),
            Some("abc=".to_string())
        );
        assert_eq!(cookie_value("xcsrftoken=1", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn form_field_wins_over_cookie() {
        let config = AdminConfig::default();
        let page = FakePage {
            field: Some("from-form".to_string()),
            cookies: Some("csrftoken=from-cookie".to_string()),
        };
        let resolver = CsrfResolver::form_then_cookie(&config);
        assert_eq!(resolver.resolve(&page), Some("from-form".to_string()));
    }

    #[test]
    fn falls_back_to_cookie_when_field_is_absent() {
        let config = AdminConfig::default();
        let page = FakePage {
            field: None,
            cookies: Some("sessionid=x; csrftoken=from-cookie".to_string()),
        };
        let resolver = CsrfResolver::form_then_cookie(&config);
        assert_eq!(resolver.resolve(&page), Some("from-cookie".to_string()));
    }

    #[test]
    fn form_only_resolver_defaults_to_empty_header() {
        let config = AdminConfig::default();
        let page = FakePage {
            field: None,
            cookies: Some("csrftoken=ignored".to_string()),
        };
        let resolver = CsrfResolver::form_only(&config);
        assert_eq!(resolver.resolve(&page), None);
        assert_eq!(resolver.header_value(&page), "");
    }
}
