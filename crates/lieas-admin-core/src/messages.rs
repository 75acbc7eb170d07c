//! Contact-message review board.
//!
//! The server renders one card per unchecked message. Operators filter the
//! cards, open a full preview, and mark messages as checked; a checked
//! card slides out and is dropped from the board.

use serde::{Deserialize, Serialize};

use crate::config::AdminConfig;
use crate::csrf::{CSRF_HEADER, CsrfLookup, CsrfResolver};
use crate::error::AdminError;
use crate::http::{
    ApiRequest, CONTENT_TYPE_HEADER, HttpResponse, HttpTransport, JSON_CONTENT_TYPE,
};
use crate::modal::MessageDetail;

pub const EMPTY_STATE_TITLE: &str = "All Messages Checked!";
pub const EMPTY_STATE_BODY: &str = "Great job! You've reviewed all contact messages.";
pub const EMPTY_STATE_HTML: &str = concat!(
    "<div class=\"no-messages\">",
    "<i class=\"fas fa-check-circle\" style=\"color: #4caf50;\"></i>",
    "<h3>All Messages Checked!</h3>",
    "<p>Great job! You've reviewed all contact messages.</p>",
    "</div>"
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Unchecked,
    Checked,
}

impl MessageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::Checked => "checked",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "unchecked" => Some(Self::Unchecked),
            "checked" => Some(Self::Checked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCard {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub description: String,
    pub status: MessageStatus,
    pub visible: bool,
    /// Exit animation running; the card still counts until it is removed.
    pub removing: bool,
    /// False for cards the page rendered without a `data-id`; they are
    /// filtered and counted but never sent to the server.
    pub keyed: bool,
}

impl MessageCard {
    pub fn new(id: impl Into<String>, detail: MessageDetail, status: MessageStatus) -> Self {
        Self {
            id: id.into(),
            name: detail.name,
            email: detail.email,
            subject: detail.subject,
            description: detail.description,
            status,
            visible: true,
            removing: false,
            keyed: true,
        }
    }

    /// Card without a server id, tracked under a page-local `key`.
    pub fn unkeyed(key: impl Into<String>, detail: MessageDetail, status: MessageStatus) -> Self {
        Self {
            keyed: false,
            ..Self::new(key, detail, status)
        }
    }

    /// Searchable text. Fields are newline-separated so a single-line term
    /// never matches across two fields.
    pub fn search_text(&self) -> String {
        [
            self.name.as_str(),
            self.email.as_str(),
            self.subject.as_str(),
            self.description.as_str(),
        ]
        .join("\n")
        .to_lowercase()
    }

    pub fn detail(&self) -> MessageDetail {
        MessageDetail {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            description: self.description.clone(),
        }
    }

    pub fn display_value(&self) -> &'static str {
        if self.visible { "block" } else { "none" }
    }
}

/// State left on the board after a card finished its exit animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalOutcome {
    pub unchecked_count: usize,
    pub board_empty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBoard {
    cards: Vec<MessageCard>,
    term: String,
}

impl MessageBoard {
    pub fn new(cards: Vec<MessageCard>) -> Self {
        Self {
            cards,
            term: String::new(),
        }
    }

    pub fn cards(&self) -> &[MessageCard] {
        &self.cards
    }

    pub fn card(&self, id: &str) -> Option<&MessageCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn detail(&self, id: &str) -> Option<MessageDetail> {
        self.card(id).map(MessageCard::detail)
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Recomputes visibility for every card and returns the new unchecked
    /// counter.
    pub fn filter(&mut self, term: &str) -> usize {
        self.term = term.to_lowercase();
        for card in &mut self.cards {
            card.visible = card.search_text().contains(&self.term);
        }
        self.unchecked_visible_count()
    }

    /// The counter shown to operators: visible cards still unchecked.
    pub fn unchecked_visible_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|card| card.visible && card.status == MessageStatus::Unchecked)
            .count()
    }

    /// Whether a status update may be sent for `id`. Ids the board does not
    /// know are left to the server to reject.
    pub fn accepts_status_update(&self, id: &str) -> bool {
        self.card(id).is_none_or(|card| card.keyed)
    }

    /// Starts the exit animation after the server confirmed the update.
    pub fn begin_removal(&mut self, id: &str) -> bool {
        match self.cards.iter_mut().find(|card| card.id == id) {
            Some(card) if card.keyed && !card.removing => {
                card.removing = true;
                true
            }
            _ => false,
        }
    }

    pub fn finish_removal(&mut self, id: &str) -> Option<RemovalOutcome> {
        let position = self.cards.iter().position(|card| card.id == id)?;
        self.cards.remove(position);
        Some(RemovalOutcome {
            unchecked_count: self.unchecked_visible_count(),
            board_empty: self.is_empty(),
        })
    }

    /// Empty means no cards at all, hidden ones included.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleStatusRequest {
    pub status: MessageStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleStatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<String>,
}

/// The endpoint answers JSON for both outcomes, so the body decides and
/// the HTTP status does not.
pub fn interpret_toggle_response(
    response: &HttpResponse,
) -> Result<ToggleStatusResponse, AdminError> {
    let decoded: ToggleStatusResponse = response.json()?;
    if decoded.success {
        Ok(decoded)
    } else {
        Err(AdminError::ServerRejected {
            message: decoded.error,
        })
    }
}

fn validate_message_id(id: &str) -> Result<&str, AdminError> {
    let trimmed = id.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if valid {
        Ok(trimmed)
    } else {
        Err(AdminError::InvalidMessageId(id.to_string()))
    }
}

pub struct MessageReviewService<T> {
    transport: T,
    csrf: CsrfResolver,
    config: AdminConfig,
}

impl<T: HttpTransport> MessageReviewService<T> {
    pub fn new(transport: T, config: AdminConfig) -> Self {
        Self {
            transport,
            csrf: CsrfResolver::form_then_cookie(&config),
            config,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_mark_checked_request(
        &self,
        id: &str,
        lookup: &dyn CsrfLookup,
    ) -> Result<ApiRequest, AdminError> {
        let id = validate_message_id(id)?;
        let body = serde_json::to_value(ToggleStatusRequest {
            status: MessageStatus::Checked,
        })
        .map_err(|error| AdminError::Decode(format!("request body: {error}")))?;
        Ok(
            ApiRequest::post_json(self.config.toggle_status_path(id), body)
                .with_header(CSRF_HEADER, self.csrf.header_value(lookup))
                .with_header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE),
        )
    }

    /// Mirrors an unchecked → checked transition to the server. The board
    /// is not touched here; callers animate the card out on `Ok`.
    pub async fn mark_as_checked(
        &self,
        id: &str,
        lookup: &dyn CsrfLookup,
    ) -> Result<ToggleStatusResponse, AdminError> {
        let request = self.build_mark_checked_request(id, lookup)?;
        let result = match self.transport.send(request).await {
            Ok(response) => interpret_toggle_response(&response),
            Err(error) => Err(error),
        };
        match &result {
            Ok(_) => tracing::info!(message_id = id, "message marked as checked"),
            Err(error) => {
                tracing::error!(message_id = id, error = %error, "error updating message status");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::http::testing::{ScriptedTransport, StaticPage};

    fn card(id: &str, name: &str, subject: &str, status: MessageStatus) -> MessageCard {
        MessageCard::new(
            id,
            MessageDetail {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                subject: subject.to_string(),
                description: format!("Body of {subject}"),
            },
            status,
        )
    }

    fn board() -> MessageBoard {
        MessageBoard::new(vec![
            card("41", "Ada", "Pricing", MessageStatus::Unchecked),
            card("42", "Grace", "Support", MessageStatus::Unchecked),
            card("43", "Linus", "Pricing", MessageStatus::Checked),
        ])
    }

    #[test]
    fn counter_counts_visible_unchecked_cards() {
        let mut board = board();
        assert_eq!(board.unchecked_visible_count(), 2);
        assert_eq!(board.filter("PRICING"), 1);
        assert_eq!(board.card("42").map(MessageCard::display_value), Some("none"));
        assert_eq!(board.filter(""), 2);
    }

    #[test]
    fn filter_searches_every_field() {
        let mut board = board();
        assert_eq!(board.filter("grace@example"), 1);
        assert_eq!(board.filter("body of support"), 1);
        assert_eq!(board.filter("nobody"), 0);
        // Terms never straddle two fields.
        assert_eq!(board.filter("example.compricing"), 0);
    }

    #[test]
    fn unkeyed_cards_filter_and_keep_the_board_alive() {
        let detail = MessageDetail {
            name: "Anon".to_string(),
            email: "anon@example.com".to_string(),
            subject: "Legacy".to_string(),
            description: "Rendered without an id".to_string(),
        };
        let mut board = MessageBoard::new(vec![
            card("42", "Grace", "Support", MessageStatus::Unchecked),
            MessageCard::unkeyed("unkeyed-1", detail, MessageStatus::Unchecked),
        ]);
        assert_eq!(board.unchecked_visible_count(), 2);
        assert_eq!(board.filter("support"), 1);
        assert_eq!(board.card("unkeyed-1").map(MessageCard::display_value), Some("none"));
        board.filter("");

        assert!(!board.accepts_status_update("unkeyed-1"));
        assert!(board.accepts_status_update("42"));
        assert!(board.accepts_status_update("99"));
        assert!(!board.begin_removal("unkeyed-1"));

        assert!(board.begin_removal("42"));
        assert_eq!(
            board.finish_removal("42"),
            Some(RemovalOutcome {
                unchecked_count: 1,
                board_empty: false,
            })
        );
    }

    #[test]
    fn removal_updates_counter_and_empty_state() {
        let mut board = MessageBoard::new(vec![card("42", "Grace", "Support", MessageStatus::Unchecked)]);
        assert!(board.begin_removal("42"));
        assert!(!board.begin_removal("42"));
        assert_eq!(board.unchecked_visible_count(), 1);
        assert_eq!(
            board.finish_removal("42"),
            Some(RemovalOutcome {
                unchecked_count: 0,
                board_empty: true,
            })
        );
        assert_eq!(board.finish_removal("42"), None);
    }

    #[test]
    fn hidden_cards_keep_the_board_non_empty() {
        let mut board = board();
        board.filter("Ada");
        board.finish_removal("41");
        let outcome = board.finish_removal("42").expect("card 42 exists");
        assert_eq!(outcome.unchecked_count, 0);
        assert!(!outcome.board_empty);
    }

    #[test]
    fn request_matches_endpoint_contract() {
        let service = MessageReviewService::new(ScriptedTransport::default(), AdminConfig::default());
        let page = StaticPage {
            field: None,
            cookies: Some("csrftoken=cookie-token".to_string()),
        };
        let request = service
            .build_mark_checked_request("42", &page)
            .expect("valid id");
        assert_eq!(request.url, "/toggle-message-status/42/");
        assert_eq!(request.body, Some(json!({"status": "checked"})));
        assert_eq!(request.header("X-CSRFToken"), Some("cookie-token"));
        assert_eq!(request.header("Content-Type"), Some("application/json"));

        assert!(matches!(
            service.build_mark_checked_request("../etc", &page),
            Err(AdminError::InvalidMessageId(_))
        ));
    }

    #[test]
    fn success_false_surfaces_server_error() {
        let service = MessageReviewService::new(
            ScriptedTransport::replying(Ok(HttpResponse {
                status: 404,
                body: r#"{"success": false, "error": "not found"}"#.to_string(),
            })),
            AdminConfig::default(),
        );
        let page = StaticPage {
            field: Some("t".to_string()),
            cookies: None,
        };
        let error = block_on(service.mark_as_checked("42", &page)).expect_err("rejected");
        assert!(error.alert_text().contains("not found"));
    }

    #[test]
    fn success_true_is_accepted() {
        let service = MessageReviewService::new(
            ScriptedTransport::replying(Ok(HttpResponse {
                status: 200,
                body: r#"{"success": true, "message": "Message status updated to checked", "new_status": "checked"}"#.to_string(),
            })),
            AdminConfig::default(),
        );
        let page = StaticPage {
            field: Some("t".to_string()),
            cookies: None,
        };
        let response = block_on(service.mark_as_checked("42", &page)).expect("accepted");
        assert_eq!(response.new_status.as_deref(), Some("checked"));
        assert_eq!(service.transport().sent.borrow().len(), 1);
    }

    #[test]
    fn non_json_reply_uses_retry_alert() {
        let response = HttpResponse {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        let error = interpret_toggle_response(&response).expect_err("not json");
        assert_eq!(
            error.alert_text(),
            "Error updating message status. Please try again."
        );
    }
}
