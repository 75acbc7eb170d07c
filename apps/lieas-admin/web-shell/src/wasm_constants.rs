pub(crate) const CONFIG_GLOBAL: &str = "__LIEAS_ADMIN_CONFIG__";
pub(crate) const ELEMENT_KEY_ATTRIBUTE: &str = "data-lieas-key";

pub(crate) const SIDEBAR_TOGGLE_SELECTOR: &str = ".sidebar-toggle";
pub(crate) const SIDEBAR_SELECTOR: &str = ".main-sidebar";
pub(crate) const CONTENT_WRAPPER_SELECTOR: &str = ".content-wrapper";
pub(crate) const NAV_LINK_SELECTOR: &str = ".nav-sidebar .nav-link";
pub(crate) const NAV_ICON_SELECTOR: &str = ".nav-icon";
pub(crate) const NAV_LOADING_CLASS: &str = "loading";
pub(crate) const ACTIVE_CLASS: &str = "active";

pub(crate) const CARD_SELECTOR: &str = ".card";
pub(crate) const CARD_HOVER_TRANSFORM: &str = "translateY(-2px)";
pub(crate) const CARD_REST_TRANSFORM: &str = "translateY(0)";

pub(crate) const FORM_SELECTOR: &str = "form";
pub(crate) const FORM_CONTROL_SELECTOR: &str = ".form-control";
pub(crate) const REQUIRED_FORM_CONTROL_SELECTOR: &str = ".form-control[required]";
pub(crate) const FIELD_ERROR_SELECTOR: &str = ".field-error";

pub(crate) const TABLE_SELECTOR: &str = ".table";
pub(crate) const TABLE_CONTAINER_SELECTOR: &str = ".table-responsive";
pub(crate) const BULK_ACTIONS_SELECTOR: &str = ".bulk-actions";

pub(crate) const ALERT_SELECTOR: &str = ".alert";
pub(crate) const ALERT_CLOSE_SELECTOR: &str = ".alert-close";

pub(crate) const FADE_IN_SELECTOR: &str = ".card, .content-header";
pub(crate) const FADE_IN_CLASS: &str = "fade-in";

pub(crate) const THEME_TOGGLE_SELECTOR: &str = ".theme-toggle";
pub(crate) const OPEN_MODAL_SELECTOR: &str = ".modal.show";

pub(crate) const DATE_INPUT_SELECTOR: &str = "input[type=\"date\"]";
pub(crate) const RICH_TEXT_SELECTOR: &str = "textarea.rich-text";
pub(crate) const FILE_INPUT_SELECTOR: &str = "input[type=\"file\"]";

pub(crate) const MESSAGE_SEARCH_INPUT_ID: &str = "searchInput";
pub(crate) const MESSAGES_GRID_ID: &str = "messagesGrid";
pub(crate) const MESSAGE_CARD_SELECTOR: &str = ".message-card";
pub(crate) const MESSAGE_ID_ATTRIBUTE: &str = "data-id";
pub(crate) const MESSAGE_STATUS_ATTRIBUTE: &str = "data-status";
/// Board key prefix for cards rendered without `data-id`.
pub(crate) const UNKEYED_CARD_PREFIX: &str = "lieas-unkeyed-";
pub(crate) const MESSAGE_NAME_SELECTOR: &str = ".sender-info h3";
pub(crate) const MESSAGE_EMAIL_SELECTOR: &str = ".sender-info .email";
pub(crate) const MESSAGE_SUBJECT_SELECTOR: &str = ".message-subject h4";
pub(crate) const MESSAGE_DESCRIPTION_SELECTOR: &str = ".message-content p";
pub(crate) const MESSAGE_CARD_ACTION_SELECTOR: &str = "button, a, form";
pub(crate) const MESSAGE_MODAL_ID: &str = "messageModal";
pub(crate) const MODAL_NAME_ID: &str = "modalName";
pub(crate) const MODAL_EMAIL_ID: &str = "modalEmail";
pub(crate) const MODAL_SUBJECT_ID: &str = "modalSubject";
pub(crate) const MODAL_DESCRIPTION_ID: &str = "modalDescription";
pub(crate) const MODAL_CLOSE_SELECTOR: &str = ".close";
pub(crate) const UNCHECKED_COUNT_ID: &str = "unchecked-count";

pub(crate) const CARD_EXIT_TRANSITION: &str = "all 0.5s ease";
pub(crate) const CARD_EXIT_TRANSFORM: &str = "translateX(100%)";
