//! Browser-independent core of the LIEAS admin dashboard.
//!
//! Every behavior the dashboard attaches to its server-rendered pages is
//! modelled here as plain data: navigation highlighting, sidebar layout,
//! form validation, sortable/searchable tables, alerts, toasts, modals,
//! theme persistence, CSRF resolution, keyed timers and the contact
//! message review board. The wasm shell mirrors these models onto the DOM.

pub mod alerts;
pub mod config;
pub mod csrf;
pub mod error;
pub mod http;
pub mod layout;
pub mod messages;
pub mod modal;
pub mod navigation;
pub mod notify;
pub mod schedule;
pub mod table;
pub mod theme;
pub mod validation;

pub use config::{AdminConfig, ConfigError};
pub use error::AdminError;
pub use http::{AdminClient, ApiRequest, HttpMethod, HttpResponse, HttpTransport, Notifier, UiUpdater};
pub use messages::{MessageBoard, MessageCard, MessageReviewService, MessageStatus};
pub use theme::{Theme, ThemeController, ThemeStore};
