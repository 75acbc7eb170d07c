mod page_state;
#[cfg(target_arch = "wasm32")]
mod wasm_constants;
#[cfg(target_arch = "wasm32")]
mod wasm_state;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use async_trait::async_trait;
    use gloo_net::http::Request;
    use gloo_timers::callback::Timeout;
    use lieas_admin_core::alerts::{ALERT_CLOSE_CLASS, ALERT_CLOSE_LABEL, AlertLifecycle, needs_close_button};
    use lieas_admin_core::csrf::{CsrfLookup, CsrfResolver};
    use lieas_admin_core::http::LogOnlyUpdater;
    use lieas_admin_core::layout::{SIDEBAR_COLLAPSED_CLASS, SidebarLayout};
    use lieas_admin_core::messages::EMPTY_STATE_HTML;
    use lieas_admin_core::modal::{DetailModal, MODAL_SHOW_CLASS, MessageDetail, ModalStack, ScrollLock};
    use lieas_admin_core::navigation::{NavLink, NavMenu};
    use lieas_admin_core::notify::{NOTIFICATION_SHOW_CLASS, NotificationCenter, NotificationKind};
    use lieas_admin_core::schedule::{Debounce, KeyedTasks, TaskKey, Throttle};
    use lieas_admin_core::table::{
        SELECTED_ROW_CLASS, TABLE_SEARCH_CLASS, TABLE_SEARCH_PLACEHOLDER, TableModel, TableRow,
        bulk_actions_visible,
    };
    use lieas_admin_core::theme::THEME_ATTRIBUTE;
    use lieas_admin_core::validation::{
        FIELD_ERROR_CLASS, FOCUSED_CLASS, FieldErrorChange, FieldInput, FieldKind, FormErrors,
        INPUT_ERROR_CLASS, validate_form,
    };
    use lieas_admin_core::{
        AdminClient, AdminConfig, AdminError, ApiRequest, HttpMethod, HttpResponse, HttpTransport,
        MessageBoard, MessageCard, MessageReviewService, MessageStatus, Notifier, Theme,
        ThemeController, ThemeStore,
    };
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{
        Document, Element, EventTarget, HtmlElement, HtmlInputElement, IntersectionObserver,
        IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    };

    use crate::page_state::{AdminSnapshot, ReviewSnapshot, resolve_config};
    use crate::wasm_constants::*;
    use crate::wasm_state::{
        AdminController, EventHandler, FadeInObserver, IntersectionHandler, Listeners,
        ReviewPage, TableBinding,
    };

    mod controller;
    mod dom;
    mod lifecycle;
    mod logging;
    mod messages;
    mod network;
    mod storage;
    mod timers;

    use dom::*;
    use lifecycle::*;
    pub(crate) use network::GlooTransport;
    use network::{DomCsrfLookup, ToastNotifier};
    pub(crate) use storage::LocalStorageThemeStore;
    use timers::*;

    thread_local! {
        static CONTROLLER: RefCell<Option<Rc<AdminController>>> = const { RefCell::new(None) };
        static REVIEW_PAGE: RefCell<Option<Rc<ReviewPage>>> = const { RefCell::new(None) };
        static BOOT_HANDLER: RefCell<Option<EventHandler>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        if let Err(error) = start_when_ready() {
            tracing::error!(error = %error, "admin shell failed to start");
        }
    }

    #[wasm_bindgen]
    pub fn admin_state_json() -> String {
        snapshot().to_json()
    }

    #[wasm_bindgen]
    pub fn open_modal(modal_id: String) {
        if let Some(controller) = current_controller() {
            controller.open_modal(&modal_id);
        }
    }

    #[wasm_bindgen]
    pub fn close_modal(modal_id: String) {
        if let Some(controller) = current_controller() {
            controller.close_modal(&modal_id);
        }
    }

    #[wasm_bindgen]
    pub fn show_notification(message: String, kind: Option<String>, duration_ms: Option<u32>) {
        if let Some(controller) = current_controller() {
            let kind = kind.as_deref().map(NotificationKind::parse).unwrap_or_default();
            controller.show_notification(&message, kind, duration_ms);
        }
    }

    #[wasm_bindgen]
    pub fn toggle_theme() {
        if let Some(controller) = current_controller() {
            controller.toggle_theme();
        }
    }

    #[wasm_bindgen]
    pub fn toggle_sidebar() {
        if let Some(controller) = current_controller() {
            controller.toggle_sidebar();
        }
    }

    #[wasm_bindgen]
    pub fn refresh_data(endpoint: String) {
        if let Some(controller) = current_controller() {
            spawn_local(async move {
                let notifier = ToastNotifier(&controller);
                // Failures are already logged and toasted by the client.
                let _ = controller
                    .client
                    .refresh_data(&endpoint, &DomCsrfLookup, &notifier, &LogOnlyUpdater)
                    .await;
            });
        }
    }

    #[wasm_bindgen]
    pub fn mark_as_checked(id: String) {
        if let Some(page) = current_review_page() {
            page.mark_as_checked(id);
        }
    }

    #[wasm_bindgen]
    pub fn view_full_message(id: String) {
        if let Some(page) = current_review_page() {
            page.view_full_message(&id);
        }
    }

    #[wasm_bindgen]
    pub fn filter_messages(term: String) {
        if let Some(page) = current_review_page() {
            page.filter_messages(&term);
        }
    }

    /// Trailing-edge debounce for page scripts. The returned function
    /// forwards its latest argument once `wait_ms` passed without a call.
    #[wasm_bindgen]
    pub fn debounce(callback: js_sys::Function, wait_ms: u32) -> js_sys::Function {
        let debounced = debounced(wait_ms, move |argument: JsValue| {
            let _ = callback.call1(&JsValue::NULL, &argument);
        });
        Closure::<dyn FnMut(JsValue)>::wrap(Box::new(debounced))
            .into_js_value()
            .unchecked_into()
    }

    /// Leading-edge throttle for page scripts: the first call runs, calls
    /// within the next `limit_ms` are dropped.
    #[wasm_bindgen]
    pub fn throttle(callback: js_sys::Function, limit_ms: u32) -> js_sys::Function {
        let throttled = throttled(limit_ms, move |argument: JsValue| {
            let _ = callback.call1(&JsValue::NULL, &argument);
        });
        Closure::<dyn FnMut(JsValue)>::wrap(Box::new(throttled))
            .into_js_value()
            .unchecked_into()
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::admin_state_json;

#[cfg(not(target_arch = "wasm32"))]
pub fn admin_state_json() -> String {
    page_state::AdminSnapshot::default().to_json()
}
