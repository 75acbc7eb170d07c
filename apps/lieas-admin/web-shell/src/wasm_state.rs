use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use lieas_admin_core::alerts::AlertLifecycle;
use lieas_admin_core::layout::SidebarLayout;
use lieas_admin_core::modal::{DetailModal, ModalStack};
use lieas_admin_core::navigation::NavMenu;
use lieas_admin_core::notify::NotificationCenter;
use lieas_admin_core::schedule::KeyedTasks;
use lieas_admin_core::table::TableModel;
use lieas_admin_core::validation::FormErrors;
use lieas_admin_core::{AdminClient, AdminConfig, MessageBoard, MessageReviewService, ThemeController};
use wasm_bindgen::prelude::Closure;
use web_sys::{Element, IntersectionObserver};

use crate::wasm::{GlooTransport, LocalStorageThemeStore};

pub(crate) type EventHandler = Closure<dyn FnMut(web_sys::Event)>;
pub(crate) type IntersectionHandler = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Keeps attached listeners alive for as long as their owner.
#[derive(Default)]
pub(crate) struct Listeners {
    handlers: RefCell<Vec<EventHandler>>,
}

impl Listeners {
    pub(crate) fn keep(&self, handler: EventHandler) {
        self.handlers.borrow_mut().push(handler);
    }
}

pub(crate) struct TableBinding {
    pub(crate) body: Element,
    /// Row elements indexed by `TableRow::key`.
    pub(crate) rows: Vec<Element>,
    pub(crate) model: TableModel,
}

pub(crate) struct FadeInObserver {
    pub(crate) _observer: IntersectionObserver,
    pub(crate) _callback: IntersectionHandler,
}

/// Page-wide behaviors attached once at start.
pub(crate) struct AdminController {
    pub(crate) config: AdminConfig,
    pub(crate) config_error: Option<String>,
    pub(crate) nav: RefCell<NavMenu>,
    pub(crate) nav_links: RefCell<Vec<Element>>,
    pub(crate) layout: RefCell<SidebarLayout>,
    pub(crate) form_errors: RefCell<FormErrors>,
    pub(crate) tables: RefCell<Vec<TableBinding>>,
    pub(crate) alerts: RefCell<HashMap<String, AlertLifecycle>>,
    pub(crate) modals: RefCell<ModalStack>,
    pub(crate) notifications: RefCell<NotificationCenter>,
    pub(crate) theme: ThemeController<LocalStorageThemeStore>,
    pub(crate) client: AdminClient<GlooTransport>,
    pub(crate) timers: RefCell<KeyedTasks<Timeout>>,
    pub(crate) fade_in: RefCell<Option<FadeInObserver>>,
    pub(crate) listeners: Listeners,
    pub(crate) next_element_key: Cell<u64>,
}

/// The contact-message review screen, present only on pages with a
/// message grid.
pub(crate) struct ReviewPage {
    pub(crate) controller: Rc<AdminController>,
    pub(crate) board: RefCell<MessageBoard>,
    pub(crate) cards: RefCell<HashMap<String, Element>>,
    pub(crate) modal: RefCell<DetailModal>,
    pub(crate) service: MessageReviewService<GlooTransport>,
    pub(crate) listeners: Listeners,
}
