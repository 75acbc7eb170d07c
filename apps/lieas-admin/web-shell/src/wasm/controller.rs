use super::*;

impl AdminController {
    /// Builds the controller and wires every page-wide behavior. A
    /// behavior whose elements are missing is skipped, never fatal.
    pub(super) fn attach(config: AdminConfig, config_error: Option<String>) -> Rc<Self> {
        let client = AdminClient::new(GlooTransport, CsrfResolver::form_only(&config));
        let theme = ThemeController::new(LocalStorageThemeStore, config.theme_storage_key.clone());
        let controller = Rc::new(Self {
            config,
            config_error,
            nav: RefCell::new(NavMenu::default()),
            nav_links: RefCell::new(Vec::new()),
            layout: RefCell::new(SidebarLayout::default()),
            form_errors: RefCell::new(FormErrors::default()),
            tables: RefCell::new(Vec::new()),
            alerts: RefCell::new(HashMap::new()),
            modals: RefCell::new(ModalStack::default()),
            notifications: RefCell::new(NotificationCenter::default()),
            theme,
            client,
            timers: RefCell::new(KeyedTasks::default()),
            fade_in: RefCell::new(None),
            listeners: Listeners::default(),
            next_element_key: Cell::new(0),
        });

        let results = [
            ("page listeners", controller.setup_page_listeners()),
            ("navigation", controller.setup_navigation()),
            ("cards", controller.setup_cards()),
            ("forms", controller.setup_forms()),
            ("tables", controller.setup_tables()),
            ("alerts", controller.setup_alerts()),
            ("fade-in", controller.setup_fade_in()),
            ("theme", controller.setup_theme()),
            ("components", controller.setup_components()),
        ];
        for (behavior, result) in results {
            if let Err(error) = result {
                tracing::warn!(behavior, error = %error, "behavior not attached");
            }
        }
        controller
    }

    fn on(
        self: &Rc<Self>,
        target: &EventTarget,
        event: &str,
        handler: impl Fn(&Rc<Self>, web_sys::Event) + 'static,
    ) -> Result<(), String> {
        bind(self, &self.listeners, target, event, handler)
    }

    /// Stable key for timers and per-element state: the element id when
    /// it has one, otherwise a generated `data-lieas-key`.
    pub(super) fn element_key(&self, element: &Element, prefix: &str) -> String {
        let id = element.id();
        if !id.is_empty() {
            return id;
        }
        if let Some(existing) = element.get_attribute(ELEMENT_KEY_ATTRIBUTE) {
            return existing;
        }
        let next = self.next_element_key.get() + 1;
        self.next_element_key.set(next);
        let key = format!("{prefix}-{next}");
        let _ = element.set_attribute(ELEMENT_KEY_ATTRIBUTE, &key);
        key
    }

    fn setup_page_listeners(self: &Rc<Self>) -> Result<(), String> {
        if let (Some(sidebar), _) = Self::sidebar_elements() {
            *self.layout.borrow_mut() =
                SidebarLayout::rendered(has_class(&sidebar, SIDEBAR_COLLAPSED_CLASS));
        }
        if let Some(toggle) = query(SIDEBAR_TOGGLE_SELECTOR) {
            self.on(&toggle, "click", |controller, _event| {
                controller.toggle_sidebar();
            })?;
        }

        let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
        self.on(&window, "resize", |controller, _event| {
            controller.handle_resize();
        })?;

        self.on(&document()?, "keydown", |controller, event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|event| event.key() == "Escape");
            if is_escape {
                controller.close_open_modals();
            }
        })
    }

    fn sidebar_elements() -> (Option<Element>, Option<Element>) {
        (query(SIDEBAR_SELECTOR), query(CONTENT_WRAPPER_SELECTOR))
    }

    fn apply_collapse_layout(&self) {
        let layout = *self.layout.borrow();
        let (sidebar, content) = Self::sidebar_elements();
        if let Some(sidebar) = sidebar {
            for (class, enabled) in layout.sidebar_classes() {
                set_class(&sidebar, class, enabled);
            }
        }
        if let Some(content) = content {
            for (class, enabled) in layout.content_classes() {
                set_class(&content, class, enabled);
            }
        }
    }

    pub(super) fn toggle_sidebar(&self) {
        {
            let mut layout = self.layout.borrow_mut();
            if let (Some(sidebar), _) = Self::sidebar_elements() {
                // Page scripts may flip the class between toggles.
                layout.collapsed = has_class(&sidebar, SIDEBAR_COLLAPSED_CLASS);
            }
            layout.toggle();
        }
        self.apply_collapse_layout();
    }

    fn handle_resize(&self) {
        let Some(width) = viewport_width() else {
            return;
        };
        let changed = self
            .layout
            .borrow_mut()
            .apply_viewport_width(width, self.config.mobile_breakpoint_px);
        if changed {
            self.apply_mobile_layout();
        }
    }

    /// Resizing leaves the collapse classes as they are.
    fn apply_mobile_layout(&self) {
        let layout = *self.layout.borrow();
        let (sidebar, content) = Self::sidebar_elements();
        for element in [sidebar, content].iter().flatten() {
            for (class, enabled) in layout.mobile_classes() {
                set_class(element, class, enabled);
            }
        }
    }

    fn setup_navigation(self: &Rc<Self>) -> Result<(), String> {
        let links = query_all(NAV_LINK_SELECTOR);
        let mut menu = NavMenu::new(
            links
                .iter()
                .map(|link| NavLink::new(link.get_attribute("href").as_deref()))
                .collect(),
        );
        menu.highlight_current(&current_pathname());
        *self.nav.borrow_mut() = menu;
        *self.nav_links.borrow_mut() = links.clone();
        self.sync_nav_classes();

        for (index, link) in links.iter().enumerate() {
            let icon = query_in(link, NAV_ICON_SELECTOR);
            let key = self.element_key(link, "nav");
            self.on(link, "click", move |controller, _event| {
                if controller.nav.borrow_mut().activate(index) {
                    controller.sync_nav_classes();
                }
                if let Some(icon) = &icon {
                    controller.show_nav_loading(&key, icon);
                }
            })?;
        }
        Ok(())
    }

    fn sync_nav_classes(&self) {
        let nav = self.nav.borrow();
        for (link, state) in self.nav_links.borrow().iter().zip(nav.links()) {
            set_class(link, ACTIVE_CLASS, state.active);
        }
    }

    /// Cosmetic only; it is not tied to navigation completing.
    fn show_nav_loading(self: &Rc<Self>, key: &str, icon: &Element) {
        set_class(icon, NAV_LOADING_CLASS, true);
        let icon = icon.clone();
        schedule(
            self,
            TaskKey::step(key, "loading"),
            self.config.nav_loading_ms,
            move |_controller| set_class(&icon, NAV_LOADING_CLASS, false),
        );
    }

    fn setup_cards(self: &Rc<Self>) -> Result<(), String> {
        for card in query_all(CARD_SELECTOR) {
            let hovered = card.clone();
            self.on(&card, "mouseenter", move |_controller, _event| {
                set_style(&hovered, "transform", CARD_HOVER_TRANSFORM);
            })?;
            let left = card.clone();
            self.on(&card, "mouseleave", move |_controller, _event| {
                set_style(&left, "transform", CARD_REST_TRANSFORM);
            })?;
        }
        Ok(())
    }

    fn setup_forms(self: &Rc<Self>) -> Result<(), String> {
        for form in query_all(FORM_SELECTOR) {
            let submitted = form.clone();
            self.on(&form, "submit", move |controller, event| {
                if !controller.validate_form(&submitted) {
                    event.prevent_default();
                }
            })?;
        }

        for input in query_all(FORM_CONTROL_SELECTOR) {
            let focused = input.clone();
            self.on(&input, "focus", move |_controller, _event| {
                if let Some(parent) = focused.parent_element() {
                    set_class(&parent, FOCUSED_CLASS, true);
                }
            })?;
            let blurred = input.clone();
            self.on(&input, "blur", move |controller, _event| {
                if let Some(parent) = blurred.parent_element() {
                    set_class(&parent, FOCUSED_CLASS, false);
                }
                controller.validate_field(&blurred);
            })?;
        }
        Ok(())
    }

    fn field_input(element: &Element) -> FieldInput {
        FieldInput::new(
            FieldKind::from_input_type(&control_type(element)),
            element.has_attribute("required"),
            control_value(element),
        )
    }

    fn validate_field(&self, element: &Element) {
        let key = self.element_key(element, "field");
        let change = self
            .form_errors
            .borrow_mut()
            .validate(&key, &Self::field_input(element));
        Self::render_field_error(element, change);
    }

    fn validate_form(&self, form: &Element) -> bool {
        let fields: Vec<(String, Element, FieldInput)> = query_all_in(form, REQUIRED_FORM_CONTROL_SELECTOR)
            .into_iter()
            .map(|element| {
                let key = self.element_key(&element, "field");
                let input = Self::field_input(&element);
                (key, element, input)
            })
            .collect();
        let outcome = validate_form(
            &mut self.form_errors.borrow_mut(),
            fields.iter().map(|(key, _, input)| (key.as_str(), input)),
        );
        for ((_, element, _), (_, change)) in fields.iter().zip(outcome.changes) {
            Self::render_field_error(element, change);
        }
        outcome.may_submit
    }

    /// Clears any previous error node first so a field never shows two.
    fn render_field_error(element: &Element, change: FieldErrorChange) {
        set_class(element, INPUT_ERROR_CLASS, false);
        let Some(parent) = element.parent_element() else {
            return;
        };
        for stale in query_all_in(&parent, FIELD_ERROR_SELECTOR) {
            stale.remove();
        }
        if let FieldErrorChange::Shown(error) = change {
            set_class(element, INPUT_ERROR_CLASS, true);
            let Ok(node) = document().and_then(|document| {
                document
                    .create_element("div")
                    .map_err(|_| "failed to create field error".to_string())
            }) else {
                return;
            };
            node.set_class_name(FIELD_ERROR_CLASS);
            node.set_text_content(Some(&error.to_string()));
            let _ = parent.append_child(&node);
        }
    }

    fn setup_tables(self: &Rc<Self>) -> Result<(), String> {
        for table in query_all(TABLE_SELECTOR) {
            let Some(body) = query_in(&table, "tbody") else {
                tracing::warn!(table = %self.element_key(&table, "table"), "table has no tbody; skipping");
                continue;
            };
            let rows = query_all_in(&body, "tr");
            let model = TableModel::new(
                rows.iter()
                    .enumerate()
                    .map(|(key, row)| TableRow::new(key, row_cells(row), text_of(row)))
                    .collect(),
            );
            let index = self.tables.borrow().len();
            self.tables.borrow_mut().push(TableBinding {
                body: body.clone(),
                rows: rows.clone(),
                model,
            });

            for (column, header) in query_all_in(&table, "th").into_iter().enumerate() {
                set_style(&header, "cursor", "pointer");
                self.on(&header, "click", move |controller, _event| {
                    controller.sort_table(index, column);
                })?;
            }

            for (key, row) in rows.iter().enumerate() {
                self.on(row, "click", move |controller, _event| {
                    controller.toggle_row(index, key);
                })?;
            }

            if let Err(error) = self.add_table_search(&table, index) {
                tracing::warn!(error = %error, "table search not added");
            }
        }
        Ok(())
    }

    fn sort_table(&self, index: usize, column: usize) {
        let mut tables = self.tables.borrow_mut();
        let Some(binding) = tables.get_mut(index) else {
            return;
        };
        for (key, row) in binding.rows.iter().enumerate() {
            binding.model.set_row_cells(key, row_cells(row));
        }
        for key in binding.model.sort_by_column(column) {
            if let Some(row) = binding.rows.get(key) {
                let _ = binding.body.append_child(row);
            }
        }
    }

    fn toggle_row(&self, index: usize, key: usize) {
        {
            let mut tables = self.tables.borrow_mut();
            let Some(binding) = tables.get_mut(index) else {
                return;
            };
            let (Some(selected), Some(row)) = (binding.model.toggle_selected(key), binding.rows.get(key))
            else {
                return;
            };
            set_class(row, SELECTED_ROW_CLASS, selected);
        }
        self.update_bulk_actions();
    }

    /// The bar follows selection across every table on the page.
    fn update_bulk_actions(&self) {
        let Some(bar) = query(BULK_ACTIONS_SELECTOR) else {
            return;
        };
        let visible = bulk_actions_visible(self.tables.borrow().iter().map(|binding| &binding.model));
        set_style(&bar, "display", if visible { "block" } else { "none" });
    }

    fn add_table_search(self: &Rc<Self>, table: &Element, index: usize) -> Result<(), String> {
        let Some(container) = table.closest(TABLE_CONTAINER_SELECTOR).ok().flatten() else {
            return Ok(());
        };
        let input = document()?
            .create_element("input")
            .map_err(|_| "failed to create table search".to_string())?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| "table search is not HtmlInputElement".to_string())?;
        input.set_type("text");
        input.set_placeholder(TABLE_SEARCH_PLACEHOLDER);
        input.set_class_name(TABLE_SEARCH_CLASS);
        let anchor: &web_sys::Node = table;
        container
            .insert_before(&input, Some(anchor))
            .map_err(|_| "failed to insert table search".to_string())?;

        let search = input.clone();
        self.on(&input, "input", move |controller, _event| {
            controller.filter_table(index, &search.value());
        })
    }

    fn filter_table(&self, index: usize, term: &str) {
        let mut tables = self.tables.borrow_mut();
        let Some(binding) = tables.get_mut(index) else {
            return;
        };
        for (key, row) in binding.rows.iter().enumerate() {
            binding.model.set_row_text(key, text_of(row));
        }
        binding.model.filter(term);
        for state in binding.model.rows() {
            if let Some(row) = binding.rows.get(state.key) {
                set_style(row, "display", if state.visible { "" } else { "none" });
            }
        }
    }

    fn setup_alerts(self: &Rc<Self>) -> Result<(), String> {
        for alert in query_all(ALERT_SELECTOR) {
            let key = self.element_key(&alert, "alert");
            let lifecycle = AlertLifecycle::new(&self.config);
            let dismiss_after = lifecycle.dismiss_after_ms;
            self.alerts.borrow_mut().insert(key.clone(), lifecycle);

            let dismissed = alert.clone();
            let dismiss_key = key.clone();
            schedule(
                self,
                TaskKey::step(&key, "dismiss"),
                dismiss_after,
                move |controller| controller.dismiss_alert(&dismiss_key, &dismissed),
            );

            if needs_close_button(query_in(&alert, ALERT_CLOSE_SELECTOR).is_some()) {
                let button = document()?
                    .create_element("button")
                    .map_err(|_| "failed to create alert close button".to_string())?;
                button.set_class_name(ALERT_CLOSE_CLASS);
                button.set_text_content(Some(ALERT_CLOSE_LABEL));
                let closed = alert.clone();
                let close_key = key.clone();
                self.on(&button, "click", move |controller, _event| {
                    controller.dismiss_alert(&close_key, &closed);
                })?;
                alert
                    .append_child(&button)
                    .map_err(|_| "failed to append alert close button".to_string())?;
            }
        }
        Ok(())
    }

    fn dismiss_alert(self: &Rc<Self>, key: &str, alert: &Element) {
        let remove_after = {
            let mut alerts = self.alerts.borrow_mut();
            let Some(delay) = alerts.get_mut(key).and_then(AlertLifecycle::dismiss) else {
                return;
            };
            delay
        };
        cancel(self, &TaskKey::step(key, "dismiss"));
        for (property, value) in AlertLifecycle::exit_styles() {
            set_style(alert, property, value);
        }

        let removed = alert.clone();
        let owner = key.to_string();
        schedule(
            self,
            TaskKey::step(key, "remove"),
            remove_after,
            move |controller| {
                removed.remove();
                if let Some(mut lifecycle) = controller.alerts.borrow_mut().remove(&owner) {
                    lifecycle.finish();
                }
            },
        );
    }

    /// One-shot: an element is unobserved once it has faded in.
    fn setup_fade_in(&self) -> Result<(), String> {
        let callback: IntersectionHandler = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::wrap(
            Box::new(|entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let target = entry.target();
                        set_class(&target, FADE_IN_CLASS, true);
                        observer.unobserve(&target);
                    }
                }
            }),
        );
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(self.config.fade_in_threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|_| "IntersectionObserver is unavailable".to_string())?;
        for element in query_all(FADE_IN_SELECTOR) {
            observer.observe(&element);
        }
        *self.fade_in.borrow_mut() = Some(FadeInObserver {
            _observer: observer,
            _callback: callback,
        });
        Ok(())
    }

    fn setup_theme(self: &Rc<Self>) -> Result<(), String> {
        if let Some(toggle) = query(THEME_TOGGLE_SELECTOR) {
            self.on(&toggle, "click", |controller, _event| {
                controller.toggle_theme();
            })?;
        }

        match self.theme.apply_stored() {
            Ok(Some(theme)) => {
                body()?
                    .set_attribute(THEME_ATTRIBUTE, theme.as_str())
                    .map_err(|_| "failed to apply stored theme".to_string())?;
            }
            Ok(None) => {}
            Err(error) => tracing::warn!(error = %error, "stored theme could not be read"),
        }
        Ok(())
    }

    pub(super) fn toggle_theme(&self) {
        let Ok(body) = body() else {
            return;
        };
        let current = body.get_attribute(THEME_ATTRIBUTE);
        let theme = match self.theme.toggle(current.as_deref()) {
            Ok(theme) => theme,
            Err(error) => {
                tracing::warn!(error = %error, "theme preference was not saved");
                Theme::toggled_from(current.as_deref())
            }
        };
        let _ = body.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }

    pub(super) fn open_modal(&self, modal_id: &str) {
        let Some(modal) = element_by_id(modal_id) else {
            return;
        };
        set_class(&modal, MODAL_SHOW_CLASS, true);
        set_body_overflow(self.modals.borrow_mut().open(modal_id));
    }

    pub(super) fn close_modal(&self, modal_id: &str) {
        let Some(modal) = element_by_id(modal_id) else {
            return;
        };
        set_class(&modal, MODAL_SHOW_CLASS, false);
        set_body_overflow(self.modals.borrow_mut().close(modal_id));
    }

    /// Escape closes every open modal, including ones the server rendered
    /// already open.
    fn close_open_modals(&self) {
        let open = query_all(OPEN_MODAL_SELECTOR);
        let lock = {
            let mut modals = self.modals.borrow_mut();
            for modal in &open {
                modals.open(&self.element_key(modal, "modal"));
            }
            modals.close_all().1
        };
        for modal in &open {
            set_class(modal, MODAL_SHOW_CLASS, false);
        }
        set_body_overflow(lock);
    }

    pub(super) fn show_notification(
        self: &Rc<Self>,
        message: &str,
        kind: NotificationKind,
        duration_ms: Option<u32>,
    ) {
        let notification =
            self.notifications
                .borrow_mut()
                .create(message, kind, duration_ms, &self.config);
        let Ok(element) = document().and_then(|document| {
            document
                .create_element("div")
                .map_err(|_| "failed to create notification".to_string())
        }) else {
            return;
        };
        let element_id = notification.id.element_id();
        element.set_id(&element_id);
        element.set_class_name(&notification.class_name());
        element.set_text_content(Some(&notification.message));
        let appended = body().and_then(|body| {
            body.append_child(&element)
                .map_err(|_| "failed to append notification".to_string())
        });
        if appended.is_err() {
            return;
        }

        let timing = notification.schedule(&self.config);
        let shown = element.clone();
        schedule(self, TaskKey::step(&element_id, "show"), timing.show_at_ms, move |_| {
            set_class(&shown, NOTIFICATION_SHOW_CLASS, true);
        });
        let hidden = element.clone();
        schedule(self, TaskKey::step(&element_id, "hide"), timing.hide_at_ms, move |_| {
            set_class(&hidden, NOTIFICATION_SHOW_CLASS, false);
        });
        schedule(
            self,
            TaskKey::step(&element_id, "remove"),
            timing.remove_at_ms,
            move |_| element.remove(),
        );
    }

    /// Hooks for third-party widgets; they only log for now.
    fn setup_components(self: &Rc<Self>) -> Result<(), String> {
        for input in query_all(DATE_INPUT_SELECTOR) {
            let changed = input.clone();
            self.on(&input, "change", move |_controller, _event| {
                tracing::info!(value = %control_value(&changed), "date changed");
            })?;
        }

        for textarea in query_all(RICH_TEXT_SELECTOR) {
            tracing::info!(id = %textarea.id(), "initializing rich text editor");
        }

        for input in query_all(FILE_INPUT_SELECTOR) {
            let Ok(input) = input.dyn_into::<HtmlInputElement>() else {
                continue;
            };
            let picker = input.clone();
            self.on(&input, "change", move |_controller, _event| {
                if let Some(file) = picker.files().and_then(|files| files.get(0)) {
                    tracing::info!(name = %file.name(), "file selected");
                }
            })?;
        }
        Ok(())
    }
}

fn row_cells(row: &Element) -> Vec<String> {
    row.dyn_ref::<web_sys::HtmlTableRowElement>()
        .map(|row| {
            let cells = row.cells();
            (0..cells.length())
                .filter_map(|index| cells.item(index))
                .map(|cell| text_of(&cell).trim().to_string())
                .collect()
        })
        .unwrap_or_default()
}
