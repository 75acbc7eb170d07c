use super::*;

/// Boots immediately when the document has been parsed, otherwise on
/// `DOMContentLoaded`.
pub(super) fn start_when_ready() -> Result<(), String> {
    let document = document()?;
    if document.ready_state() != "loading" {
        return boot();
    }
    BOOT_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return Ok(());
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            if let Err(error) = boot() {
                tracing::error!(error = %error, "admin shell failed to start");
            }
        }));
        document
            .add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())
            .map_err(|_| "failed to attach DOMContentLoaded listener".to_string())?;
        *slot.borrow_mut() = Some(callback);
        Ok(())
    })
}

fn boot() -> Result<(), String> {
    if current_controller().is_some() {
        return Ok(());
    }
    let raw_config = read_config_override();
    let (config, config_error) = resolve_config(raw_config.as_deref());
    logging::init_console_logging(&config.log_filter);
    if let Some(error) = &config_error {
        tracing::warn!(error = %error, "ignoring invalid {CONFIG_GLOBAL}");
    }

    let controller = AdminController::attach(config, config_error.map(|error| error.to_string()));
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&controller)));

    if element_by_id(MESSAGES_GRID_ID).is_some() {
        let page = ReviewPage::attach(&controller)?;
        REVIEW_PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    }
    tracing::debug!("admin shell attached");
    Ok(())
}

/// `window.__LIEAS_ADMIN_CONFIG__` as JSON text; accepts a string or a
/// plain object.
fn read_config_override() -> Option<String> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    value
        .as_string()
        .or_else(|| js_sys::JSON::stringify(&value).ok()?.as_string())
}

pub(super) fn current_controller() -> Option<Rc<AdminController>> {
    CONTROLLER.with(|slot| slot.borrow().clone())
}

pub(super) fn current_review_page() -> Option<Rc<ReviewPage>> {
    REVIEW_PAGE.with(|slot| slot.borrow().clone())
}

pub(super) fn snapshot() -> AdminSnapshot {
    let Some(controller) = current_controller() else {
        return AdminSnapshot::default();
    };
    let layout = *controller.layout.borrow();
    let tables = controller.tables.borrow();
    AdminSnapshot {
        booted: true,
        config_error: controller.config_error.clone(),
        active_nav_links: controller.nav.borrow().active_indices(),
        sidebar_collapsed: layout.collapsed,
        mobile_layout: layout.mobile,
        open_modals: controller.modals.borrow().open_count(),
        field_errors: controller.form_errors.borrow().error_count(),
        tables: tables.len(),
        selected_rows: tables
            .iter()
            .map(|binding| binding.model.selected_count())
            .sum(),
        pending_timers: controller.timers.borrow().pending(),
        review: current_review_page().map(|page| page.snapshot()),
    }
}
