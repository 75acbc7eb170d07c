use super::*;

pub(super) fn document() -> Result<Document, String> {
    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    window
        .document()
        .ok_or_else(|| "document is unavailable".to_string())
}

pub(super) fn body() -> Result<HtmlElement, String> {
    document()?
        .body()
        .ok_or_else(|| "document body is unavailable".to_string())
}

pub(super) fn element_by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub(super) fn query(selector: &str) -> Option<Element> {
    document().ok()?.query_selector(selector).ok().flatten()
}

pub(super) fn query_all(selector: &str) -> Vec<Element> {
    document()
        .ok()
        .and_then(|document| document.query_selector_all(selector).ok())
        .map(node_list_elements)
        .unwrap_or_default()
}

pub(super) fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub(super) fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(node_list_elements)
        .unwrap_or_default()
}

fn node_list_elements(list: web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(super) fn text_of(element: &Element) -> String {
    element.text_content().unwrap_or_default()
}

/// Trimmed text of the first match below `root`, or empty.
pub(super) fn text_at(root: &Element, selector: &str) -> String {
    query_in(root, selector)
        .map(|element| text_of(&element).trim().to_string())
        .unwrap_or_default()
}

pub(super) fn set_text_by_id(id: &str, text: &str) {
    if let Some(element) = element_by_id(id) {
        element.set_text_content(Some(text));
    }
}

pub(super) fn set_class(element: &Element, class: &str, enabled: bool) {
    let classes = element.class_list();
    let _ = if enabled {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

pub(super) fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub(super) fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

/// Generic `value` of an input, textarea or select.
pub(super) fn control_value(element: &Element) -> String {
    js_sys::Reflect::get(element, &JsValue::from_str("value"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}

pub(super) fn control_type(element: &Element) -> String {
    js_sys::Reflect::get(element, &JsValue::from_str("type"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}

pub(super) fn current_pathname() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub(super) fn viewport_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

pub(super) fn set_body_overflow(lock: ScrollLock) {
    if let (Some(value), Ok(body)) = (lock.overflow_value(), body()) {
        let _ = body.style().set_property("overflow", value);
    }
}

pub(super) fn blocking_alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub(super) fn event_target_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Attaches `handler` to `target` on behalf of `owner`.
///
/// The closure holds only a weak reference, so a dropped owner turns the
/// listener into a no-op instead of keeping the owner alive.
pub(super) fn bind<T: 'static>(
    owner: &Rc<T>,
    listeners: &Listeners,
    target: &EventTarget,
    event: &str,
    handler: impl Fn(&Rc<T>, web_sys::Event) + 'static,
) -> Result<(), String> {
    let weak = Rc::downgrade(owner);
    let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
        if let Some(owner) = weak.upgrade() {
            handler(&owner, event);
        }
    }));
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|_| format!("failed to attach {event} listener"))?;
    listeners.keep(callback);
    Ok(())
}
