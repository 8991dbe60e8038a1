//! Applies attribute entries to materialized DOM elements.

use js_sys::Reflect;
use nami::Signal;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::HtmlElement;

use crate::element::{Attr, EventHandler, Value};
use crate::error::RenderError;
use crate::scope::Scope;

const EVENT_PREFIX: &str = "on";

/// Reserved names carried by the attribute map but never applied.
fn is_reserved(name: &str) -> bool {
    name == "children" || name == "key"
}

/// Applies one attribute entry to `element`, registering teardown for
/// listeners and reactive bindings against `scope`.
pub(crate) fn apply(
    scope: &Scope,
    element: &web_sys::Element,
    name: &str,
    attr: &Attr,
) -> Result<(), RenderError> {
    if is_reserved(name) {
        return Ok(());
    }

    match attr {
        Attr::Ref(callback) if name == "ref" => {
            callback.call(element.clone());
            Ok(())
        }
        Attr::Handler(handler) => {
            let event = name
                .strip_prefix(EVENT_PREFIX)
                .filter(|event| !event.is_empty())
                .ok_or_else(|| RenderError::InvalidAttribute(name.into()))?;
            attach_listener(scope, element, &event.to_ascii_lowercase(), handler.clone());
            Ok(())
        }
        Attr::Ref(_) => Err(RenderError::InvalidAttribute(name.into())),
        Attr::Reactive(source) => {
            set_value(element, name, &source.get())?;
            let guard = source.watch({
                let element = element.clone();
                let name = name.to_string();
                move |context| {
                    if let Err(error) = set_value(&element, &name, &context.into_value()) {
                        warn!("failed to re-apply attribute `{name}`: {error}");
                    }
                }
            });
            scope.hold(guard);
            Ok(())
        }
        Attr::Value(value) => set_value(element, name, value),
    }
}

/// Attaches a native listener and registers its removal.
fn attach_listener(scope: &Scope, element: &web_sys::Element, event: &str, handler: EventHandler) {
    let closure = Closure::<dyn Fn(web_sys::Event)>::wrap(Box::new(move |event: web_sys::Event| {
        handler.call(event);
    }));

    // Attach cannot fail for a plain callback listener; teardown removes the
    // listener and drops the closure with it.
    let _ = element.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    scope.register({
        let element = element.clone();
        let event = event.to_string();
        move || {
            let _ =
                element.remove_event_listener_with_callback(&event, closure.as_ref().unchecked_ref());
        }
    });
}

/// Sets a static value on `element`, preferring DOM properties over
/// attribute text.
pub(crate) fn set_value(
    element: &web_sys::Element,
    name: &str,
    value: &Value,
) -> Result<(), RenderError> {
    if matches!(value, Value::Null) {
        return Ok(());
    }

    if name == "className" {
        element.set_class_name(&value.to_string());
        return Ok(());
    }

    if name == "style" {
        if let Value::Style(pairs) = value {
            return merge_style(element, pairs);
        }
    }

    // Assign through the DOM property when the element exposes one; a failed
    // assignment (getter-only property) falls back to attribute form.
    let key = JsValue::from_str(name);
    if Reflect::has(element.as_ref(), &key).unwrap_or(false)
        && matches!(Reflect::set(element.as_ref(), &key, &to_js(value)), Ok(true))
    {
        return Ok(());
    }

    match value {
        Value::Bool(true) => element.set_attribute(name, "")?,
        Value::Bool(false) => element.remove_attribute(name)?,
        other => element.set_attribute(name, &other.to_string())?,
    }
    Ok(())
}

/// Shallow-merges style declarations into the element's inline style.
/// Properties not named in `pairs` are left untouched.
fn merge_style(element: &web_sys::Element, pairs: &[(String, String)]) -> Result<(), RenderError> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let style = html.style();
        for (property, value) in pairs {
            style.set_property(property, value)?;
        }
        return Ok(());
    }
    // Non-HTML elements carry no CSSOM handle here; fall back to the
    // serialized declaration list.
    element.set_attribute("style", &Value::Style(pairs.to_vec()).to_string())?;
    Ok(())
}

fn to_js(value: &Value) -> JsValue {
    match value {
        Value::Null => JsValue::NULL,
        Value::Bool(value) => JsValue::from_bool(*value),
        Value::Number(value) => JsValue::from_f64(*value),
        Value::Text(value) => JsValue::from_str(value),
        Value::Style(_) => JsValue::from_str(&value.to_string()),
    }
}
