//! The element tree model.
//!
//! An [`Element`] is an immutable description of what to render: plain text,
//! a tagged DOM element with attributes and children, an ordered fragment, a
//! reactive placeholder, or nothing at all. Values are produced fresh by the
//! builder layer on every reactive re-evaluation and discarded once their
//! DOM has been materialized — the live DOM is the only long-lived artifact.

use core::fmt;
use std::rc::Rc;

use nami::{Computed, impl_constant};

/// A declarative description of a piece of UI.
#[derive(Debug, Clone)]
pub enum Element {
    /// Renders nothing.
    Empty,
    /// Renders a single DOM text node.
    Text(String),
    /// Renders a DOM element with attributes and children.
    Tag(TagElement),
    /// An ordered sequence of elements rendered at the same position.
    ///
    /// Fragments are flattened at construction: nested fragments collapse
    /// into one flat list and [`Element::Empty`] entries are dropped.
    Fragment(Vec<Element>),
    /// A reactive placeholder: reading the handle yields the current
    /// element, and every invalidation rebuilds the owned DOM region.
    Dynamic(Computed<Element>),
}

impl_constant!(Element);

impl Element {
    /// Returns `true` if this element renders nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::Empty
    }
}

/// A tagged DOM element: tag name, ordered attributes, flattened children.
#[derive(Debug, Clone)]
pub struct TagElement {
    /// The tag name passed to `Document::createElement`.
    pub tag: String,
    /// Attribute entries in application order.
    pub attrs: Vec<(String, Attr)>,
    /// Child elements, already flattened.
    pub children: Vec<Element>,
}

/// A single attribute entry of a [`TagElement`].
///
/// Event handlers and refs are their own variants rather than function-shaped
/// values, so they can never be mistaken for reactive bindings.
#[derive(Debug, Clone)]
pub enum Attr {
    /// A static value, applied once.
    Value(Value),
    /// A reactive value, re-applied on every invalidation.
    Reactive(Computed<Value>),
    /// An event listener; only legal under an `on`-prefixed name.
    Handler(EventHandler),
    /// An element-creation callback; only legal under the `ref` name.
    Ref(RefCallback),
}

/// A static attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Neither sets nor clears anything.
    Null,
    /// Toggles a valueless attribute (or a boolean DOM property).
    Bool(bool),
    /// A numeric value, stringified without a trailing `.0`.
    Number(f64),
    /// A plain string value.
    Text(String),
    /// Inline style declarations as CSS property/value pairs, shallow-merged
    /// into the element's existing style.
    Style(Vec<(String, String)>),
}

impl_constant!(Value);

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Style(pairs) => {
                for (name, value) in pairs {
                    write!(f, "{name}: {value}; ")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_number_value {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            #[allow(clippy::cast_lossless, clippy::cast_precision_loss)]
            fn from(value: $ty) -> Self {
                Self::Number(value as f64)
            }
        })*
    };
}

impl_number_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A shared event-listener callback.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(web_sys::Event)>);

impl EventHandler {
    /// Wraps a closure as a shareable event handler.
    pub fn new(handler: impl Fn(web_sys::Event) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    /// Invokes the handler with the fired event.
    pub fn call(&self, event: web_sys::Event) {
        (self.0)(event);
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHandler")
    }
}

/// A shared callback invoked once with the freshly created DOM element.
#[derive(Clone)]
pub struct RefCallback(Rc<dyn Fn(web_sys::Element)>);

impl RefCallback {
    /// Wraps a closure as a shareable ref callback.
    pub fn new(callback: impl Fn(web_sys::Element) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    /// Invokes the callback with the created element.
    pub fn call(&self, element: web_sys::Element) {
        (self.0)(element);
    }
}

impl fmt::Debug for RefCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefCallback")
    }
}

/// Appends `element` to `out`, inlining nested fragments and dropping
/// [`Element::Empty`] entries.
pub(crate) fn flatten_into(element: Element, out: &mut Vec<Element>) {
    match element {
        Element::Empty => {}
        Element::Fragment(children) => {
            for child in children {
                flatten_into(child, out);
            }
        }
        other => out.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Element {
        Element::Text(value.into())
    }

    #[test]
    fn flatten_inlines_nested_fragments() {
        let nested = Element::Fragment(vec![
            text("a"),
            Element::Fragment(vec![text("b"), Element::Fragment(vec![text("c")])]),
            text("d"),
        ]);

        let mut out = Vec::new();
        flatten_into(nested, &mut out);

        let texts: Vec<_> = out
            .iter()
            .map(|element| match element {
                Element::Text(value) => value.as_str(),
                _ => panic!("expected text"),
            })
            .collect();
        assert_eq!(texts, ["a", "b", "c", "d"]);
    }

    #[test]
    fn flatten_drops_empty_entries() {
        let fragment = Element::Fragment(vec![
            Element::Empty,
            text("kept"),
            Element::Fragment(vec![Element::Empty]),
        ]);

        let mut out = Vec::new();
        flatten_into(fragment, &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn numbers_stringify_without_trailing_zero() {
        assert_eq!(Value::from(3).to_string(), "3");
        assert_eq!(Value::from(3.0f64).to_string(), "3");
        assert_eq!(Value::from(3.5f64).to_string(), "3.5");
    }

    #[test]
    fn style_values_render_as_css_text() {
        let style = Value::Style(vec![("color".into(), "red".into())]);
        assert_eq!(style.to_string(), "color: red; ");
    }

    #[test]
    fn option_none_is_null() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }
}
