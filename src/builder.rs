//! Tree construction.
//!
//! This is the layer that turns markup-like calls into plain [`Element`]
//! values: [`el`] starts a tagged element, [`text`], [`fragment`] and
//! [`dynamic`] cover the remaining shapes, and [`IntoElement`] encodes the
//! child conversions — including the conditional-rendering skip set, where
//! `bool` and `Option::None` children become [`Element::Empty`].
//!
//! Components are plain functions returning an [`Element`] (or a
//! [`Computed<Element>`](nami::Computed) wrapped via [`dynamic`]); they are
//! invoked immediately at tree-construction time.

use core::fmt::Display;

use nami::signal::IntoComputed;

use crate::element::{
    Attr, Element, EventHandler, RefCallback, TagElement, Value, flatten_into,
};

/// Starts building a tagged element.
///
/// ```ignore
/// let view = el("button")
///     .class_name("primary")
///     .on("click", |_| tracing::info!("clicked"))
///     .child("Save");
/// ```
pub fn el(tag: impl Into<String>) -> ElementBuilder {
    ElementBuilder {
        tag: tag.into(),
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

/// Creates a text element from anything printable.
pub fn text(value: impl Display) -> Element {
    Element::Text(value.to_string())
}

/// Creates a flattened fragment from an ordered list of children.
pub fn fragment<I>(children: I) -> Element
where
    I: IntoIterator,
    I::Item: IntoElement,
{
    let mut flat = Vec::new();
    for child in children {
        flatten_into(child.into_element(), &mut flat);
    }
    Element::Fragment(flat)
}

/// Creates a reactive placeholder from any signal (or constant) yielding an
/// [`Element`].
pub fn dynamic(source: impl IntoComputed<Element>) -> Element {
    Element::Dynamic(source.into_computed())
}

/// Builder for a [`TagElement`].
#[derive(Debug)]
#[must_use]
pub struct ElementBuilder {
    tag: String,
    attrs: Vec<(String, Attr)>,
    children: Vec<Element>,
}

impl ElementBuilder {
    /// Adds a static attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.push((name.into(), Attr::Value(value.into())));
        self
    }

    /// Adds a reactive attribute, re-applied whenever the source changes.
    pub fn bind(mut self, name: impl Into<String>, source: impl IntoComputed<Value>) -> Self {
        self.attrs
            .push((name.into(), Attr::Reactive(source.into_computed())));
        self
    }

    /// Attaches a native event listener for `event` (e.g. `"click"`).
    pub fn on(mut self, event: &str, handler: impl Fn(web_sys::Event) + 'static) -> Self {
        self.attrs
            .push((format!("on{event}"), Attr::Handler(EventHandler::new(handler))));
        self
    }

    /// Registers a callback invoked once with the created DOM element.
    pub fn refer(mut self, callback: impl Fn(web_sys::Element) + 'static) -> Self {
        self.attrs
            .push(("ref".into(), Attr::Ref(RefCallback::new(callback))));
        self
    }

    /// Sets the list-identity key. Accepted for API compatibility; the
    /// engine does not diff, so the key is never read.
    pub fn key(self, value: impl Into<Value>) -> Self {
        self.attr("key", value)
    }

    /// Sets the `class` attribute.
    pub fn class_name(self, value: impl Into<Value>) -> Self {
        self.attr("className", value)
    }

    /// Adds inline style declarations, shallow-merged at apply time.
    pub fn style<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        self.attrs
            .push(("style".into(), Attr::Value(Value::Style(pairs))));
        self
    }

    /// Appends a child, flattening fragments and dropping skipped entries.
    pub fn child(mut self, child: impl IntoElement) -> Self {
        flatten_into(child.into_element(), &mut self.children);
        self
    }

    /// Appends several children in order.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoElement,
    {
        for child in children {
            flatten_into(child.into_element(), &mut self.children);
        }
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> Element {
        Element::Tag(TagElement {
            tag: self.tag,
            attrs: self.attrs,
            children: self.children,
        })
    }
}

/// Conversion into an [`Element`], used by child positions.
pub trait IntoElement {
    /// Performs the conversion.
    fn into_element(self) -> Element;
}

impl IntoElement for Element {
    fn into_element(self) -> Element {
        self
    }
}

impl IntoElement for ElementBuilder {
    fn into_element(self) -> Element {
        self.build()
    }
}

impl IntoElement for &str {
    fn into_element(self) -> Element {
        Element::Text(self.into())
    }
}

impl IntoElement for String {
    fn into_element(self) -> Element {
        Element::Text(self)
    }
}

/// Booleans render nothing, so `condition.then(|| ..)`-style expressions can
/// sit directly in child lists. `0` and `""` stay legitimate text content.
impl IntoElement for bool {
    fn into_element(self) -> Element {
        Element::Empty
    }
}

macro_rules! impl_text_element {
    ($($ty:ty),*) => {
        $(impl IntoElement for $ty {
            fn into_element(self) -> Element {
                text(self)
            }
        })*
    };
}

impl_text_element!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl<T: IntoElement> IntoElement for Option<T> {
    fn into_element(self) -> Element {
        self.map_or(Element::Empty, IntoElement::into_element)
    }
}

impl<T: IntoElement> IntoElement for Vec<T> {
    fn into_element(self) -> Element {
        fragment(self)
    }
}

impl<T: IntoElement, const N: usize> IntoElement for [T; N] {
    fn into_element(self) -> Element {
        fragment(self)
    }
}

impl IntoElement for nami::Computed<Element> {
    fn into_element(self) -> Element {
        Element::Dynamic(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_are_flattened_at_construction() {
        let built = el("div")
            .child("a")
            .child(vec![text("b"), fragment([text("c")])])
            .build();

        let Element::Tag(tag) = built else {
            panic!("expected tag");
        };
        assert_eq!(tag.children.len(), 3);
        assert!(
            tag.children
                .iter()
                .all(|child| matches!(child, Element::Text(_)))
        );
    }

    #[test]
    fn skip_set_becomes_empty() {
        assert!(true.into_element().is_empty());
        assert!(false.into_element().is_empty());
        assert!(None::<&str>.into_element().is_empty());

        let fragment = fragment([
            "a".into_element(),
            true.into_element(),
            0.into_element(),
            "".into_element(),
        ]);
        let Element::Fragment(children) = fragment else {
            panic!("expected fragment");
        };
        // `true` dropped, `0` and `""` kept.
        assert_eq!(children.len(), 3);
    }

    #[test]
    fn attribute_order_is_preserved() {
        let built = el("input")
            .attr("type", "text")
            .class_name("field")
            .key(1)
            .build();

        let Element::Tag(tag) = built else {
            panic!("expected tag");
        };
        let names: Vec<_> = tag.attrs.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["type", "className", "key"]);
    }

    #[test]
    fn on_prefixes_the_event_name() {
        let built = el("button").on("click", |_| {}).build();
        let Element::Tag(tag) = built else {
            panic!("expected tag");
        };
        assert_eq!(tag.attrs[0].0, "onclick");
        assert!(matches!(tag.attrs[0].1, Attr::Handler(_)));
    }
}
