//! The rendering engine.
//!
//! [`Renderer::render`] walks an [`Element`] value and inserts its DOM
//! representation into a container immediately before an optional insertion
//! point, registering teardown against the owning [`Scope`] as it goes.
//! Dynamic placeholders get a stable comment anchor and a region scope of
//! their own: every invalidation releases the previous region in full, then
//! rebuilds the new value before the same anchor. Nothing is ever diffed or
//! patched in place.

use core::cell::RefCell;
use std::rc::Rc;

use nami::{Computed, Signal};
use tracing::{error, trace};
use web_sys::{Document, Node};

use crate::element::{Element, TagElement};
use crate::error::RenderError;
use crate::props;
use crate::scope::Scope;

/// Renders [`Element`] trees into a document.
#[derive(Debug, Clone)]
pub struct Renderer {
    document: Document,
}

impl Renderer {
    /// Creates a renderer materializing nodes through `document`.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    /// Creates a renderer for the global window's document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DomUnavailable`] outside of a browser.
    pub fn from_window() -> Result<Self, RenderError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or(RenderError::DomUnavailable)
    }

    /// Inserts the DOM representation of `element` into `parent`, immediately
    /// before `before` (or appended at the end when `None`), and registers
    /// teardown such that releasing `scope` removes exactly what was
    /// inserted.
    ///
    /// # Errors
    ///
    /// Fails on malformed trees (invalid tag names, misplaced handler/ref
    /// attributes) or when the underlying DOM calls throw. The caller is
    /// expected to release `scope` on failure; nothing registered up to the
    /// failure point is lost.
    pub fn render(
        &self,
        scope: &Scope,
        element: &Element,
        parent: &Node,
        before: Option<&Node>,
    ) -> Result<(), RenderError> {
        match element {
            Element::Empty => Ok(()),
            Element::Text(value) => self.render_text(scope, value, parent, before),
            Element::Fragment(children) => {
                // Each child targets the same insertion point, so source
                // order maps to left-to-right DOM order.
                for child in children {
                    self.render(scope, child, parent, before)?;
                }
                Ok(())
            }
            Element::Tag(tag) => self.render_tag(scope, tag, parent, before),
            Element::Dynamic(source) => self.render_dynamic(scope, source, parent, before),
        }
    }

    fn render_text(
        &self,
        scope: &Scope,
        value: &str,
        parent: &Node,
        before: Option<&Node>,
    ) -> Result<(), RenderError> {
        let node: Node = self.document.create_text_node(value).into();
        insert(parent, &node, before)?;
        scope.register(move || detach(&node));
        Ok(())
    }

    fn render_tag(
        &self,
        scope: &Scope,
        tag: &TagElement,
        parent: &Node,
        before: Option<&Node>,
    ) -> Result<(), RenderError> {
        let element = self.document.create_element(&tag.tag)?;

        // Attribute application completes before children render.
        for (name, attr) in &tag.attrs {
            props::apply(scope, &element, name, attr)?;
        }

        let node: Node = element.into();
        insert(parent, &node, before)?;
        {
            let node = node.clone();
            scope.register(move || detach(&node));
        }

        for child in &tag.children {
            self.render(scope, child, &node, None)?;
        }
        Ok(())
    }

    /// Materializes a dynamic placeholder: a stable anchor plus a region
    /// scope that is torn down and rebuilt on every invalidation.
    fn render_dynamic(
        &self,
        scope: &Scope,
        source: &Computed<Element>,
        parent: &Node,
        before: Option<&Node>,
    ) -> Result<(), RenderError> {
        let anchor: Node = self.document.create_comment("rivulet-anchor").into();
        insert(parent, &anchor, before)?;
        {
            let anchor = anchor.clone();
            scope.register(move || detach(&anchor));
        }

        // The slot holds the scope owning the region's current DOM. The
        // watch guard and the slot drain are both registered against the
        // outer scope, after the anchor removal, so release order is:
        // region DOM, subscription, anchor.
        let slot: Rc<RefCell<Option<Scope>>> = Rc::default();

        let region = Scope::new();
        if let Err(error) = self.render(&region, &source.get(), parent, Some(&anchor)) {
            region.release();
            return Err(error);
        }
        *slot.borrow_mut() = Some(region);

        let guard = source.watch({
            let renderer = self.clone();
            let slot = Rc::clone(&slot);
            let anchor = anchor.clone();
            move |context| {
                let element = context.into_value();
                if let Some(previous) = slot.borrow_mut().take() {
                    previous.release();
                }
                let Some(parent) = anchor.parent_node() else {
                    // The region was released while this update was in
                    // flight; there is nowhere to render into.
                    return;
                };
                trace!("rebuilding dynamic region");
                let region = Scope::new();
                match renderer.render(&region, &element, &parent, Some(&anchor)) {
                    Ok(()) => *slot.borrow_mut() = Some(region),
                    Err(err) => {
                        // The anchor stays; the next successful rebuild
                        // recovers the region.
                        region.release();
                        error!("dynamic region rebuild failed: {err}");
                    }
                }
            }
        });
        scope.hold(guard);
        scope.register(move || {
            if let Some(region) = slot.borrow_mut().take() {
                region.release();
            }
        });
        Ok(())
    }
}

/// Inserts `node` into `parent` immediately before `before`, or appends it
/// at the current end of `parent` when no insertion point is given.
fn insert(parent: &Node, node: &Node, before: Option<&Node>) -> Result<(), RenderError> {
    match before {
        Some(before) => parent.insert_before(node, Some(before))?,
        None => parent.append_child(node)?,
    };
    Ok(())
}

/// Removes `node` from its parent. Tolerates nodes already detached by an
/// ancestor's removal.
fn detach(node: &Node) {
    if let Some(parent) = node.parent_node() {
        let _ = parent.remove_child(node);
    }
}
