use web_sys::{Document, Element, Window};

use crate::error::RenderError;

/// The DOM node hosting a mounted tree.
#[derive(Debug, Clone)]
pub struct DomRoot {
    document: Document,
    element: Element,
}

impl DomRoot {
    /// Creates a [`DomRoot`] pointing at the provided element id, or at a
    /// freshly created host `div` appended to `<body>` when no id is given.
    ///
    /// # Errors
    ///
    /// Fails when the DOM is unavailable or the id cannot be found.
    pub fn new(root_id: Option<&str>) -> Result<Self, RenderError> {
        let window: Window = web_sys::window().ok_or(RenderError::DomUnavailable)?;
        let document: Document = window.document().ok_or(RenderError::DomUnavailable)?;

        let element = if let Some(id) = root_id {
            document
                .get_element_by_id(id)
                .ok_or_else(|| RenderError::RootNotFound(id.to_string()))?
        } else {
            let body = document.body().ok_or(RenderError::DomUnavailable)?;
            let host = document.create_element("div")?;
            host.set_id("rivulet-root");
            body.append_child(&host)?;
            host
        };

        Ok(Self { document, element })
    }

    /// Returns the DOM element representing the mounting point.
    #[must_use]
    pub const fn element(&self) -> &Element {
        &self.element
    }

    /// Returns the owning document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Clears the mounting element.
    ///
    /// # Errors
    ///
    /// Fails when the underlying DOM removal throws.
    pub fn clear(&self) -> Result<(), RenderError> {
        while let Some(child) = self.element.first_child() {
            self.element.remove_child(&child)?;
        }
        Ok(())
    }
}
