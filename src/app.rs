//! Mount entry points.

use tracing::debug;
use web_sys::Node;

use crate::builder::IntoElement;
use crate::dom::DomRoot;
use crate::error::RenderError;
use crate::render::Renderer;
use crate::scope::Scope;

/// Renders `element` into `container` and returns a handle owning
/// everything that was inserted.
///
/// The handle releases the tree (DOM nodes, listeners, subscriptions) on
/// [`MountHandle::release`] or on drop; [`MountHandle::forget`] keeps the
/// tree mounted for the lifetime of the page.
///
/// # Errors
///
/// Fails on malformed trees or DOM exceptions. No partial DOM from the
/// failed mount is left attached.
pub fn mount(element: impl IntoElement, container: &Node) -> Result<MountHandle, RenderError> {
    let document = container
        .owner_document()
        .ok_or(RenderError::DomUnavailable)?;
    let renderer = Renderer::new(document);
    let scope = Scope::new();
    let element = element.into_element();

    if let Err(error) = renderer.render(&scope, &element, container, None) {
        scope.release();
        return Err(error);
    }
    debug!("mounted element tree");
    Ok(MountHandle { scope })
}

/// Owns a mounted tree; releasing it tears the tree down.
#[derive(Debug)]
pub struct MountHandle {
    scope: Scope,
}

impl MountHandle {
    /// Releases everything the mount inserted. Idempotent; teardown has
    /// completed when this returns.
    pub fn release(&self) {
        if !self.scope.is_released() {
            debug!("releasing mounted tree");
        }
        self.scope.release();
    }

    /// Keeps the tree mounted forever, dropping the handle without teardown.
    pub fn forget(self) {
        core::mem::forget(self);
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.scope.release();
    }
}

/// Builder for [`App`].
#[derive(Debug, Clone)]
pub struct AppBuilder {
    root_id: Option<String>,
    panic_hook: bool,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root_id: None,
            panic_hook: true,
        }
    }

    /// Sets the DOM element identifier that should host the application.
    #[must_use]
    pub fn with_root_id(mut self, id: impl Into<String>) -> Self {
        self.root_id = Some(id.into());
        self
    }

    /// Controls whether panics are routed to the browser console.
    #[must_use]
    pub const fn panic_hook(mut self, install: bool) -> Self {
        self.panic_hook = install;
        self
    }

    /// Finalises the builder and creates an [`App`].
    ///
    /// # Errors
    ///
    /// Returns an error if the DOM root element cannot be found or created.
    pub fn build(self) -> Result<App, RenderError> {
        if self.panic_hook {
            console_error_panic_hook::set_once();
        }
        let root = DomRoot::new(self.root_id.as_deref())?;
        Ok(App { root })
    }
}

/// Entry point for running a rivulet tree inside the browser.
#[derive(Debug)]
pub struct App {
    root: DomRoot,
}

impl App {
    /// Creates an [`App`] using the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the DOM root element cannot be found or created.
    pub fn new() -> Result<Self, RenderError> {
        AppBuilder::new().build()
    }

    /// Returns a builder for advanced configuration.
    #[must_use]
    pub const fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Mounts `element` into the app's root container.
    ///
    /// # Errors
    ///
    /// Fails on malformed trees or DOM exceptions.
    pub fn mount(&self, element: impl IntoElement) -> Result<MountHandle, RenderError> {
        mount(element, self.root.element())
    }

    /// Returns the root container.
    #[must_use]
    pub const fn root(&self) -> &DomRoot {
        &self.root
    }
}
