#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Fine-grained reactive DOM rendering for `wasm32` targets.
//!
//! `rivulet` turns immutable [`Element`] trees into live DOM nodes and keeps
//! them synchronized with [`nami`] signals — no virtual DOM, no diffing.
//! Dynamic sub-trees and reactive attribute values subscribe directly to
//! their signals; when a signal changes, the owning region is torn down in
//! full and rebuilt in place, anchored by a stable marker node.
//!
//! ```ignore
//! use nami::{SignalExt, binding};
//! use rivulet::{App, dynamic, el};
//!
//! let count = binding(0);
//! let view = el("button")
//!     .on("click", {
//!         let count = count.clone();
//!         move |_| count.set(count.get() + 1)
//!     })
//!     .child(dynamic(count.map(|n| rivulet::text(n))));
//!
//! App::new()?.mount(view)?.forget();
//! # Ok::<(), rivulet::RenderError>(())
//! ```
//!
//! Teardown is ownership-shaped: every DOM mutation registers its inverse
//! against the [`Scope`] that owns it, and releasing a mount (or any dynamic
//! region) runs those inverses exactly once, innermost first.

mod app;
mod builder;
mod dom;
mod element;
mod error;
mod props;
mod render;
mod scope;

pub use app::{App, AppBuilder, MountHandle, mount};
pub use builder::{ElementBuilder, IntoElement, dynamic, el, fragment, text};
pub use dom::DomRoot;
pub use element::{Attr, Element, EventHandler, RefCallback, TagElement, Value};
pub use error::RenderError;
pub use render::Renderer;
pub use scope::Scope;
