//! Toolbar widget: a registry of tools with single-selection activation.
//!
//! [`Toolbar`] owns the tool list and the active id; everything visual goes
//! through the [`ToolbarView`] seam. [`DomToolbarView`] renders buttons,
//! separators and labeled groups into a container element and routes clicks
//! back to [`Toolbar::activate_tool`].

#[cfg(test)]
#[path = "toolbar_test.rs"]
mod toolbar_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::config::ToolbarOptions;
use crate::dom;

/// Toolbar registration and activation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolbarError {
    #[error("tool must have an id")]
    MissingId,

    #[error("tool with id \"{0}\" already exists")]
    DuplicateTool(String),

    #[error("tool with id \"{0}\" not found")]
    ToolNotFound(String),

    #[error("container with id \"{0}\" not found")]
    ContainerNotFound(String),

    #[error("toolbar dom operation failed: {0}")]
    Dom(String),
}

impl ToolbarError {
    fn js(err: &JsValue) -> Self {
        Self::Dom(format!("{err:?}"))
    }
}

// =============================================================
// Tools
// =============================================================

/// Button icon: an image when the source looks like a URL or path,
/// otherwise a list of CSS classes for an `<i>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    Image(String),
    CssClass(String),
}

impl Icon {
    #[must_use]
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http") || source.starts_with("./") || source.starts_with('/') {
            Self::Image(source.to_owned())
        } else {
            Self::CssClass(source.to_owned())
        }
    }
}

/// Callback run when a tool is activated.
pub type ToolAction = Rc<dyn Fn(&ToolDescriptor)>;

/// One toolbar entry.
#[derive(Clone, Default)]
pub struct ToolDescriptor {
    pub id: String,
    pub icon: Option<Icon>,
    pub tooltip: Option<String>,
    pub action: Option<ToolAction>,
    /// Toggle tools stay highlighted until clicked again or replaced.
    pub toggle: bool,
}

impl ToolDescriptor {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    #[must_use]
    pub fn icon(mut self, source: &str) -> Self {
        self.icon = Some(Icon::parse(source));
        self
    }

    #[must_use]
    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    #[must_use]
    pub fn action(mut self, f: impl Fn(&ToolDescriptor) + 'static) -> Self {
        self.action = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn toggle(mut self, toggle: bool) -> Self {
        self.toggle = toggle;
        self
    }

    /// Invoke the action, if any, with this descriptor.
    pub fn run(&self) {
        if let Some(action) = &self.action {
            action(self);
        }
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("id", &self.id)
            .field("icon", &self.icon)
            .field("tooltip", &self.tooltip)
            .field("toggle", &self.toggle)
            .finish_non_exhaustive()
    }
}

// =============================================================
// View seam
// =============================================================

/// Visual side of a toolbar.
pub trait ToolbarView {
    /// Add a button for `tool` at the current insertion point.
    ///
    /// # Errors
    ///
    /// Returns [`ToolbarError::Dom`] if the button cannot be created.
    fn append_button(&mut self, tool: &ToolDescriptor) -> Result<(), ToolbarError>;

    /// # Errors
    ///
    /// Returns [`ToolbarError::Dom`] if the separator cannot be created.
    fn append_separator(&mut self) -> Result<(), ToolbarError>;

    /// Open a labeled group and redirect insertion into it.
    ///
    /// # Errors
    ///
    /// Returns [`ToolbarError::Dom`] if the group cannot be created.
    fn begin_group(&mut self, label: Option<&str>) -> Result<(), ToolbarError>;

    /// Restore the insertion point saved by [`ToolbarView::begin_group`].
    fn end_group(&mut self);

    /// Show or clear the highlighted state of a tool's button.
    fn set_active(&mut self, id: &str, active: bool);

    /// Remove every button, separator and group.
    fn clear(&mut self);

    /// Remove the toolbar itself.
    fn remove(&mut self);
}

// =============================================================
// Toolbar
// =============================================================

pub struct Toolbar<V> {
    view: V,
    options: ToolbarOptions,
    tools: Vec<ToolDescriptor>,
    active: Option<String>,
}

impl<V: ToolbarView> Toolbar<V> {
    #[must_use]
    pub fn new(view: V, options: ToolbarOptions) -> Self {
        Self { view, options, tools: Vec::new(), active: None }
    }

    /// Register a tool and add its button.
    ///
    /// # Errors
    ///
    /// [`ToolbarError::MissingId`] for an empty id and
    /// [`ToolbarError::DuplicateTool`] for a registered one; neither changes
    /// the toolbar.
    pub fn add_tool(&mut self, tool: ToolDescriptor) -> Result<&mut Self, ToolbarError> {
        if tool.id.is_empty() {
            return Err(ToolbarError::MissingId);
        }
        if self.tools.iter().any(|t| t.id == tool.id) {
            return Err(ToolbarError::DuplicateTool(tool.id));
        }
        self.view.append_button(&tool)?;
        self.tools.push(tool);
        Ok(self)
    }

    /// Add `tools` inside a labeled group.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Toolbar::add_tool`]; tools before it
    /// stay registered and later insertions go back to the top level.
    pub fn add_tool_group(&mut self, label: Option<&str>, tools: Vec<ToolDescriptor>) -> Result<&mut Self, ToolbarError> {
        self.view.begin_group(label)?;
        let result = tools.into_iter().try_for_each(|tool| self.add_tool(tool).map(|_| ()));
        self.view.end_group();
        result.map(|()| self)
    }

    /// # Errors
    ///
    /// Returns [`ToolbarError::Dom`] if the separator cannot be created.
    pub fn add_separator(&mut self) -> Result<&mut Self, ToolbarError> {
        self.view.append_separator()?;
        Ok(self)
    }

    /// Activate a tool and run its action.
    ///
    /// # Errors
    ///
    /// Returns [`ToolbarError::ToolNotFound`] for an unknown id.
    pub fn activate_tool(&mut self, id: &str) -> Result<(), ToolbarError> {
        if let Some(tool) = self.select(id)? {
            tool.run();
        }
        Ok(())
    }

    /// Update the active id and visuals for a click on `id`, returning the
    /// tool whose action should run. Lets callers release their borrow of
    /// the toolbar before the action executes.
    pub(crate) fn select(&mut self, id: &str) -> Result<Option<ToolDescriptor>, ToolbarError> {
        let Some(tool) = self.tools.iter().find(|t| t.id == id) else {
            log::error!("tool with id \"{id}\" not found");
            return Err(ToolbarError::ToolNotFound(id.to_owned()));
        };

        if let Some(previous) = self.active.as_deref() {
            self.view.set_active(previous, false);
        }

        if tool.toggle && self.active.as_deref() == Some(id) {
            self.active = None;
            return Ok(None);
        }

        self.active = Some(id.to_owned());
        if tool.toggle {
            self.view.set_active(id, true);
        }
        Ok(Some(tool.clone()))
    }

    #[must_use]
    pub fn active_tool(&self) -> Option<&ToolDescriptor> {
        let id = self.active.as_deref()?;
        self.tools.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    #[must_use]
    pub fn options(&self) -> &ToolbarOptions {
        &self.options
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Remove every tool and button.
    pub fn clear(&mut self) -> &mut Self {
        self.tools.clear();
        self.active = None;
        self.view.clear();
        self
    }

    /// Remove the toolbar element and forget all tools.
    pub fn destroy(&mut self) {
        self.view.remove();
        self.tools.clear();
        self.active = None;
    }
}

// =============================================================
// DOM view
// =============================================================

type ClickListener = Closure<dyn FnMut()>;

/// Renders a toolbar into a `<div>` appended to a container.
pub struct DomToolbarView {
    document: Document,
    root: Element,
    insertion: Element,
    saved_insertion: Option<Element>,
    button_class: String,
    buttons: Vec<(String, Element)>,
    listeners: Vec<ClickListener>,
    toolbar: Weak<RefCell<Toolbar<DomToolbarView>>>,
}

impl DomToolbarView {
    fn create(&self, tag: &str, class: &str) -> Result<Element, ToolbarError> {
        let el = self.document.create_element(tag).map_err(|e| ToolbarError::js(&e))?;
        el.set_class_name(class);
        Ok(el)
    }

    fn icon_element(&self, tool: &ToolDescriptor, icon: &Icon) -> Result<Element, ToolbarError> {
        match icon {
            Icon::Image(src) => {
                let img = self.create("img", "pyastrator-toolbar-icon")?;
                img.set_attribute("src", src).map_err(|e| ToolbarError::js(&e))?;
                img.set_attribute("alt", tool.tooltip.as_deref().unwrap_or(&tool.id))
                    .map_err(|e| ToolbarError::js(&e))?;
                Ok(img)
            }
            Icon::CssClass(classes) => self.create("i", &format!("pyastrator-toolbar-icon {classes}")),
        }
    }
}

impl ToolbarView for DomToolbarView {
    fn append_button(&mut self, tool: &ToolDescriptor) -> Result<(), ToolbarError> {
        let button = self.create("button", &self.button_class)?;
        button.set_attribute("data-tool-id", &tool.id).map_err(|e| ToolbarError::js(&e))?;
        if let Some(tooltip) = &tool.tooltip {
            button.set_attribute("title", tooltip).map_err(|e| ToolbarError::js(&e))?;
        }
        if let Some(icon) = &tool.icon {
            let icon_el = self.icon_element(tool, icon)?;
            button.append_child(&icon_el).map_err(|e| ToolbarError::js(&e))?;
        }

        let weak = self.toolbar.clone();
        let id = tool.id.clone();
        let cb = Closure::<dyn FnMut()>::new(move || click_tool(&weak, &id));
        button
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .map_err(|e| ToolbarError::js(&e))?;

        self.insertion.append_child(&button).map_err(|e| ToolbarError::js(&e))?;
        self.buttons.push((tool.id.clone(), button));
        self.listeners.push(cb);
        Ok(())
    }

    fn append_separator(&mut self) -> Result<(), ToolbarError> {
        let separator = self.create("div", "pyastrator-toolbar-separator")?;
        self.insertion.append_child(&separator).map_err(|e| ToolbarError::js(&e))?;
        Ok(())
    }

    fn begin_group(&mut self, label: Option<&str>) -> Result<(), ToolbarError> {
        let group = self.create("div", "pyastrator-toolbar-group")?;
        if let Some(label) = label.filter(|l| !l.is_empty()) {
            let span = self.create("span", "pyastrator-toolbar-group-label")?;
            span.set_text_content(Some(label));
            group.append_child(&span).map_err(|e| ToolbarError::js(&e))?;
        }
        self.insertion.append_child(&group).map_err(|e| ToolbarError::js(&e))?;
        self.saved_insertion = Some(std::mem::replace(&mut self.insertion, group));
        Ok(())
    }

    fn end_group(&mut self) {
        if let Some(previous) = self.saved_insertion.take() {
            self.insertion = previous;
        }
    }

    fn set_active(&mut self, id: &str, active: bool) {
        let Some((_, button)) = self.buttons.iter().find(|(tool_id, _)| tool_id == id) else {
            return;
        };
        let classes = button.class_list();
        let result = if active { classes.add_1("active") } else { classes.remove_1("active") };
        if let Err(e) = result {
            log::warn!("failed to update active state of {id}: {e:?}");
        }
    }

    fn clear(&mut self) {
        self.root.set_text_content(None);
        self.insertion = self.root.clone();
        self.saved_insertion = None;
        self.buttons.clear();
        self.listeners.clear();
    }

    fn remove(&mut self) {
        self.root.remove();
        self.buttons.clear();
        self.listeners.clear();
    }
}

fn click_tool(toolbar: &Weak<RefCell<Toolbar<DomToolbarView>>>, id: &str) {
    let Some(toolbar) = toolbar.upgrade() else {
        return;
    };
    let selected = match toolbar.try_borrow_mut() {
        Ok(mut toolbar) => toolbar.select(id),
        Err(_) => {
            log::warn!("toolbar busy, ignoring click on {id}");
            return;
        }
    };
    // The borrow is released so the action may call back into the toolbar.
    match selected {
        Ok(Some(tool)) => tool.run(),
        Ok(None) => {}
        Err(e) => log::error!("{e}"),
    }
}

/// Shared handle to a mounted toolbar.
pub type DomToolbar = Rc<RefCell<Toolbar<DomToolbarView>>>;

/// Create a toolbar inside the element `container_id`.
///
/// # Errors
///
/// Returns [`ToolbarError::ContainerNotFound`] if the container is missing.
pub fn mount(container_id: &str, options: ToolbarOptions) -> Result<DomToolbar, ToolbarError> {
    let document = dom::document().map_err(|e| ToolbarError::Dom(e.to_string()))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| ToolbarError::ContainerNotFound(container_id.to_owned()))?;
    let root = document.create_element("div").map_err(|e| ToolbarError::js(&e))?;
    root.set_class_name(&options.root_class());
    container.append_child(&root).map_err(|e| ToolbarError::js(&e))?;

    let button_class = options.button_class();
    let toolbar = Rc::new_cyclic(|weak| {
        let view = DomToolbarView {
            document,
            insertion: root.clone(),
            root,
            saved_insertion: None,
            button_class,
            buttons: Vec::new(),
            listeners: Vec::new(),
            toolbar: weak.clone(),
        };
        RefCell::new(Toolbar::new(view, options))
    });
    log::debug!("toolbar mounted in {container_id}");
    Ok(toolbar)
}
