//! Generic, renderer-neutral data tables.
//!
//! Domain code describes a table as an ordered list of attribute (or column)
//! descriptors. [`info::InfoTable`] shows one entity as label/value rows,
//! [`items::ItemsTable`] shows a collection as a grid with sort affordances
//! and a pagination control. Both take a [`Resource`] and produce a
//! [`TableView`] that `ui` paints; neither fetches nor holds state.

pub mod info;
pub mod items;

use ratatui::text::Text;

use crate::resource::{Resource, ResourceState};

/// Renderable content of a label or a cell.
pub type Content = Text<'static>;

/// Anything that can be a table row: it needs a stable key.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Descriptor callback: a pure function of the entity and the extra context.
pub type DataFn<'a, T, A, R> = Box<dyn Fn(&T, &A) -> R + 'a>;

/// Attribute label: fixed, or computed from the entity.
pub enum Label<'a, T, A> {
    Static(Content),
    Computed(DataFn<'a, T, A, Content>),
}

impl<'a, T, A> Label<'a, T, A> {
    pub fn computed<C: Into<Content>>(f: impl Fn(&T, &A) -> C + 'a) -> Self {
        Label::Computed(Box::new(move |item, extra| f(item, extra).into()))
    }

    pub fn resolve(&self, item: &T, extra: &A) -> Content {
        match self {
            Label::Static(content) => content.clone(),
            Label::Computed(f) => f(item, extra),
        }
    }
}

impl<T, A> From<&'static str> for Label<'_, T, A> {
    fn from(s: &'static str) -> Self {
        Label::Static(Text::from(s))
    }
}

impl<T, A> From<String> for Label<'_, T, A> {
    fn from(s: String) -> Self {
        Label::Static(Text::from(s))
    }
}

impl<T, A> From<Content> for Label<'_, T, A> {
    fn from(c: Content) -> Self {
        Label::Static(c)
    }
}

/// What a table renders as. Exactly one state applies.
#[derive(Clone, Debug, PartialEq)]
pub enum TableView<R> {
    Loading,
    NotFound {
        message: String,
    },
    Error {
        message: String,
        /// Description of the underlying error chain.
        details: String,
        /// The error has been logged by the fetch layer.
        reported: bool,
    },
    Ready(R),
}

impl<R> TableView<R> {
    pub fn ready(&self) -> Option<&R> {
        match self {
            TableView::Ready(r) => Some(r),
            _ => None,
        }
    }
}

/// Shared status selection for both tables: loading, then not-found, then
/// error. `Ok` carries the data to lay out; a resource that was never
/// requested lays out as empty.
pub(crate) fn select<'r, T, R>(resource: &'r Resource<T>, not_found: &str, error: &str) -> Result<Option<&'r T>, TableView<R>> {
    match resource.state() {
        ResourceState::Loading => Err(TableView::Loading),
        ResourceState::NotFound => Err(TableView::NotFound {
            message: not_found.to_string(),
        }),
        ResourceState::Failed(e) => Err(TableView::Error {
            message: error.to_string(),
            details: format!("{e:#}"),
            reported: true,
        }),
        ResourceState::Ready(data) => Ok(Some(data)),
        ResourceState::Empty => Ok(None),
    }
}

/// Flatten content to a plain string (for clipboard fallbacks and tests).
pub fn plain(content: &Content) -> String {
    content
        .lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
