//! Single-entity table: one label/value row per attribute descriptor.

use super::{select, Content, DataFn, Label, TableView};
use crate::resource::Resource;
use crate::router::Route;

pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "No item found";
pub const DEFAULT_ERROR_MESSAGE: &str = "Unexpected error occured while fetching data";

/// Describes one row of an [`InfoTable`].
pub struct InfoTableAttribute<'a, T, A> {
    label: Label<'a, T, A>,
    render: DataFn<'a, T, A, Content>,
    copy: Option<DataFn<'a, T, A, Option<String>>>,
    hide: Option<DataFn<'a, T, A, bool>>,
    link: Option<DataFn<'a, T, A, Option<Route>>>,
}

impl<'a, T, A> InfoTableAttribute<'a, T, A> {
    pub fn new<C: Into<Content>>(label: impl Into<Label<'a, T, A>>, render: impl Fn(&T, &A) -> C + 'a) -> Self {
        Self {
            label: label.into(),
            render: Box::new(move |item, extra| render(item, extra).into()),
            copy: None,
            hide: None,
            link: None,
        }
    }

    /// Value put on the clipboard for this row; `None` or an empty string
    /// means not copyable.
    pub fn copy_to_clipboard(mut self, f: impl Fn(&T, &A) -> Option<String> + 'a) -> Self {
        self.copy = Some(Box::new(f));
        self
    }

    /// Suppress the whole row when `f` returns true.
    pub fn hide(mut self, f: impl Fn(&T, &A) -> bool + 'a) -> Self {
        self.hide = Some(Box::new(f));
        self
    }

    pub fn link(mut self, f: impl Fn(&T, &A) -> Option<Route> + 'a) -> Self {
        self.link = Some(Box::new(f));
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfoRow {
    pub label: Content,
    pub value: Content,
    pub copy_value: Option<String>,
    pub link: Option<Route>,
}

pub type InfoRows = Vec<InfoRow>;

pub struct InfoTable<'a, T, A> {
    attributes: Vec<InfoTableAttribute<'a, T, A>>,
    not_found_message: String,
    error_message: String,
}

impl<'a, T, A> InfoTable<'a, T, A> {
    pub fn new(attributes: Vec<InfoTableAttribute<'a, T, A>>) -> Self {
        Self {
            attributes,
            not_found_message: DEFAULT_NOT_FOUND_MESSAGE.to_string(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn not_found_message(mut self, message: impl Into<String>) -> Self {
        self.not_found_message = message.into();
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn render(&self, resource: &Resource<T>, extra: &A) -> TableView<InfoRows> {
        let item = match select(resource, &self.not_found_message, &self.error_message) {
            Ok(Some(item)) => item,
            Ok(None) => return TableView::Ready(Vec::new()),
            Err(view) => return view,
        };
        let rows = self
            .attributes
            .iter()
            .filter(|attr| !attr.hide.as_ref().is_some_and(|hide| hide(item, extra)))
            .map(|attr| InfoRow {
                label: attr.label.resolve(item, extra),
                value: (attr.render)(item, extra),
                copy_value: attr
                    .copy
                    .as_ref()
                    .and_then(|copy| copy(item, extra))
                    .filter(|v| !v.is_empty()),
                link: attr.link.as_ref().and_then(|link| link(item, extra)),
            })
            .collect();
        TableView::Ready(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::plain;
    use anyhow::anyhow;

    struct Block {
        height: u64,
        hash: Option<&'static str>,
    }

    fn table<'a>() -> InfoTable<'a, Block, ()> {
        InfoTable::new(vec![
            InfoTableAttribute::new("Height", |b: &Block, _: &()| b.height.to_string()),
            InfoTableAttribute::new("Hash", |b: &Block, _: &()| b.hash.unwrap_or_default().to_string())
                .copy_to_clipboard(|b: &Block, _: &()| b.hash.map(str::to_string))
                .hide(|b: &Block, _: &()| b.hash.is_none()),
        ])
    }

    fn labels(view: &TableView<InfoRows>) -> Vec<String> {
        view.ready().unwrap().iter().map(|r| plain(&r.label)).collect()
    }

    #[test]
    fn rows_follow_declaration_order() {
        let view = table().render(&Resource::ready(Block { height: 5, hash: Some("0xab") }), &());
        assert_eq!(labels(&view), vec!["Height", "Hash"]);
        let rows = view.ready().unwrap();
        assert_eq!(plain(&rows[0].value), "5");
        assert_eq!(rows[1].copy_value.as_deref(), Some("0xab"));
        assert_eq!(rows[0].copy_value, None);
    }

    #[test]
    fn empty_copy_value_is_not_copyable() {
        let t = InfoTable::new(vec![InfoTableAttribute::new("Hash", |_: &Block, _: &()| "-")
            .copy_to_clipboard(|b: &Block, _: &()| Some(b.hash.unwrap_or_default().to_string()))]);
        let view = t.render(&Resource::ready(Block { height: 5, hash: Some("") }), &());
        assert_eq!(view.ready().unwrap()[0].copy_value, None);
    }

    #[test]
    fn hidden_rows_are_skipped() {
        let view = table().render(&Resource::ready(Block { height: 5, hash: None }), &());
        assert_eq!(labels(&view), vec!["Height"]);
    }

    #[test]
    fn terminal_states_use_messages() {
        let t = table().not_found_message("Extrinsic not found");
        assert_eq!(t.render(&Resource::loading(), &()), TableView::Loading);
        assert_eq!(
            t.render(&Resource::not_found(), &()),
            TableView::NotFound {
                message: "Extrinsic not found".into()
            }
        );
        match t.render(&Resource::failed(anyhow!("timeout")), &()) {
            TableView::Error { message, details, reported } => {
                assert_eq!(message, DEFAULT_ERROR_MESSAGE);
                assert_eq!(details, "timeout");
                assert!(reported);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn computed_label_sees_the_entity() {
        let t: InfoTable<'_, Block, ()> = InfoTable::new(vec![InfoTableAttribute::new(
            Label::computed(|b: &Block, _: &()| format!("Block {}", b.height)),
            |_: &Block, _: &()| "x",
        )]);
        let view = t.render(&Resource::ready(Block { height: 9, hash: None }), &());
        assert_eq!(labels(&view), vec!["Block 9"]);
    }
}
