use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{Content, Role};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    // Identity
    pub id: String,
    pub role: Option<Role>,

    // Content
    pub content: Content,

    // Interaction
    pub focusable: bool,
    /// Disabled elements never receive focus.
    pub disabled: bool,

    // Attributes (index metadata, handler IDs, etc.)
    pub data: HashMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            role: None,
            content: Content::None,
            focusable: false,
            disabled: false,
            data: HashMap::new(),
        }
    }
}

impl Element {
    /// Generic container.
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            role: Some(Role::Generic),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    /// Interactive grid root. Navigation attaches to elements of this role.
    pub fn grid() -> Self {
        Self {
            id: generate_id("grid"),
            role: Some(Role::Grid),
            ..Default::default()
        }
    }

    /// Static (non-interactive) table root.
    pub fn table() -> Self {
        Self {
            id: generate_id("table"),
            role: Some(Role::Table),
            ..Default::default()
        }
    }

    pub fn row_group() -> Self {
        Self {
            id: generate_id("rowgroup"),
            role: Some(Role::RowGroup),
            ..Default::default()
        }
    }

    pub fn row() -> Self {
        Self {
            id: generate_id("row"),
            role: Some(Role::Row),
            ..Default::default()
        }
    }

    /// Focusable grid cell with text content.
    pub fn cell(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("cell"),
            role: Some(Role::GridCell),
            content: Content::Text(content.into()),
            focusable: true,
            ..Default::default()
        }
    }

    pub fn column_header(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("colheader"),
            role: Some(Role::ColumnHeader),
            content: Content::Text(content.into()),
            focusable: true,
            ..Default::default()
        }
    }

    pub fn row_header(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("rowheader"),
            role: Some(Role::RowHeader),
            content: Content::Text(content.into()),
            focusable: true,
            ..Default::default()
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self {
            id: generate_id("button"),
            role: Some(Role::Button),
            content: Content::Text(label.into()),
            focusable: true,
            ..Default::default()
        }
    }

    /// Create a text input element.
    pub fn text_input(value: impl Into<String>) -> Self {
        Self {
            id: generate_id("input"),
            role: Some(Role::TextBox),
            content: Content::Text(value.into()),
            focusable: true,
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn is_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    pub fn is_cell(&self) -> bool {
        self.role.is_some_and(Role::is_cell)
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether this element can currently take focus.
    pub fn can_focus(&self) -> bool {
        self.focusable && !self.disabled
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => {
                // Text content is replaced by children
                self.content = Content::Children(vec![child]);
            }
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => {
                self.content = Content::Children(new_children.into_iter().collect());
            }
        }
        self
    }

    pub fn child_elements(&self) -> &[Element] {
        self.content.children()
    }

    /// Mutable access to the child list, converting other content into an
    /// empty child list first.
    pub(crate) fn child_list_mut(&mut self) -> &mut Vec<Element> {
        if !matches!(self.content, Content::Children(_)) {
            self.content = Content::Children(Vec::new());
        }
        match &mut self.content {
            Content::Children(children) => children,
            _ => unreachable!("content was just set to children"),
        }
    }
}
