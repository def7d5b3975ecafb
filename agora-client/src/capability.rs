use crate::api::{Comment, Viewer};

/// Which controls a viewer gets on one comment
///
/// This only drives what is displayed. Nothing here is enforced, the
/// collaborator performs its own checks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Capabilities {
    pub can_like: bool,
    pub can_reply: bool,
    pub can_mark_solution: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_report: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuItem {
    Edit,
    Delete,
    Report,
}

impl Capabilities {
    /// `level` is the nesting depth of `c`, 0 for top-level comments
    pub fn for_node(viewer: &Viewer, c: &Comment, level: usize, max_level: usize) -> Capabilities {
        let is_author = viewer.is_author(c);
        Capabilities {
            can_like: true,
            can_reply: level < max_level,
            can_mark_solution: viewer.can_moderate(),
            can_edit: is_author,
            can_delete: is_author,
            can_report: true,
        }
    }

    /// Items of the overflow menu, in display order
    pub fn menu_items(&self) -> Vec<MenuItem> {
        let mut res = Vec::with_capacity(3);
        if self.can_edit {
            res.push(MenuItem::Edit);
        }
        if self.can_delete {
            res.push(MenuItem::Delete);
        }
        if self.can_report {
            res.push(MenuItem::Report);
        }
        res
    }
}
