use std::collections::{HashMap, HashSet};

use crate::api::{Comment, CommentId, Error};

/// Operations on a forest of comments, as owned by a discussion view.
///
/// The thread renderer itself never calls the mutating ones: it only reports
/// intents, and the hosting view applies the outcome here before re-rendering.
pub trait ForestExt {
    fn find_comment(&self, id: &CommentId) -> Option<&Comment>;
    fn find_comment_mut(&mut self, id: &CommentId) -> Option<&mut Comment>;

    /// Number of comments, all levels included
    fn count_comments(&self) -> usize;

    /// Number of levels, 0 for an empty forest
    fn depth(&self) -> usize;

    /// Removes the comment along with all its replies
    fn remove_comment(&mut self, id: &CommentId) -> Option<Comment>;

    /// Appends `c` to its parent's replies, or at the top level if it has none
    fn insert_reply(&mut self, c: Comment);

    fn edit_body(&mut self, id: &CommentId, body: String) -> Result<(), Error>;
    fn add_like(&mut self, id: &CommentId) -> Result<(), Error>;
    fn toggle_solution(&mut self, id: &CommentId) -> Result<(), Error>;
}

impl ForestExt for Vec<Comment> {
    fn find_comment(&self, id: &CommentId) -> Option<&Comment> {
        for c in self.iter() {
            if c.id == *id {
                return Some(c);
            }
            if let Some(res) = c.children.find_comment(id) {
                return Some(res);
            }
        }
        None
    }

    fn find_comment_mut(&mut self, id: &CommentId) -> Option<&mut Comment> {
        for c in self.iter_mut() {
            if c.id == *id {
                return Some(c);
            }
            if let Some(res) = c.children.find_comment_mut(id) {
                return Some(res);
            }
        }
        None
    }

    fn count_comments(&self) -> usize {
        self.iter().map(|c| 1 + c.children.count_comments()).sum()
    }

    fn depth(&self) -> usize {
        self.iter()
            .map(|c| 1 + c.children.depth())
            .max()
            .unwrap_or(0)
    }

    fn remove_comment(&mut self, id: &CommentId) -> Option<Comment> {
        if let Some(pos) = self.iter().position(|c| c.id == *id) {
            return Some(self.remove(pos));
        }
        self.iter_mut()
            .find_map(|c| c.children.remove_comment(id))
    }

    fn insert_reply(&mut self, c: Comment) {
        let parent = c.parent_id.and_then(|p| self.find_comment_mut(&p));
        match parent {
            Some(parent) => parent.children.push(c),
            None => {
                if let Some(parent_id) = c.parent_id {
                    tracing::warn!(comment=?c.id, ?parent_id, "reply to unknown comment, adding it at the top level");
                }
                self.push(c)
            }
        }
    }

    fn edit_body(&mut self, id: &CommentId, body: String) -> Result<(), Error> {
        let c = self.find_comment_mut(id).ok_or(Error::CommentNotFound(*id))?;
        c.body = body;
        Ok(())
    }

    fn add_like(&mut self, id: &CommentId) -> Result<(), Error> {
        let c = self.find_comment_mut(id).ok_or(Error::CommentNotFound(*id))?;
        c.like_count = c.like_count.saturating_add(1);
        Ok(())
    }

    fn toggle_solution(&mut self, id: &CommentId) -> Result<(), Error> {
        let c = self.find_comment_mut(id).ok_or(Error::CommentNotFound(*id))?;
        c.is_solution = !c.is_solution;
        Ok(())
    }
}

/// Nests a list of comments according to their `parent_id`
///
/// Comments that already carry children keep them. Comments whose parent is
/// not in the list end up at the top level. Relative order is preserved.
pub fn build_forest(comments: Vec<Comment>) -> Vec<Comment> {
    let known = comments.iter().map(|c| c.id).collect::<HashSet<_>>();
    let mut roots = Vec::new();
    let mut replies: HashMap<CommentId, Vec<Comment>> = HashMap::new();
    for c in comments {
        match c.parent_id {
            Some(p) if known.contains(&p) && p != c.id => {
                replies.entry(p).or_insert_with(Vec::new).push(c)
            }
            Some(p) => {
                tracing::warn!(comment=?c.id, parent=?p, "comment has a parent that is not in the discussion");
                roots.push(c)
            }
            None => roots.push(c),
        }
    }

    fn attach(c: &mut Comment, replies: &mut HashMap<CommentId, Vec<Comment>>) {
        for c in c.children.iter_mut() {
            attach(c, replies);
        }
        if let Some(mut children) = replies.remove(&c.id) {
            for child in children.iter_mut() {
                attach(child, replies);
            }
            c.children.extend(children);
        }
    }
    for r in roots.iter_mut() {
        attach(r, &mut replies);
    }

    // Only reply cycles can remain here, lift them rather than losing them
    if !replies.is_empty() {
        tracing::warn!(num = replies.len(), "found reply cycles in discussion");
        let mut leftover = replies.into_values().flatten().collect::<Vec<_>>();
        leftover.sort_by_key(|c| c.created_at);
        roots.extend(leftover);
    }
    roots
}
