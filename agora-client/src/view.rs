use crate::{
    api::{Comment, CommentId, Role, Time, UserId, Viewer},
    markup::{self, Block},
    relative_time, ActiveEditor, Capabilities, ThreadConfig,
};

/// Bootstrap classes for the role label of an author
pub fn role_class(role: Role) -> &'static str {
    match role {
        Role::Admin => "text-bg-danger",
        Role::Instructor => "text-bg-primary",
        Role::Student => "text-bg-success",
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BodyView {
    Formatted(Vec<Block>),
    Editing { draft: String },
}

/// Everything needed to display one comment, its replies included
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentRow {
    pub id: CommentId,
    pub level: usize,

    pub author_id: UserId,
    pub author_name: String,
    pub author_role: Role,
    pub avatar_url: Option<String>,
    /// Only set above the configured threshold
    pub reputation_badge: Option<u32>,

    pub is_solution: bool,
    pub timestamp: String,
    pub like_count: u32,

    pub body: BodyView,
    pub capabilities: Capabilities,

    /// Draft of the reply composer, if it is open under this comment
    pub reply_draft: Option<String>,

    pub children: Vec<CommentRow>,
}

impl CommentRow {
    /// First letter of the author name, for avatar placeholders
    pub fn initial(&self) -> String {
        self.author_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| String::from("?"))
    }

    /// This row and all the rows nested in it, depth-first
    pub fn iter(&self) -> Box<dyn Iterator<Item = &CommentRow> + '_> {
        Box::new(std::iter::once(self).chain(self.children.iter().flat_map(|c| c.iter())))
    }
}

/// Render model of a comment forest, as seen by one viewer
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreadView {
    pub rows: Vec<CommentRow>,
}

impl ThreadView {
    /// `level` is the nesting level of `comments`, 0 for the top of a discussion
    pub fn build(
        comments: &[Comment],
        viewer: &Viewer,
        editor: &ActiveEditor,
        config: &ThreadConfig,
        level: usize,
        now: &Time,
    ) -> ThreadView {
        ThreadView {
            rows: comments
                .iter()
                .map(|c| build_row(c, viewer, editor, config, level, now))
                .collect(),
        }
    }

    /// Number of rows, all levels included
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommentRow> {
        self.rows.iter().flat_map(|r| r.iter())
    }

    pub fn find(&self, id: &CommentId) -> Option<&CommentRow> {
        self.iter().find(|r| r.id == *id)
    }
}

fn build_row(
    c: &Comment,
    viewer: &Viewer,
    editor: &ActiveEditor,
    config: &ThreadConfig,
    level: usize,
    now: &Time,
) -> CommentRow {
    let capabilities = Capabilities::for_node(viewer, c, level, config.max_level);
    let body = match editor {
        ActiveEditor::Edit { target, draft } if *target == c.id && capabilities.can_edit => {
            BodyView::Editing {
                draft: draft.clone(),
            }
        }
        _ => BodyView::Formatted(markup::parse(&c.body)),
    };
    let reply_draft = match editor {
        ActiveEditor::Reply { target, draft } if *target == c.id && capabilities.can_reply => {
            Some(draft.clone())
        }
        _ => None,
    };
    CommentRow {
        id: c.id,
        level,
        author_id: c.author.id,
        author_name: c.author.name.clone(),
        author_role: c.author.role,
        avatar_url: c.author.avatar_url.clone(),
        reputation_badge: Some(c.author.reputation)
            .filter(|r| *r > config.reputation_badge_threshold),
        is_solution: c.is_solution,
        timestamp: relative_time(&c.created_at, now),
        like_count: c.like_count,
        body,
        capabilities,
        reply_draft,
        children: c
            .children
            .iter()
            .map(|c| build_row(c, viewer, editor, config, level + 1, now))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::{
        comment::tests::{comment, id, user},
        handler::tests::Recorder,
        markup::Inline,
        ForestExt, Intent, MenuItem,
    };

    fn now() -> Time {
        Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap()
    }

    fn viewer(id: UserId, role: Role) -> Viewer {
        Viewer { id, role }
    }

    fn build(comments: &[Comment], v: &Viewer, editor: &ActiveEditor) -> ThreadView {
        ThreadView::build(comments, v, editor, &ThreadConfig::default(), 0, &now())
    }

    /// One chain of replies, four levels deep, plus a sibling at each level
    fn deep_forest() -> Vec<Comment> {
        let third = comment(3, 10, vec![comment(4, 20, vec![]), comment(5, 30, vec![])]);
        let second = comment(2, 20, vec![third, comment(6, 30, vec![])]);
        vec![comment(1, 10, vec![second, comment(7, 20, vec![])])]
    }

    #[test]
    fn empty_forest_renders_nothing() {
        let v = build(&[], &Viewer::stub(), &ActiveEditor::Idle);
        assert!(v.is_empty());
        assert_eq!(v.len(), 0);
    }

    #[test]
    fn one_row_per_comment_nested_in_parent() {
        let f = deep_forest();
        let v = build(&f, &Viewer::stub(), &ActiveEditor::Idle);
        assert_eq!(v.len(), f.count_comments());
        assert_eq!(v.rows.len(), 1);

        // every reply is displayed inside its parent's row, one level deeper
        fn check(row: &CommentRow, forest: &Vec<Comment>) {
            let c = forest.find_comment(&row.id).unwrap();
            assert_eq!(
                row.children.iter().map(|r| r.id).collect::<Vec<_>>(),
                c.children.iter().map(|c| c.id).collect::<Vec<_>>(),
            );
            for child in &row.children {
                assert_eq!(child.level, row.level + 1);
                check(child, forest);
            }
        }
        check(&v.rows[0], &f);
        assert_eq!(v.find(&id(4)).unwrap().level, 3);
    }

    #[test]
    fn reply_hidden_at_max_level() {
        let v = build(&deep_forest(), &Viewer::stub(), &ActiveEditor::Idle);
        for r in v.iter() {
            assert_eq!(r.capabilities.can_reply, r.level < 3, "{:?}", r.id);
        }
        assert!(!v.find(&id(4)).unwrap().capabilities.can_reply);
        assert!(v.find(&id(3)).unwrap().capabilities.can_reply);

        // nested threads start deeper
        let f = deep_forest();
        let nested = ThreadView::build(
            &f[0].children,
            &Viewer::stub(),
            &ActiveEditor::Idle,
            &ThreadConfig::default(),
            1,
            &now(),
        );
        assert_eq!(nested.rows[0].level, 1);
        assert!(!nested.find(&id(4)).unwrap().capabilities.can_reply);
    }

    #[test]
    fn mark_solution_only_for_moderators() {
        let f = deep_forest();
        for role in [Role::Admin, Role::Instructor, Role::Student] {
            let v = build(&f, &viewer(user(99), role), &ActiveEditor::Idle);
            assert!(v.iter().all(|r| r.capabilities.can_mark_solution == role.can_moderate()));
        }
    }

    #[test]
    fn edit_and_delete_only_for_author() {
        let v = build(&deep_forest(), &viewer(user(10), Role::Student), &ActiveEditor::Idle);
        for r in v.iter() {
            let items = r.capabilities.menu_items();
            let mine = [id(1), id(3)].contains(&r.id);
            assert_eq!(items.contains(&MenuItem::Edit), mine);
            assert_eq!(items.contains(&MenuItem::Delete), mine);
            assert!(items.contains(&MenuItem::Report));
            assert!(r.capabilities.can_like);
        }
    }

    #[test]
    fn header_details() {
        let mut f = vec![comment(1, 10, vec![]), comment(2, 20, vec![])];
        f[0].author.reputation = 150;
        f[0].author.name = String::from("ada");
        f[0].is_solution = true;
        f[0].created_at = now() - Duration::hours(3);
        f[1].author.reputation = 100;
        f[1].author.role = Role::Instructor;
        let v = build(&f, &Viewer::stub(), &ActiveEditor::Idle);
        assert_eq!(v.rows[0].reputation_badge, Some(150));
        assert_eq!(v.rows[1].reputation_badge, None);
        assert!(v.rows[0].is_solution);
        assert!(!v.rows[1].is_solution);
        assert_eq!(v.rows[0].timestamp, "3 hours ago");
        assert_eq!(v.rows[0].initial(), "A");
        assert_eq!(role_class(v.rows[1].author_role), "text-bg-primary");
        assert_eq!(
            v.rows[0].body,
            BodyView::Formatted(vec![Block::Paragraph(vec![Inline::Text(String::from("comment 1"))])]),
        );
    }

    #[test]
    fn composers_show_on_their_target_only() {
        let f = deep_forest();
        let author = viewer(user(10), Role::Student);

        let mut editor = ActiveEditor::Idle;
        editor.toggle_reply(id(2));
        editor.set_draft(String::from("draft"));
        let v = build(&f, &author, &editor);
        assert!(v.iter().filter(|r| r.reply_draft.is_some()).map(|r| r.id).eq([id(2)]));
        assert_eq!(v.find(&id(2)).unwrap().reply_draft.as_deref(), Some("draft"));

        editor.open_edit(f.find_comment(&id(3)).unwrap());
        let v = build(&f, &author, &editor);
        assert!(v.iter().all(|r| r.reply_draft.is_none()));
        assert_eq!(
            v.find(&id(3)).unwrap().body,
            BodyView::Editing {
                draft: String::from("comment 3"),
            },
        );
        assert!(v
            .iter()
            .filter(|r| matches!(r.body, BodyView::Editing { .. }))
            .map(|r| r.id)
            .eq([id(3)]));

        // someone else's comment never shows an editor
        let v = build(&f, &viewer(user(20), Role::Admin), &editor);
        assert!(matches!(v.find(&id(3)).unwrap().body, BodyView::Formatted(_)));
    }

    #[test]
    fn reply_scenario_calls_back_without_touching_the_forest() {
        let f = vec![comment(1, 10, vec![comment(2, 20, vec![])])];
        let me = viewer(user(30), Role::Student);
        let rec = Recorder::default();

        let mut editor = ActiveEditor::Idle;
        editor.toggle_reply(id(1));
        editor.set_draft(String::from("Thanks!"));
        editor.submit().unwrap().dispatch(&rec);
        assert_eq!(
            rec.calls(),
            vec![Intent::Reply {
                parent_id: id(1),
                content: String::from("Thanks!"),
            }],
        );

        let v = build(&f, &me, &editor);
        assert!(v.iter().all(|r| r.reply_draft.is_none()));
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn mark_solution_is_a_toggle_intent() {
        let mut f = vec![comment(1, 10, vec![comment(2, 20, vec![])])];
        let rec = Recorder::default();
        let instructor = viewer(user(30), Role::Instructor);
        for is_solution in [false, true] {
            f[0].children[0].is_solution = is_solution;
            let v = build(&f, &instructor, &ActiveEditor::Idle);
            let row = v.find(&id(2)).unwrap();
            assert!(row.capabilities.can_mark_solution);
            Intent::MarkSolution(row.id).dispatch(&rec);
        }
        assert_eq!(rec.calls(), vec![Intent::MarkSolution(id(2)), Intent::MarkSolution(id(2))]);
    }

    #[test]
    fn tree_properties_hold_for_any_forest() {
        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::fmt::try_init();
        }
        bolero::check!()
            .with_type::<(Vec<Comment>, Viewer, u8)>()
            .cloned()
            .for_each(|(forest, viewer, max_level)| {
                let config = ThreadConfig {
                    max_level: max_level as usize % 5,
                    ..ThreadConfig::default()
                };
                let v = ThreadView::build(&forest, &viewer, &ActiveEditor::Idle, &config, 0, &now());
                assert_eq!(v.len(), forest.count_comments());
                for r in v.iter() {
                    assert_eq!(r.capabilities.can_reply, r.level < config.max_level);
                    assert_eq!(r.capabilities.can_mark_solution, viewer.role.can_moderate());
                    assert_eq!(r.capabilities.can_edit, viewer.id == r.author_id);
                    assert_eq!(r.capabilities.can_delete, viewer.id == r.author_id);
                    assert!(r.reply_draft.is_none());
                }
            });
    }

    #[test]
    fn blank_drafts_never_call_back() {
        bolero::check!()
            .with_type::<(u8, u8)>()
            .cloned()
            .for_each(|(spaces, newlines)| {
                let draft = " ".repeat(spaces as usize % 8) + &"\n".repeat(newlines as usize % 4);
                let c = comment(1, 10, vec![]);
                let rec = Recorder::default();
                let mut editor = ActiveEditor::Idle;
                editor.toggle_reply(c.id);
                editor.set_draft(draft.clone());
                if let Ok(i) = editor.submit() {
                    i.dispatch(&rec);
                }
                editor.open_edit(&c);
                editor.set_draft(draft);
                if let Ok(i) = editor.submit() {
                    i.dispatch(&rec);
                }
                assert!(rec.calls().is_empty());
            });
    }
}
