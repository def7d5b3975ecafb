use std::rc::Rc;

use agora_client::{
    api::{self, Comment, CommentId, Discussion, Viewer},
    build_forest, markup,
    prelude::*,
    relative_time, ThreadConfig,
};
use yew::prelude::*;

use crate::{api as collab, config, config::Session, ui};

pub enum AppMsg {
    Loaded {
        viewer: Viewer,
        discussion: Discussion,
    },
    LoadFailed(String),
    Failed(String),
    DismissError,

    DraftChanged(String),
    SubmitTopLevel,

    Reply(CommentId, String),
    Edit(CommentId, String),
    Delete(CommentId),
    Like(CommentId),
    MarkSolution(CommentId),

    Posted(Comment),
    Created(Comment),
    Edited(CommentId, String),
    Deleted(CommentId),
    SolutionToggled(CommentId),
    LikeSaved,
}

/// A call to the collaborator
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Request {
    Load,
    Create {
        parent_id: Option<CommentId>,
        content: String,
    },
    Update {
        id: CommentId,
        content: String,
    },
    Delete(CommentId),
    Like(CommentId),
    MarkSolution(CommentId),
}

impl Request {
    async fn run(&self, session: &Session) -> anyhow::Result<AppMsg> {
        Ok(match self {
            Request::Load => {
                let (viewer, discussion) = futures::try_join!(
                    collab::fetch_viewer(session),
                    collab::fetch_discussion(session),
                )?;
                AppMsg::Loaded { viewer, discussion }
            }
            Request::Create {
                parent_id: None,
                content,
            } => AppMsg::Posted(collab::create_comment(session, None, content.clone()).await?),
            Request::Create {
                parent_id: Some(parent_id),
                content,
            } => AppMsg::Created(
                collab::create_comment(session, Some(*parent_id), content.clone()).await?,
            ),
            Request::Update { id, content } => {
                collab::update_comment(session, *id, content.clone()).await?;
                AppMsg::Edited(*id, content.clone())
            }
            Request::Delete(id) => {
                collab::delete_comment(session, *id).await?;
                AppMsg::Deleted(*id)
            }
            Request::Like(id) => {
                collab::add_like(session, *id).await?;
                AppMsg::LikeSaved
            }
            Request::MarkSolution(id) => {
                collab::mark_solution(session, *id).await?;
                AppMsg::SolutionToggled(*id)
            }
        })
    }

    /// A failed action leads to a refetch, a failed refetch leads to nothing more
    fn failed(&self, message: String) -> AppMsg {
        match self {
            Request::Load => AppMsg::LoadFailed(message),
            _ => AppMsg::Failed(message),
        }
    }
}

/// Everything the page shows, and how messages change it
struct Page {
    config: ThreadConfig,
    viewer: Option<Viewer>,
    discussion: Option<Discussion>,
    comments: Rc<Vec<Comment>>,
    draft: String,
    error: Option<String>,
}

impl Page {
    fn new(config: ThreadConfig, error: Option<String>) -> Page {
        Page {
            config,
            viewer: None,
            discussion: None,
            comments: Rc::new(Vec::new()),
            draft: String::new(),
            error,
        }
    }

    fn apply(&mut self, what: &str, f: impl FnOnce(&mut Vec<Comment>) -> Result<(), api::Error>) {
        if let Err(err) = f(Rc::make_mut(&mut self.comments)) {
            tracing::warn!(?err, "{what} on a comment that is not in the thread");
        }
    }

    /// Returns the request `msg` calls for, if any
    fn update(&mut self, msg: AppMsg) -> Option<Request> {
        match msg {
            AppMsg::Loaded {
                viewer,
                mut discussion,
            } => {
                tracing::debug!(comments = discussion.comments.len(), "loaded discussion");
                self.comments = Rc::new(build_forest(std::mem::take(&mut discussion.comments)));
                self.viewer = Some(viewer);
                self.discussion = Some(discussion);
            }
            AppMsg::LoadFailed(message) => self.error = Some(message),
            AppMsg::Failed(message) => {
                self.error = Some(message);
                // Local state may have diverged from the collaborator's, start over from its
                return Some(Request::Load);
            }
            AppMsg::DismissError => self.error = None,

            AppMsg::DraftChanged(draft) => self.draft = draft,
            AppMsg::SubmitTopLevel => match api::validate_content(&self.draft) {
                Ok(content) => {
                    return Some(Request::Create {
                        parent_id: None,
                        content: String::from(content),
                    })
                }
                Err(err) => tracing::debug!(%err, "not submitting top-level comment"),
            },

            AppMsg::Reply(parent_id, content) => {
                return Some(Request::Create {
                    parent_id: Some(parent_id),
                    content,
                })
            }
            AppMsg::Edit(id, content) => return Some(Request::Update { id, content }),
            AppMsg::Delete(id) => return Some(Request::Delete(id)),
            AppMsg::Like(id) => {
                self.apply("like", |f| f.add_like(&id));
                return Some(Request::Like(id));
            }
            AppMsg::MarkSolution(id) => return Some(Request::MarkSolution(id)),

            AppMsg::Posted(c) => {
                Rc::make_mut(&mut self.comments).insert_reply(c);
                self.draft.clear();
            }
            AppMsg::Created(c) => Rc::make_mut(&mut self.comments).insert_reply(c),
            AppMsg::Edited(id, content) => self.apply("edit", |f| f.edit_body(&id, content)),
            AppMsg::Deleted(id) => {
                if Rc::make_mut(&mut self.comments).remove_comment(&id).is_none() {
                    tracing::warn!(comment=?id, "deleted a comment that was not in the thread");
                }
            }
            AppMsg::SolutionToggled(id) => self.apply("solution", |f| f.toggle_solution(&id)),
            AppMsg::LikeSaved => (),
        }
        None
    }
}

pub struct App {
    session: Option<Session>,
    page: Page,
}

impl App {
    fn send(&self, ctx: &Context<Self>, req: Request) {
        let Some(session) = self.session.clone() else {
            tracing::warn!(?req, "dropping request, no collaborator session");
            return;
        };
        ctx.link().send_future(async move {
            match req.run(&session).await {
                Ok(msg) => msg,
                Err(err) => {
                    tracing::error!(?err, ?req, "collaborator request failed");
                    req.failed(format!("{err:#}"))
                }
            }
        });
    }
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (session, error) = match Session::from_location() {
            Ok(s) => (Some(s), None),
            Err(err) => {
                tracing::error!(?err, "failed figuring out which discussion to show");
                (None, Some(format!("{err:#}")))
            }
        };
        let app = App {
            session,
            page: Page::new(config::thread_config(), error),
        };
        app.send(ctx, Request::Load);
        app
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        if let Some(req) = self.page.update(msg) {
            self.send(ctx, req);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let page = &self.page;
        let error_toast = html! {
            <ui::ErrorToast
                message={ page.error.clone() }
                on_dismiss={ ctx.link().callback(|_| AppMsg::DismissError) }
            />
        };
        let (Some(viewer), Some(discussion)) = (&page.viewer, &page.discussion) else {
            return html! {
                <div class="container py-4">
                    if page.error.is_none() {
                        <div class="d-flex justify-content-center">
                            <div class="spinner-border" role="status">
                                <span class="visually-hidden">{ "Loading..." }</span>
                            </div>
                        </div>
                    }
                    { error_toast }
                </div>
            };
        };
        html! {
            <div class="container py-4">
                <article class="mb-4">
                    <h1 class="h3">{ &discussion.title }</h1>
                    <div class="small text-body-secondary mb-2">
                        { &discussion.author.name }
                        { " · " }
                        { relative_time(&discussion.created_at, &chrono::Utc::now()) }
                    </div>
                    { ui::render_blocks(&markup::parse(&discussion.body)) }
                </article>
                <h2 class="h5">{ format!("{} comments", page.comments.count_comments()) }</h2>
                <ui::Composer
                    draft={ page.draft.clone() }
                    placeholder="Add a comment"
                    submit_label="Comment"
                    on_input={ ctx.link().callback(AppMsg::DraftChanged) }
                    on_submit={ ctx.link().callback(|_| AppMsg::SubmitTopLevel) }
                />
                if page.comments.is_empty() {
                    <p class="text-body-secondary">{ "No comments yet" }</p>
                } else {
                    <ui::CommentThread
                        comments={ page.comments.clone() }
                        viewer={ *viewer }
                        config={ page.config }
                        on_reply={ ctx.link().callback(|(id, content): (CommentId, String)| AppMsg::Reply(id, content)) }
                        on_edit={ ctx.link().callback(|(id, content): (CommentId, String)| AppMsg::Edit(id, content)) }
                        on_delete={ ctx.link().callback(AppMsg::Delete) }
                        on_like={ ctx.link().callback(AppMsg::Like) }
                        on_mark_solution={ ctx.link().callback(AppMsg::MarkSolution) }
                    />
                }
                { error_toast }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use agora_client::api::{Author, DiscussionId, Role, UserId, Uuid};
    use chrono::{TimeZone, Utc};

    use super::*;

    fn id(n: u128) -> CommentId {
        CommentId(Uuid::from_u128(n))
    }

    fn author() -> Author {
        Author {
            id: UserId(Uuid::from_u128(10)),
            name: String::from("ada"),
            role: Role::Student,
            reputation: 0,
            avatar_url: None,
        }
    }

    fn comment(n: u128, parent: Option<u128>) -> Comment {
        Comment {
            id: id(n),
            parent_id: parent.map(id),
            author: author(),
            body: format!("comment {n}"),
            like_count: 0,
            is_solution: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            children: Vec::new(),
        }
    }

    fn loaded(comments: Vec<Comment>) -> Page {
        let mut page = Page::new(ThreadConfig::default(), None);
        let discussion = Discussion {
            id: DiscussionId(Uuid::from_u128(1)),
            title: String::from("Week 1"),
            body: String::from("Questions about week 1"),
            author: author(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            comments,
        };
        let msg = AppMsg::Loaded {
            viewer: Viewer::stub(),
            discussion,
        };
        assert_eq!(page.update(msg), None);
        page
    }

    #[test]
    fn failed_action_refetches_and_failed_refetch_stops() {
        let mut page = loaded(vec![comment(1, None)]);

        let like = page.update(AppMsg::Like(id(1)));
        assert_eq!(like, Some(Request::Like(id(1))));
        let failure = Request::Like(id(1)).failed(String::from("like failed"));
        assert_eq!(page.update(failure), Some(Request::Load));
        assert_eq!(page.error.as_deref(), Some("like failed"));

        let failure = Request::Load.failed(String::from("collaborator down"));
        assert_eq!(page.update(failure), None);
        assert_eq!(page.error.as_deref(), Some("collaborator down"));
    }

    #[test]
    fn top_level_draft_is_kept_until_posted() {
        let mut page = loaded(Vec::new());
        page.update(AppMsg::DraftChanged(String::from("  hello  ")));
        assert_eq!(
            page.update(AppMsg::SubmitTopLevel),
            Some(Request::Create {
                parent_id: None,
                content: String::from("hello"),
            }),
        );
        assert_eq!(page.draft, "  hello  ");

        page.update(AppMsg::Failed(String::from("post failed")));
        assert_eq!(page.draft, "  hello  ");

        assert_eq!(page.update(AppMsg::Posted(comment(2, None))), None);
        assert_eq!(page.draft, "");
        assert_eq!(page.comments.count_comments(), 1);
    }

    #[test]
    fn blank_top_level_is_not_sent() {
        let mut page = loaded(Vec::new());
        page.update(AppMsg::DraftChanged(String::from(" \n ")));
        assert_eq!(page.update(AppMsg::SubmitTopLevel), None);
    }

    #[test]
    fn like_is_optimistic_and_replies_land_under_parent() {
        let mut page = loaded(vec![comment(1, None)]);
        page.update(AppMsg::Like(id(1)));
        assert_eq!(page.comments[0].like_count, 1);

        page.update(AppMsg::DraftChanged(String::from("unsent")));
        assert_eq!(page.update(AppMsg::Created(comment(2, Some(1)))), None);
        assert_eq!(page.comments[0].children[0].id, id(2));
        assert_eq!(page.draft, "unsent");

        page.update(AppMsg::Deleted(id(1)));
        assert!(page.comments.is_empty());
    }
}
