use agora_client::api::{
    self, Comment, CommentId, Discussion, EditComment, NewComment, NewReaction, ReactionKind,
    Viewer,
};
use anyhow::{anyhow, Context};

use crate::config::Session;

/// Turns non-success answers into errors, using the collaborator's error body when it has one
async fn check(what: &str, resp: reqwest::Result<reqwest::Response>) -> anyhow::Result<reqwest::Response> {
    let resp = resp.with_context(|| format!("sending {what} request"))?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp
        .bytes()
        .await
        .with_context(|| format!("reading {what} error body"))?;
    match api::Error::parse(&body) {
        Ok(err) => Err(anyhow::Error::new(err).context(format!("{what} answered {status}"))),
        Err(_) => Err(anyhow!("{what} answered {status}")),
    }
}

pub async fn fetch_viewer(session: &Session) -> anyhow::Result<Viewer> {
    let resp = crate::CLIENT
        .get(format!("{}/api/whoami", session.host))
        .send()
        .await;
    check("whoami", resp)
        .await?
        .json()
        .await
        .context("parsing viewer")
}

pub async fn fetch_discussion(session: &Session) -> anyhow::Result<Discussion> {
    let resp = crate::CLIENT
        .get(format!("{}/api/discussions/{}", session.host, session.discussion.0))
        .send()
        .await;
    check("fetch discussion", resp)
        .await?
        .json()
        .await
        .context("parsing discussion")
}

/// Creates a top-level comment if `parent_id` is None, a reply otherwise
pub async fn create_comment(
    session: &Session,
    parent_id: Option<CommentId>,
    content: String,
) -> anyhow::Result<Comment> {
    let resp = crate::CLIENT
        .post(format!(
            "{}/api/discussions/{}/comments",
            session.host, session.discussion.0
        ))
        .json(&NewComment { content, parent_id })
        .send()
        .await;
    check("create comment", resp)
        .await?
        .json()
        .await
        .context("parsing created comment")
}

pub async fn update_comment(session: &Session, id: CommentId, content: String) -> anyhow::Result<()> {
    let resp = crate::CLIENT
        .put(format!("{}/api/comments/{}", session.host, id.0))
        .json(&EditComment { content })
        .send()
        .await;
    check("update comment", resp).await?;
    Ok(())
}

pub async fn delete_comment(session: &Session, id: CommentId) -> anyhow::Result<()> {
    let resp = crate::CLIENT
        .delete(format!("{}/api/comments/{}", session.host, id.0))
        .send()
        .await;
    check("delete comment", resp).await?;
    Ok(())
}

pub async fn add_like(session: &Session, id: CommentId) -> anyhow::Result<()> {
    let resp = crate::CLIENT
        .post(format!("{}/api/comments/{}/reactions", session.host, id.0))
        .json(&NewReaction {
            kind: ReactionKind::Like,
        })
        .send()
        .await;
    check("add reaction", resp).await?;
    Ok(())
}

pub async fn mark_solution(session: &Session, id: CommentId) -> anyhow::Result<()> {
    let resp = crate::CLIENT
        .post(format!("{}/api/comments/{}/solution", session.host, id.0))
        .send()
        .await;
    check("mark solution", resp).await?;
    Ok(())
}
