use agora_client::{
    api::{DiscussionId, Uuid},
    ThreadConfig,
};
use anyhow::{anyhow, Context};
use gloo_storage::{LocalStorage, Storage};

const KEY_THREAD_CONFIG: &str = "thread-config";
const KEY_COLLABORATOR_HOST: &str = "collaborator-host";

/// Where the discussion shown on this page lives
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub host: String,
    pub discussion: DiscussionId,
}

impl Session {
    /// The collaborator defaults to the page origin, the discussion is given in the url fragment
    pub fn from_location() -> anyhow::Result<Session> {
        let location = web_sys::window()
            .ok_or_else(|| anyhow!("running outside of a browser window"))?
            .location();
        let host = match LocalStorage::get::<String>(KEY_COLLABORATOR_HOST) {
            Ok(host) => host,
            Err(_) => location
                .origin()
                .map_err(|e| anyhow!("reading page origin: {e:?}"))?,
        };
        let hash = location
            .hash()
            .map_err(|e| anyhow!("reading url fragment: {e:?}"))?;
        let discussion = Uuid::parse_str(hash.trim_start_matches('#'))
            .with_context(|| format!("parsing discussion id from url fragment {hash:?}"))?;
        Ok(Session {
            host: host.trim_end_matches('/').to_string(),
            discussion: DiscussionId(discussion),
        })
    }
}

pub fn thread_config() -> ThreadConfig {
    match LocalStorage::get(KEY_THREAD_CONFIG) {
        Ok(c) => c,
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => ThreadConfig::default(),
        Err(err) => {
            tracing::warn!(?err, "invalid thread config in local storage, using defaults");
            ThreadConfig::default()
        }
    }
}
