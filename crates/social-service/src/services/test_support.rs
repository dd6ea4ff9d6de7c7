//! Fixtures for service tests: a context over the in-process store

use std::sync::Arc;

use social_core::entities::{AuthenticatedCaller, User};
use social_core::traits::{ContestRepository, UserRepository};
use social_core::Snowflake;
use social_db::{MemoryMediaStore, MemoryStore};

use crate::dto::CreatePostRequest;

use super::context::{ServiceContext, ServiceContextBuilder};
use super::post::PostService;

pub(crate) const APP_DOMAIN: &str = "test.dev";
pub(crate) const MEDIA_BASE: &str = "http://media.test";

pub(crate) struct Fixture {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryStore>,
    pub media: Arc<MemoryMediaStore>,
}

fn builder(store: &Arc<MemoryStore>, media: &Arc<MemoryMediaStore>) -> ServiceContextBuilder {
    ServiceContextBuilder::new()
        .store(store.clone())
        .media_store(media.clone())
        .app_domain(APP_DOMAIN)
}

pub(crate) fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let media = Arc::new(MemoryMediaStore::new(MEDIA_BASE));
    let ctx = builder(&store, &media).build().unwrap();
    Fixture { ctx, store, media }
}

/// Same store, different contest repository
pub(crate) fn fixture_with_contest_repo(
    make: impl FnOnce(Arc<MemoryStore>) -> Arc<dyn ContestRepository>,
) -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let media = Arc::new(MemoryMediaStore::new(MEDIA_BASE));
    let ctx = builder(&store, &media)
        .contest_repo(make(store.clone()))
        .build()
        .unwrap();
    Fixture { ctx, store, media }
}

impl Fixture {
    pub async fn user(&self, name: &str) -> AuthenticatedCaller {
        let id = self.ctx.generate_id();
        let token = User::token_identifier_for(APP_DOMAIN, &format!("user_{id}"));
        let mut user = User::new(id, token.clone(), format!("{}@example.com", name.to_lowercase()));
        user.name = Some(name.to_string());
        self.store.upsert(&user).await.unwrap();
        AuthenticatedCaller::new(id, token)
    }

    pub async fn post(&self, caller: &AuthenticatedCaller, title: &str) -> Snowflake {
        let request = CreatePostRequest {
            creator_id: caller.id,
            title: title.to_string(),
            media_ref: None,
            description: None,
        };
        let post = PostService::new(&self.ctx).create_post(caller, request).await.unwrap();
        post.id.parse().unwrap()
    }
}
