use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{info, instrument};

use social_core::contest::{PostTally, PurgeReport, RoundSettlement};
use social_core::entities::{Comment, Follow, Like, Notification, Post, User, WallOfFameEntry};
use social_core::error::DomainError;
use social_core::traits::{
    CommentRepository, ContestRepository, FollowRepository, LikeRepository,
    NotificationRepository, PostRepository, RepoResult, UserRepository, WallOfFameRepository,
};
use social_core::value_objects::Snowflake;

type Pair = (Snowflake, Snowflake);

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<Snowflake, User>,
    posts: BTreeMap<Snowflake, Post>,
    /// keyed by (post_id, user_id)
    likes: BTreeMap<Pair, Like>,
    comments: BTreeMap<Snowflake, Comment>,
    /// keyed by (follower_id, followed_id)
    follows: BTreeMap<Pair, Follow>,
    notifications: BTreeMap<Snowflake, Notification>,
    wall_of_fame: BTreeMap<Snowflake, WallOfFameEntry>,
}

impl Tables {
    fn user_by_token(&self, token_identifier: &str) -> Option<&User> {
        self.users
            .values()
            .find(|u| u.token_identifier == token_identifier)
    }

    fn purge_post(&mut self, post_id: Snowflake) -> (usize, usize) {
        let likes_before = self.likes.len();
        self.likes.retain(|(p, _), _| *p != post_id);
        let comments_before = self.comments.len();
        self.comments.retain(|_, c| c.post_id != post_id);
        self.posts.remove(&post_id);
        (
            likes_before - self.likes.len(),
            comments_before - self.comments.len(),
        )
    }
}

/// Shared handle to the in-memory tables; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> K) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn find_by_token(&self, token_identifier: &str) -> RepoResult<Option<User>> {
        Ok(self.tables.read().user_by_token(token_identifier).cloned())
    }

    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        let tables = self.tables.read();
        let wanted: BTreeSet<_> = ids.iter().copied().collect();
        Ok(wanted
            .into_iter()
            .filter_map(|id| tables.users.get(&id).cloned())
            .collect())
    }

    async fn list(&self) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self.tables.read().users.values().cloned().collect();
        // named users first, like NULLS LAST
        users.sort_by(|a, b| {
            (a.name.is_none(), &a.name, a.id).cmp(&(b.name.is_none(), &b.name, b.id))
        });
        Ok(users)
    }

    #[instrument(skip(self, user), fields(token_identifier = %user.token_identifier))]
    async fn upsert(&self, user: &User) -> RepoResult<User> {
        let mut tables = self.tables.write();
        let current = tables
            .users
            .values_mut()
            .find(|u| u.token_identifier == user.token_identifier);
        if let Some(current) = current {
            current.name.clone_from(&user.name);
            current.email.clone_from(&user.email);
            current.avatar_url.clone_from(&user.avatar_url);
            current.updated_at = user.updated_at;
            return Ok(current.clone());
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update_profile(&self, user: &User) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let current = tables
            .users
            .get_mut(&user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        current.name.clone_from(&user.name);
        current.email.clone_from(&user.email);
        current.avatar_url.clone_from(&user.avatar_url);
        current.updated_at = user.updated_at;
        Ok(())
    }

    async fn set_online(&self, token_identifier: &str, online: bool) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let user = tables
            .users
            .values_mut()
            .find(|u| u.token_identifier == token_identifier)
            .ok_or_else(|| DomainError::IdentityNotFound(token_identifier.to_string()))?;
        user.is_online = online;
        user.updated_at = Utc::now();
        Ok(())
    }
}

// ============================================================================
// Posts
// ============================================================================

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.tables.read().posts.get(&id).cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Post>> {
        let mut posts: Vec<Post> = self.tables.read().posts.values().cloned().collect();
        newest_first(&mut posts, |p| (p.created_at, p.id));
        Ok(posts)
    }

    async fn find_by_creator(&self, creator_id: Snowflake) -> RepoResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .tables
            .read()
            .posts
            .values()
            .filter(|p| p.creator_id == creator_id)
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.id));
        Ok(posts)
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&post.creator_id) {
            return Err(DomainError::UserNotFound(post.creator_id));
        }
        if tables.posts.contains_key(&post.id) {
            return Err(DomainError::InternalError(format!("duplicate post id {}", post.id)));
        }
        tables.posts.insert(post.id, post.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_cascade(&self, id: Snowflake) -> RepoResult<()> {
        let (likes, comments) = self.tables.write().purge_post(id);
        info!(post_id = %id, likes, comments, "Post removed with its likes and comments");
        Ok(())
    }
}

// ============================================================================
// Likes
// ============================================================================

#[async_trait]
impl LikeRepository for MemoryStore {
    async fn find(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Like>> {
        Ok(self.tables.read().likes.get(&(post_id, user_id)).cloned())
    }

    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64> {
        let count = self
            .tables
            .read()
            .likes
            .range((post_id, Snowflake::new(i64::MIN))..=(post_id, Snowflake::new(i64::MAX)))
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn create_with_notification(
        &self,
        like: &Like,
        notification: Option<&Notification>,
    ) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.posts.contains_key(&like.post_id) {
            return Err(DomainError::PostNotFound(like.post_id));
        }
        let key = (like.post_id, like.user_id);
        if tables.likes.contains_key(&key) {
            return Err(DomainError::LikeConflict);
        }
        tables.likes.insert(key, like.clone());
        if let Some(n) = notification {
            tables.notifications.insert(n.id, n.clone());
        }
        Ok(())
    }

    async fn delete_with_notification(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        recipient: Snowflake,
    ) -> RepoResult<bool> {
        let mut tables = self.tables.write();
        if tables.likes.remove(&(post_id, user_id)).is_none() {
            return Ok(false);
        }
        let oldest = tables
            .notifications
            .values()
            .filter(|n| n.matches_like(recipient, post_id, user_id))
            .min_by_key(|n| (n.created_at, n.id))
            .map(|n| n.id);
        if let Some(id) = oldest {
            tables.notifications.remove(&id);
        }
        Ok(true)
    }
}

// ============================================================================
// Comments
// ============================================================================

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.tables.read().comments.get(&id).cloned())
    }

    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .tables
            .read()
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        Ok(comments)
    }

    async fn create_with_notification(
        &self,
        comment: &Comment,
        notification: Option<&Notification>,
    ) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }
        tables.comments.insert(comment.id, comment.clone());
        if let Some(n) = notification {
            tables.notifications.insert(n.id, n.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tables.write().comments.remove(&id);
        Ok(())
    }
}

// ============================================================================
// Follows
// ============================================================================

#[async_trait]
impl FollowRepository for MemoryStore {
    async fn find(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<Option<Follow>> {
        Ok(self
            .tables
            .read()
            .follows
            .get(&(follower_id, followed_id))
            .cloned())
    }

    async fn follower_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let mut edges: Vec<Follow> = self
            .tables
            .read()
            .follows
            .values()
            .filter(|f| f.followed_id == user_id)
            .cloned()
            .collect();
        edges.sort_by_key(|f| f.created_at);
        Ok(edges.into_iter().map(|f| f.follower_id).collect())
    }

    async fn following_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let mut edges: Vec<Follow> = self
            .tables
            .read()
            .follows
            .values()
            .filter(|f| f.follower_id == user_id)
            .cloned()
            .collect();
        edges.sort_by_key(|f| f.created_at);
        Ok(edges.into_iter().map(|f| f.followed_id).collect())
    }

    async fn create_with_notification(
        &self,
        follow: &Follow,
        notification: &Notification,
    ) -> RepoResult<()> {
        let mut tables = self.tables.write();
        for id in [follow.follower_id, follow.followed_id] {
            if !tables.users.contains_key(&id) {
                return Err(DomainError::UserNotFound(id));
            }
        }
        let key = (follow.follower_id, follow.followed_id);
        if tables.follows.contains_key(&key) {
            return Err(DomainError::AlreadyFollowing);
        }
        tables.follows.insert(key, follow.clone());
        tables.notifications.insert(notification.id, notification.clone());
        Ok(())
    }

    async fn delete_with_notification(
        &self,
        follower_id: Snowflake,
        followed_id: Snowflake,
        notification: &Notification,
    ) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if tables.follows.remove(&(follower_id, followed_id)).is_none() {
            return Err(DomainError::NotFollowing);
        }
        tables.notifications.insert(notification.id, notification.clone());
        Ok(())
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        Ok(self.tables.read().notifications.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>> {
        let mut items: Vec<Notification> = self
            .tables
            .read()
            .notifications
            .values()
            .filter(|n| n.is_addressed_to(user_id))
            .cloned()
            .collect();
        newest_first(&mut items, |n| (n.created_at, n.id));
        Ok(items)
    }

    async fn mark_read(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let n = tables
            .notifications
            .get_mut(&id)
            .ok_or(DomainError::NotificationNotFound(id))?;
        n.is_read = true;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64> {
        let mut changed = 0;
        for n in self.tables.write().notifications.values_mut() {
            if n.is_addressed_to(user_id) && !n.is_read {
                n.is_read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

// ============================================================================
// Wall of fame and contest
// ============================================================================

#[async_trait]
impl WallOfFameRepository for MemoryStore {
    async fn latest(&self) -> RepoResult<Option<WallOfFameEntry>> {
        Ok(self
            .tables
            .read()
            .wall_of_fame
            .values()
            .max_by_key(|e| (e.archived_at, e.id))
            .cloned())
    }
}

#[async_trait]
impl ContestRepository for MemoryStore {
    async fn tally(&self) -> RepoResult<Vec<PostTally>> {
        let tables = self.tables.read();
        let mut posts: Vec<&Post> = tables.posts.values().collect();
        posts.sort_by_key(|p| (p.created_at, p.id));

        let mut likes: BTreeMap<Snowflake, i64> = BTreeMap::new();
        for (post_id, _) in tables.likes.keys() {
            *likes.entry(*post_id).or_default() += 1;
        }

        Ok(posts
            .into_iter()
            .map(|p| PostTally {
                post: p.clone(),
                likes: likes.get(&p.id).copied().unwrap_or(0),
            })
            .collect())
    }

    #[instrument(skip(self, settlement), fields(post_id = %settlement.entry.post_id))]
    async fn settle(&self, settlement: &RoundSettlement) -> RepoResult<PurgeReport> {
        let mut tables = self.tables.write();
        if !tables.posts.contains_key(&settlement.entry.post_id) {
            return Err(DomainError::PostNotFound(settlement.entry.post_id));
        }

        let report = PurgeReport {
            notifications: std::mem::take(&mut tables.notifications).len() as u64,
            archive_entries: std::mem::take(&mut tables.wall_of_fame).len() as u64,
            likes: std::mem::take(&mut tables.likes).len() as u64,
            comments: std::mem::take(&mut tables.comments).len() as u64,
            posts: std::mem::take(&mut tables.posts).len() as u64,
        };

        tables
            .wall_of_fame
            .insert(settlement.entry.id, settlement.entry.clone());
        tables
            .notifications
            .insert(settlement.announcement.id, settlement.announcement.clone());

        info!(
            notifications = report.notifications,
            likes = report.likes,
            comments = report.comments,
            posts = report.posts,
            "Contest round settled"
        );
        Ok(report)
    }
}
