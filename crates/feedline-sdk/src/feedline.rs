use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use feedline_crypto::{Argon2Hasher, CredentialHasher};
use feedline_feed::FeedAssembler;
use feedline_graph::{FollowGraph, InMemoryFollowGraph};
use feedline_identity::{IdentityService, InMemoryUserStore, UserStore};
use feedline_posts::{InMemoryPostStore, PostService, PostStore};
use feedline_types::{Clock, SystemClock, UserId, UserSummary};

use crate::auth::AuthContext;
use crate::config::FeedlineConfig;
use crate::error::{ApiError, ApiResult};
use crate::views::{Created, FeedItem, PostView, Profile};

/// Storage and capability backends a [`Feedline`] is assembled from.
pub struct Components {
    pub users: Arc<dyn UserStore>,
    pub graph: Arc<dyn FollowGraph>,
    pub posts: Arc<dyn PostStore>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub clock: Arc<dyn Clock>,
}

impl Components {
    /// In-memory stores with the given hasher and clock.
    pub fn in_memory(hasher: Arc<dyn CredentialHasher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::new()),
            graph: Arc::new(InMemoryFollowGraph::new()),
            posts: Arc::new(InMemoryPostStore::new()),
            hasher,
            clock,
        }
    }
}

impl Default for Components {
    fn default() -> Self {
        Self::in_memory(Arc::new(Argon2Hasher::new()), Arc::new(SystemClock::new()))
    }
}

/// The social-feed operation surface.
///
/// Each method is one logical request. Acting methods take the caller's
/// [`AuthContext`] and fail with `Unauthenticated` when it is anonymous or
/// names an account that does not exist.
pub struct Feedline {
    identity: IdentityService,
    graph: Arc<dyn FollowGraph>,
    posts: PostService,
    feeds: FeedAssembler,
}

impl Feedline {
    /// In-memory instance with production hashing and the system clock.
    pub fn new(config: FeedlineConfig) -> Self {
        Self::with_components(config, Components::default())
    }

    pub fn with_components(config: FeedlineConfig, components: Components) -> Self {
        let identity = IdentityService::new(
            components.users,
            components.hasher,
            config.identity_limits(),
        );
        let posts = PostService::with_limit(
            Arc::clone(&components.posts),
            components.clock,
            config.max_post_chars,
        );
        let feeds = FeedAssembler::new(Arc::clone(&components.graph), components.posts);
        Self {
            identity,
            graph: components.graph,
            posts,
            feeds,
        }
    }

    // ---- Identity ----

    pub fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<Created<UserSummary>> {
        let id = self.identity.register(username, email, password)?;
        let user = self.identity.require_user(id)?;
        Ok(Created(user.summary()))
    }

    /// Check credentials and return a verified context for later calls.
    pub fn authenticate(&self, email: &str, password: &str) -> ApiResult<AuthContext> {
        let id = self.identity.authenticate(email, password)?;
        Ok(AuthContext::verified(id))
    }

    /// The account behind `ctx`.
    pub fn current_user(&self, ctx: &AuthContext) -> ApiResult<UserSummary> {
        let me = self.acting_user(ctx)?;
        Ok(self.identity.require_user(me)?.summary())
    }

    pub fn change_password(&self, ctx: &AuthContext, current: &str, new: &str) -> ApiResult<()> {
        let me = self.acting_user(ctx)?;
        self.identity.change_password(me, current, new)?;
        Ok(())
    }

    // ---- Social graph ----

    /// Follow `target_username`. Following someone twice is a conflict.
    pub fn follow(&self, ctx: &AuthContext, target_username: &str) -> ApiResult<UserSummary> {
        let me = self.acting_user(ctx)?;
        let target = self.user_named(target_username)?;

        if !self.graph.follow(me, target.id)? {
            return Err(ApiError::AlreadyFollowing(target.username));
        }
        tracing::info!(user = %me, target = %target.id, "followed");
        Ok(target)
    }

    /// Stop following `target_username`.
    pub fn unfollow(&self, ctx: &AuthContext, target_username: &str) -> ApiResult<UserSummary> {
        let me = self.acting_user(ctx)?;
        let target = self.user_named(target_username)?;

        if !self.graph.unfollow(me, target.id)? {
            return Err(ApiError::NotFollowing(target.username));
        }
        tracing::info!(user = %me, target = %target.id, "unfollowed");
        Ok(target)
    }

    /// Everyone following the caller, ascending by id.
    pub fn followers(&self, ctx: &AuthContext) -> ApiResult<Vec<UserSummary>> {
        let me = self.acting_user(ctx)?;
        let ids = self.graph.followers_of(me)?;
        Ok(self.identity.summaries(ids)?)
    }

    /// Everyone the caller follows, ascending by id.
    pub fn following(&self, ctx: &AuthContext) -> ApiResult<Vec<UserSummary>> {
        let me = self.acting_user(ctx)?;
        let ids = self.graph.following_of(me)?;
        Ok(self.identity.summaries(ids)?)
    }

    /// Public counters for `username`. Does not require authentication.
    pub fn profile(&self, username: &str) -> ApiResult<Profile> {
        let user = self.user_named(username)?;
        Ok(Profile {
            followers: self.graph.follower_count(user.id)?,
            following: self.graph.following_count(user.id)?,
            posts: self.posts.store().count_by_author(user.id)?,
            id: user.id,
            username: user.username,
        })
    }

    // ---- Posts and feed ----

    pub fn create_post(&self, ctx: &AuthContext, content: &str) -> ApiResult<Created<PostView>> {
        let me = self.acting_user(ctx)?;
        let post = self.posts.create(me, content)?;
        Ok(Created(post.into()))
    }

    /// The caller's own posts, newest first.
    pub fn my_posts(&self, ctx: &AuthContext) -> ApiResult<Vec<PostView>> {
        let me = self.acting_user(ctx)?;
        let posts = self.posts.posts_by_author(me)?;
        Ok(posts.into_iter().map(PostView::from).collect())
    }

    /// The caller's feed: own posts plus posts by everyone they follow,
    /// newest first.
    pub fn feed(&self, ctx: &AuthContext) -> ApiResult<Vec<FeedItem>> {
        let me = self.acting_user(ctx)?;
        let posts = self.feeds.feed_for(me)?;

        let authors: BTreeSet<UserId> = posts.iter().map(|p| p.author_id).collect();
        let names: HashMap<UserId, String> = self
            .identity
            .summaries(authors)?
            .into_iter()
            .map(|s| (s.id, s.username))
            .collect();

        posts
            .into_iter()
            .map(|post| {
                let author = names
                    .get(&post.author_id)
                    .cloned()
                    .ok_or_else(|| ApiError::Internal(format!("author {} of {} missing", post.author_id, post.id)))?;
                Ok(FeedItem {
                    id: post.id,
                    author,
                    content: post.content,
                    timestamp: post.timestamp,
                })
            })
            .collect()
    }

    // ---- Helpers ----

    /// The caller's id, provided the context is verified and the account exists.
    fn acting_user(&self, ctx: &AuthContext) -> ApiResult<UserId> {
        let id = ctx.require()?;
        if !self.identity.exists(id)? {
            tracing::warn!(user = %id, "context names unknown user");
            return Err(ApiError::Unauthenticated);
        }
        Ok(id)
    }

    fn user_named(&self, username: &str) -> ApiResult<UserSummary> {
        self.identity
            .user_by_username(username)?
            .map(|u| u.summary())
            .ok_or_else(|| ApiError::UserNotFound(username.to_string()))
    }
}
