//! JSON scripts of operations executed against one in-memory instance.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use feedline_sdk::{ApiError, ApiResult, AuthContext, Created, Feedline, ManualClock};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One operation in a script.
///
/// Acting steps name the caller with `"as"`. The caller's context comes from
/// an earlier `login` step; a name with no session acts anonymously.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    Register {
        #[serde(default)]
        username: String,
        #[serde(default)]
        email: String,
        #[serde(default)]
        password: String,
    },
    Login {
        #[serde(default)]
        email: String,
        #[serde(default)]
        password: String,
    },
    Follow {
        #[serde(rename = "as")]
        actor: String,
        target: String,
    },
    Unfollow {
        #[serde(rename = "as")]
        actor: String,
        target: String,
    },
    Post {
        #[serde(rename = "as")]
        actor: String,
        #[serde(default)]
        content: String,
    },
    Followers {
        #[serde(rename = "as")]
        actor: String,
    },
    Following {
        #[serde(rename = "as")]
        actor: String,
    },
    MyPosts {
        #[serde(rename = "as")]
        actor: String,
    },
    Feed {
        #[serde(rename = "as")]
        actor: String,
    },
    Profile {
        username: String,
    },
    ChangePassword {
        #[serde(rename = "as")]
        actor: String,
        #[serde(default)]
        current: String,
        #[serde(default)]
        new: String,
    },
}

impl Step {
    pub fn op(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::Login { .. } => "login",
            Self::Follow { .. } => "follow",
            Self::Unfollow { .. } => "unfollow",
            Self::Post { .. } => "post",
            Self::Followers { .. } => "followers",
            Self::Following { .. } => "following",
            Self::MyPosts { .. } => "my-posts",
            Self::Feed { .. } => "feed",
            Self::Profile { .. } => "profile",
            Self::ChangePassword { .. } => "change-password",
        }
    }
}

/// Parse a script: a JSON array of steps.
pub fn parse_script(raw: &str) -> serde_json::Result<Vec<Step>> {
    serde_json::from_str(raw)
}

/// Result of one step: status code and payload (or error body).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outcome {
    pub op: &'static str,
    pub status: u16,
    pub body: Value,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.status < 300
    }
}

pub struct Runner {
    app: Feedline,
    sessions: HashMap<String, AuthContext>,
    ticker: Option<(Arc<ManualClock>, Duration)>,
}

impl Runner {
    pub fn new(app: Feedline) -> Self {
        Self {
            app,
            sessions: HashMap::new(),
            ticker: None,
        }
    }

    /// Advance `clock` by `every` after each step.
    pub fn with_ticker(mut self, clock: Arc<ManualClock>, every: Duration) -> Self {
        self.ticker = Some((clock, every));
        self
    }

    pub fn execute(&mut self, step: &Step) -> Outcome {
        let (status, body) = match self.dispatch(step) {
            Ok(ok) => ok,
            Err(err) => {
                tracing::debug!(op = step.op(), code = err.code(), "step failed");
                (err.status(), err.to_json())
            }
        };
        if let Some((clock, every)) = &self.ticker {
            clock.advance(*every);
        }
        Outcome {
            op: step.op(),
            status,
            body,
        }
    }

    pub fn execute_all(&mut self, steps: &[Step]) -> Vec<Outcome> {
        steps.iter().map(|s| self.execute(s)).collect()
    }

    fn session(&self, username: &str) -> AuthContext {
        self.sessions.get(username).copied().unwrap_or_default()
    }

    fn dispatch(&mut self, step: &Step) -> ApiResult<(u16, Value)> {
        let app = &self.app;
        match step {
            Step::Register { username, email, password } => {
                created(app.register(username, email, password)?)
            }
            Step::Login { email, password } => {
                let ctx = app.authenticate(email, password)?;
                let me = app.current_user(&ctx)?;
                self.sessions.insert(me.username.clone(), ctx);
                ok(me)
            }
            Step::Follow { actor, target } => ok(app.follow(&self.session(actor), target)?),
            Step::Unfollow { actor, target } => ok(app.unfollow(&self.session(actor), target)?),
            Step::Post { actor, content } => created(app.create_post(&self.session(actor), content)?),
            Step::Followers { actor } => ok(app.followers(&self.session(actor))?),
            Step::Following { actor } => ok(app.following(&self.session(actor))?),
            Step::MyPosts { actor } => ok(app.my_posts(&self.session(actor))?),
            Step::Feed { actor } => ok(app.feed(&self.session(actor))?),
            Step::Profile { username } => ok(app.profile(username)?),
            Step::ChangePassword { actor, current, new } => {
                app.change_password(&self.session(actor), current, new)?;
                ok(serde_json::json!({ "message": "password updated" }))
            }
        }
    }
}

fn ok<T: Serialize>(value: T) -> ApiResult<(u16, Value)> {
    Ok((feedline_sdk::views::OK, to_json(value)?))
}

fn created<T: Serialize>(value: Created<T>) -> ApiResult<(u16, Value)> {
    Ok((Created::<T>::STATUS, to_json(value)?))
}

fn to_json<T: Serialize>(value: T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}

/// Two users, one follow, a post each, the feed before and after unfollowing.
pub fn demo_steps() -> Vec<Step> {
    let register = |name: &str| Step::Register {
        username: name.into(),
        email: format!("{name}@example.com"),
        password: "pw123".into(),
    };
    let login = |name: &str| Step::Login {
        email: format!("{name}@example.com"),
        password: "pw123".into(),
    };
    let feed = || Step::Feed { actor: "alice".into() };

    vec![
        register("alice"),
        register("bob"),
        login("alice"),
        login("bob"),
        Step::Follow { actor: "alice".into(), target: "bob".into() },
        Step::Post { actor: "bob".into(), content: "hello".into() },
        Step::Post { actor: "alice".into(), content: "hi".into() },
        feed(),
        Step::Followers { actor: "bob".into() },
        Step::Profile { username: "bob".into() },
        Step::Unfollow { actor: "alice".into(), target: "bob".into() },
        feed(),
    ]
}
