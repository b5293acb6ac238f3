// API payload types

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Success body for participant mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn signed_up(email: &str, activity: &str) -> Self {
        Self {
            message: format!("Signed up {email} for {activity}"),
        }
    }

    pub fn removed(email: &str, activity: &str) -> Self {
        Self {
            message: format!("Removed {email} from {activity}"),
        }
    }
}

/// A request path under `/activities`, with the activity name percent-decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityRoute<'a> {
    /// `/activities`
    List,
    /// `/activities/{activity}`
    Detail(Cow<'a, str>),
    /// `/activities/{activity}/signup`
    Signup(Cow<'a, str>),
    /// `/activities/{activity}/participants`
    Participants(Cow<'a, str>),
}

impl<'a> ActivityRoute<'a> {
    pub const PREFIX: &'static str = "/activities";

    /// Match `path` against the activity routes
    ///
    /// Returns `None` for paths outside `/activities`, unknown sub-resources,
    /// empty names, and names that are not valid percent-encoded UTF-8.
    pub fn parse(path: &'a str) -> Option<Self> {
        let rest = path.strip_prefix(Self::PREFIX)?;
        if rest.is_empty() || rest == "/" {
            return Some(Self::List);
        }

        let rest = rest.strip_prefix('/')?;
        let (raw_name, action) = match rest.split_once('/') {
            Some((name, action)) => (name, Some(action)),
            None => (rest, None),
        };

        let name = urlencoding::decode(raw_name).ok()?;
        if name.is_empty() {
            return None;
        }

        match action {
            None | Some("") => Some(Self::Detail(name)),
            Some("signup") => Some(Self::Signup(name)),
            Some("participants") => Some(Self::Participants(name)),
            Some(_) => None,
        }
    }

    /// Value of the `Allow` header for this route
    pub const fn allowed_methods(&self) -> &'static str {
        match self {
            Self::List | Self::Detail(_) => "GET, HEAD",
            Self::Signup(_) => "POST",
            Self::Participants(_) => "DELETE",
        }
    }
}
