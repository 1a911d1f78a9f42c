//! Endpoint-specific names for [`Resource`].

use std::fmt;
use std::ops::Deref;

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::{Field, Resource, json_kind};
use crate::error::TypeError;

macro_rules! resource_variant {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq)]
        pub struct $name(Resource);

        impl $name {
            /// Returns the underlying resource.
            pub fn as_resource(&self) -> &Resource {
                &self.0
            }
        }

        impl From<Resource> for $name {
            fn from(resource: Resource) -> Self {
                Self(resource)
            }
        }

        impl TryFrom<Value> for $name {
            type Error = TypeError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                Resource::try_from(value).map(Self)
            }
        }

        impl Deref for $name {
            type Target = Resource;

            fn deref(&self) -> &Resource {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                self.0.serialize(serializer)
            }
        }
    };
}

resource_variant! {
    /// A post or record, as returned by getRecord or inside a feed.
    #[derive(Debug)]
    Post
}

resource_variant! {
    /// An actor profile from `app.bsky.actor.getProfile`.
    #[derive(Debug)]
    Profile
}

resource_variant! {
    /// The body of a successful `com.atproto.server.createSession`.
    ///
    /// Debug output redacts `accessJwt` and `refreshJwt`.
    Session
}

impl Session {
    /// The bearer token for authenticated requests.
    pub fn access_jwt(&self) -> Result<&str, TypeError> {
        self.0.require_str("accessJwt")
    }

    /// The DID of the account's repository.
    pub fn did(&self) -> Result<&str, TypeError> {
        self.0.require_str("did")
    }

    pub fn handle(&self) -> Option<&str> {
        self.0.get_str("handle")
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("did", &self.0.get_str("did"))
            .field("handle", &self.handle())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

/// The posts of an author feed, in server order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feed {
    pub posts: Vec<Post>,
}

impl Feed {
    /// Extract the posts from a `{"feed": [{"post": {...}}, ...]}` body.
    pub fn from_response(body: &Resource) -> Result<Self, TypeError> {
        let entries = match body.get("feed") {
            Some(Field::List(entries)) => entries,
            Some(_) => {
                return Err(TypeError::WrongFieldType {
                    field: "feed".to_string(),
                    expected: "an array",
                });
            }
            None => {
                return Err(TypeError::MissingField {
                    field: "feed".to_string(),
                });
            }
        };

        let posts = entries
            .iter()
            .map(|entry| {
                let post = entry
                    .as_resource()
                    .and_then(|entry| entry.get_resource("post"))
                    .ok_or_else(|| TypeError::MissingField {
                        field: "feed[].post".to_string(),
                    })?;
                Ok(Post(post.clone()))
            })
            .collect::<Result<Vec<_>, TypeError>>()?;

        Ok(Self { posts })
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }
}

impl TryFrom<Value> for Feed {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Self::from_response(&Resource::from_object(map)),
            other => Err(TypeError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }
}

impl IntoIterator for Feed {
    type Item = Post;
    type IntoIter = std::vec::IntoIter<Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.into_iter()
    }
}

impl<'a> IntoIterator for &'a Feed {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}
