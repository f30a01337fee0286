//! The five endpoint groups and the slot identifiers that name them.
//!
//! # Design
//! Each group is a thin proxy holding an `Arc<Dispatcher>`; its static
//! endpoint table is reached through [`ModuleSlot::endpoints`]. The
//! [`Module`] trait ties a proxy type to its
//! [`ModuleSlot`] so the client can store every proxy in one map and serve
//! them through a single generic accessor.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dispatcher::Dispatcher;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

pub mod bookmarks;
pub mod comments;
pub mod movies;
pub mod requests;
pub mod user;

pub use bookmarks::BookmarkModule;
pub use comments::CommentModule;
pub use movies::MovieModule;
pub use requests::RequestModule;
pub use user::UserModule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleSlot {
    Bookmarks,
    Comments,
    Movies,
    Requests,
    User,
}

impl ModuleSlot {
    pub const ALL: [ModuleSlot; 5] = [
        ModuleSlot::Bookmarks,
        ModuleSlot::Comments,
        ModuleSlot::Movies,
        ModuleSlot::Requests,
        ModuleSlot::User,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModuleSlot::Bookmarks => "bookmarks",
            ModuleSlot::Comments => "comments",
            ModuleSlot::Movies => "movies",
            ModuleSlot::Requests => "requests",
            ModuleSlot::User => "user",
        }
    }

    /// Name of the builder method that enables this slot.
    pub fn enabling_call(self) -> &'static str {
        match self {
            ModuleSlot::Bookmarks => "with_bookmarks",
            ModuleSlot::Comments => "with_comments",
            ModuleSlot::Movies => "with_movies",
            ModuleSlot::Requests => "with_requests",
            ModuleSlot::User => "with_user",
        }
    }

    /// Endpoint table of the group living in this slot.
    pub fn endpoints(self) -> &'static [Endpoint] {
        match self {
            ModuleSlot::Bookmarks => bookmarks::ENDPOINTS,
            ModuleSlot::Comments => comments::ENDPOINTS,
            ModuleSlot::Movies => movies::ENDPOINTS,
            ModuleSlot::Requests => requests::ENDPOINTS,
            ModuleSlot::User => user::ENDPOINTS,
        }
    }
}

impl fmt::Display for ModuleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleSlot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ModuleSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::Config(format!("unknown module {wanted:?}")))
    }
}

/// A materialised endpoint group, owned by the client map.
#[derive(Debug, Clone)]
pub enum Proxy {
    Bookmarks(BookmarkModule),
    Comments(CommentModule),
    Movies(MovieModule),
    Requests(RequestModule),
    User(UserModule),
}

impl Proxy {
    /// Build the proxy that belongs in `slot`.
    pub fn for_slot(slot: ModuleSlot, dispatcher: &Arc<Dispatcher>) -> Self {
        match slot {
            ModuleSlot::Bookmarks => Proxy::Bookmarks(dispatcher.create()),
            ModuleSlot::Comments => Proxy::Comments(dispatcher.create()),
            ModuleSlot::Movies => Proxy::Movies(dispatcher.create()),
            ModuleSlot::Requests => Proxy::Requests(dispatcher.create()),
            ModuleSlot::User => Proxy::User(dispatcher.create()),
        }
    }

    pub fn slot(&self) -> ModuleSlot {
        match self {
            Proxy::Bookmarks(_) => ModuleSlot::Bookmarks,
            Proxy::Comments(_) => ModuleSlot::Comments,
            Proxy::Movies(_) => ModuleSlot::Movies,
            Proxy::Requests(_) => ModuleSlot::Requests,
            Proxy::User(_) => ModuleSlot::User,
        }
    }
}

/// An endpoint group that can be bound to a dispatcher and stored in a
/// client slot.
pub trait Module: Sized {
    const SLOT: ModuleSlot;

    fn bind(dispatcher: Arc<Dispatcher>) -> Self;

    /// Borrow this group back out of a stored proxy.
    fn from_proxy(proxy: &Proxy) -> Option<&Self>;
}

macro_rules! impl_module {
    ($ty:ty, $slot:ident) => {
        impl Module for $ty {
            const SLOT: ModuleSlot = ModuleSlot::$slot;

            fn bind(dispatcher: Arc<Dispatcher>) -> Self {
                Self { dispatcher }
            }

            fn from_proxy(proxy: &Proxy) -> Option<&Self> {
                match proxy {
                    Proxy::$slot(module) => Some(module),
                    _ => None,
                }
            }
        }
    };
}

impl_module!(BookmarkModule, Bookmarks);
impl_module!(CommentModule, Comments);
impl_module!(MovieModule, Movies);
impl_module!(RequestModule, Requests);
impl_module!(UserModule, User);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpRequest, HttpResponse};
    use crate::LogLevel;

    fn dispatcher() -> Arc<Dispatcher> {
        let transport = |_: HttpRequest| -> Result<HttpResponse> {
            Err(Error::Transport("offline".to_string()))
        };
        Arc::new(Dispatcher::configure("http://localhost", LogLevel::None, Arc::new(transport)).unwrap())
    }

    #[test]
    fn slot_names_round_trip_through_from_str() {
        for slot in ModuleSlot::ALL {
            assert_eq!(slot.as_str().parse::<ModuleSlot>().unwrap(), slot);
        }
        assert_eq!("Movies".parse::<ModuleSlot>().unwrap(), ModuleSlot::Movies);
        assert!(matches!("torrents".parse::<ModuleSlot>(), Err(Error::Config(_))));
    }

    #[test]
    fn proxy_lands_in_its_own_slot() {
        let dispatcher = dispatcher();
        for slot in ModuleSlot::ALL {
            assert_eq!(Proxy::for_slot(slot, &dispatcher).slot(), slot);
        }
    }

    #[test]
    fn from_proxy_only_matches_its_own_variant() {
        let proxy = Proxy::for_slot(ModuleSlot::Movies, &dispatcher());
        assert!(MovieModule::from_proxy(&proxy).is_some());
        assert!(BookmarkModule::from_proxy(&proxy).is_none());
        assert!(UserModule::from_proxy(&proxy).is_none());
    }

    #[test]
    fn each_slot_serves_its_own_table() {
        assert_eq!(ModuleSlot::Movies.endpoints(), movies::ENDPOINTS);
        assert!(ModuleSlot::User.endpoints().contains(&user::KEY));
        assert!(!ModuleSlot::Bookmarks.endpoints().contains(&movies::LIST));
    }

    #[test]
    fn endpoint_names_are_unique_per_group() {
        for slot in ModuleSlot::ALL {
            let endpoints = slot.endpoints();
            assert!(!endpoints.is_empty(), "{slot} has no endpoints");
            for (i, a) in endpoints.iter().enumerate() {
                for b in &endpoints[i + 1..] {
                    assert_ne!(a.name, b.name, "{slot}: duplicate endpoint");
                }
            }
        }
    }
}
