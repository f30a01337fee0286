//! Client registry: module selection, build, and slot accessors.
//!
//! # Design
//! A fresh [`Builder`] selects every module. The first `with_*` call
//! switches it to an explicit subset containing only the modules named from
//! then on; there is no way back. [`Builder::build`] consumes the builder,
//! so a configuration cannot be reused or mutated after the client exists.
//!
//! The resulting [`YtsClient`] keeps one proxy per selected slot. Asking for
//! any other slot is a caller bug and fails with
//! [`Error::ModuleNotLoaded`], never with a silently constructed proxy.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::dispatcher::{validate_base_url, Dispatcher, LogLevel, DEFAULT_BASE_URL};
use crate::error::{Error, Result};
use crate::modules::{
    BookmarkModule, CommentModule, Module, ModuleSlot, MovieModule, Proxy, RequestModule,
    UserModule,
};
use crate::transport::{Transport, UreqTransport};

/// Which slots a builder will populate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Subset(BTreeSet<ModuleSlot>),
}

impl Selection {
    /// Add `slot`, leaving `All` for a subset if needed.
    pub fn enable(&mut self, slot: ModuleSlot) {
        match self {
            Selection::All => *self = Selection::Subset(BTreeSet::from([slot])),
            Selection::Subset(slots) => {
                slots.insert(slot);
            }
        }
    }

    pub fn contains(&self, slot: ModuleSlot) -> bool {
        match self {
            Selection::All => true,
            Selection::Subset(slots) => slots.contains(&slot),
        }
    }

    /// The effective slot set, in declaration order.
    pub fn slots(&self) -> Vec<ModuleSlot> {
        ModuleSlot::ALL
            .into_iter()
            .filter(|slot| self.contains(*slot))
            .collect()
    }
}

#[derive(Clone)]
pub struct Builder {
    base_url: String,
    log_level: LogLevel,
    selection: Selection,
    transport: Option<Arc<dyn Transport>>,
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("base_url", &self.base_url)
            .field("log_level", &self.log_level)
            .field("selection", &self.selection)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: LogLevel::None,
            selection: Selection::All,
            transport: None,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded [`ClientConfig`]. An explicit module list must
    /// name at least one module.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Self::new().base_url(&config.base_url)?.log_level(config.log_level);
        if let Some(modules) = &config.modules {
            if modules.is_empty() {
                return Err(Error::Config(
                    "module list is set but names no module".to_string(),
                ));
            }
            for slot in modules {
                builder = builder.with(*slot);
            }
        }
        Ok(builder)
    }

    /// Point the client at another API root. Fails on an empty or
    /// scheme-less URL.
    pub fn base_url(mut self, url: &str) -> Result<Self> {
        self.base_url = validate_base_url(url)?;
        Ok(self)
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Replace the default ureq transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn with(mut self, slot: ModuleSlot) -> Self {
        self.selection.enable(slot);
        self
    }

    pub fn with_bookmarks(self) -> Self {
        self.with(ModuleSlot::Bookmarks)
    }

    pub fn with_comments(self) -> Self {
        self.with(ModuleSlot::Comments)
    }

    pub fn with_movies(self) -> Self {
        self.with(ModuleSlot::Movies)
    }

    pub fn with_requests(self) -> Self {
        self.with(ModuleSlot::Requests)
    }

    pub fn with_user(self) -> Self {
        self.with(ModuleSlot::User)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Materialise one proxy per selected slot. Every field was validated
    /// by its setter, so building cannot fail.
    pub fn build(self) -> YtsClient {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(UreqTransport::new()));
        let dispatcher = Arc::new(Dispatcher::from_validated(
            self.base_url,
            self.log_level,
            transport,
        ));

        let modules = self
            .selection
            .slots()
            .into_iter()
            .map(|slot| (slot, Proxy::for_slot(slot, &dispatcher)))
            .collect();

        tracing::debug!(
            base_url = dispatcher.base_url(),
            modules = ?self.selection.slots(),
            "built YTS client"
        );
        YtsClient {
            dispatcher,
            modules,
        }
    }
}

/// Entry point to the API. Cheap to clone; safe to share across threads.
#[derive(Debug, Clone)]
pub struct YtsClient {
    dispatcher: Arc<Dispatcher>,
    modules: BTreeMap<ModuleSlot, Proxy>,
}

impl YtsClient {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Generic accessor behind the named ones.
    pub fn module<M: Module>(&self) -> Result<&M> {
        self.modules
            .get(&M::SLOT)
            .and_then(M::from_proxy)
            .ok_or(Error::ModuleNotLoaded { slot: M::SLOT })
    }

    pub fn get(&self, slot: ModuleSlot) -> Result<&Proxy> {
        self.modules
            .get(&slot)
            .ok_or(Error::ModuleNotLoaded { slot })
    }

    pub fn is_loaded(&self, slot: ModuleSlot) -> bool {
        self.modules.contains_key(&slot)
    }

    pub fn loaded_modules(&self) -> impl Iterator<Item = ModuleSlot> + '_ {
        self.modules.keys().copied()
    }

    pub fn bookmarks(&self) -> Result<&BookmarkModule> {
        self.module()
    }

    pub fn comments(&self) -> Result<&CommentModule> {
        self.module()
    }

    pub fn movies(&self) -> Result<&MovieModule> {
        self.module()
    }

    pub fn requests(&self) -> Result<&RequestModule> {
        self.module()
    }

    pub fn user(&self) -> Result<&UserModule> {
        self.module()
    }
}
