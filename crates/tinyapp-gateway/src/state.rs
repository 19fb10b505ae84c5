use std::sync::Arc;

use crate::seed::demo_records;
use crate::session::SessionAccessor;
use tinyapp_generator::RandomGenerator;
use tinyapp_redirector::{Redirector, RedirectorService};
use tinyapp_shortener::{AccountService, Accounts, Argon2Hasher, Shortener, ShortenerService};
use tinyapp_storage::{InMemoryAliasRepository, InMemoryUserRepository};
use tracing::info;
use typed_builder::TypedBuilder;

#[derive(Clone)]
pub struct AppState {
    pub(crate) shortener: Arc<dyn Shortener>,
    pub(crate) accounts: Arc<dyn Accounts>,
    pub(crate) redirector: Arc<dyn Redirector>,
    pub(crate) session: Arc<dyn SessionAccessor>,
    pub(crate) base_url: String,
}

impl AppState {
    pub fn new(
        shortener: Arc<dyn Shortener>,
        accounts: Arc<dyn Accounts>,
        redirector: Arc<dyn Redirector>,
        session: Arc<dyn SessionAccessor>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            shortener,
            accounts,
            redirector,
            session,
            base_url: public_base_url.into(),
        }
    }
}

/// Wires the services over process-local stores.
#[derive(TypedBuilder)]
pub struct Bootstrap {
    #[builder(setter(into))]
    public_base_url: String,
    session: Arc<dyn SessionAccessor>,
    #[builder(default)]
    seed_demo: bool,
    #[builder(default)]
    hasher: Argon2Hasher,
}

impl Bootstrap {
    pub fn into_state(self) -> AppState {
        let aliases = if self.seed_demo {
            let records = demo_records();
            info!(count = records.len(), "seeding demo links");
            InMemoryAliasRepository::with_records(records)
        } else {
            InMemoryAliasRepository::new()
        };
        let aliases = Arc::new(aliases);
        let users = Arc::new(InMemoryUserRepository::new());

        let shortener = ShortenerService::new(
            Arc::clone(&aliases),
            Arc::clone(&users),
            RandomGenerator::default(),
        );
        let accounts = AccountService::new(users, RandomGenerator::default(), self.hasher);
        let redirector = RedirectorService::new(aliases);

        AppState::new(
            Arc::new(shortener),
            Arc::new(accounts),
            Arc::new(redirector),
            self.session,
            self.public_base_url,
        )
    }
}
