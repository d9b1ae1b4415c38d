use std::sync::Arc;
use std::time::Duration;

use crate::db::Database;
use crate::ledger::LedgerStore;
use crate::user_auth::UserAuthService;

/// Shared gateway state
pub struct AppState {
    /// Ledger store capability (Postgres in production)
    pub store: Arc<dyn LedgerStore>,
    /// Connection pool owner, used by the health check
    pub db: Arc<Database>,
    /// Registration / login / token verification
    pub user_auth: Arc<UserAuthService>,
    /// Overall deadline for one transfer unit of work
    pub transfer_deadline: Duration,
}

impl AppState {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        db: Arc<Database>,
        user_auth: Arc<UserAuthService>,
        transfer_deadline: Duration,
    ) -> Self {
        Self {
            store,
            db,
            user_auth,
            transfer_deadline,
        }
    }
}
