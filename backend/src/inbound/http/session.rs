//! Session helpers so handlers deal in [`SessionSnapshot`]s, not cookies.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, SessionSnapshot};

pub(crate) const SNAPSHOT_KEY: &str = "registrant";

/// Newtype over the actix session exposing snapshot operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `snapshot`, replacing any previous one and renewing the
    /// session key.
    pub fn persist_snapshot(&self, snapshot: &SessionSnapshot) -> Result<(), Error> {
        self.0.renew();
        self.0.insert(SNAPSHOT_KEY, snapshot).map_err(|error| {
            tracing::error!(%error, "failed to persist session");
            Error::internal("Failed to persist session").with_cause(error)
        })
    }

    /// The stored snapshot, if any.
    ///
    /// A snapshot that no longer decodes is treated as absent.
    pub fn snapshot(&self) -> Result<Option<SessionSnapshot>, Error> {
        match self.0.get::<SessionSnapshot>(SNAPSHOT_KEY) {
            Ok(snapshot) => Ok(snapshot),
            Err(error) => {
                warn!(%error, "undecodable session snapshot");
                Ok(None)
            }
        }
    }

    /// Drop all session state and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
