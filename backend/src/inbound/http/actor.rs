//! Acting-user extractor.
//!
//! Authentication happens in front of this service; the authenticated
//! account reaches us as a UUID in the `X-User-Id` header.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, StudentId};

/// Header carrying the authenticated account identifier.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The account performing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor(StudentId);

impl Actor {
    /// Identifier of the acting account.
    #[must_use]
    pub const fn id(&self) -> &StudentId {
        &self.0
    }

    fn from_headers(req: &HttpRequest) -> Result<Self, Error> {
        let raw = req
            .headers()
            .get(USER_ID_HEADER)
            .ok_or_else(|| Error::unauthorized("missing X-User-Id header"))?;
        let parsed = raw
            .to_str()
            .ok()
            .and_then(|value| uuid::Uuid::parse_str(value.trim()).ok());
        match parsed {
            Some(uuid) => Ok(Self(StudentId::from_uuid(uuid))),
            None => {
                debug!("rejected malformed X-User-Id header");
                Err(Error::unauthorized("X-User-Id must be a valid UUID"))
            }
        }
    }
}

impl FromRequest for Actor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req))
    }
}
