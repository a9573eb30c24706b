//! Gateway-injected identity headers extractors.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-foodgram-user-id";
pub const USER_ROLE_HEADER: &str = "x-foodgram-user-role";

/// Lowest role value with staff privileges.
pub const STAFF_ROLE: u8 = 1;

/// User identity injected by the gateway via `x-foodgram-user-id` and `x-foodgram-user-role`.
///
/// Only reachable through [`MaybeIdentity`]; use cases turn its absence into 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl IdentityHeaders {
    pub fn is_staff(&self) -> bool {
        self.user_role >= STAFF_ROLE
    }
}

/// Identity for endpoints that also serve anonymous visitors.
///
/// `None` when the gateway did not inject a valid identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeIdentity(pub Option<IdentityHeaders>);

impl MaybeIdentity {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.map(|identity| identity.user_id)
    }
}

fn read_identity(parts: &Parts) -> Option<IdentityHeaders> {
    let user_id = parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<Uuid>().ok())?;
    let user_role = parts
        .headers
        .get(USER_ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u8>().ok())?;
    Some(IdentityHeaders { user_id, user_role })
}

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = read_identity(parts);
        async move { Ok(Self(identity)) }
    }
}
