//! Capability-based access control extractors.
//!
//! [`Require<C>`] wraps [`AuthUser`] and rejects the request with 403 unless
//! the principal's role allows the capability named by the marker type `C`.
//! The role-to-capability table lives in `workforce_core::roles`.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use workforce_core::error::CoreError;
use workforce_core::roles::Capability;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Type-level name for a [`Capability`].
pub trait CapabilityMarker: Send + Sync + 'static {
    const CAPABILITY: Capability;
}

/// Capability marker types for use with [`Require`].
pub mod cap {
    use super::{Capability, CapabilityMarker};

    macro_rules! marker {
        ($($name:ident),* $(,)?) => {
            $(
                #[derive(Debug)]
                pub struct $name;

                impl CapabilityMarker for $name {
                    const CAPABILITY: Capability = Capability::$name;
                }
            )*
        };
    }

    marker!(
        ViewDirectory,
        ViewProjects,
        EditOwnProfile,
        ViewReports,
        ManageUsers,
        ManageProjects,
    );
}

/// Requires the capability `C`. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(Require(auth, _): Require<cap::ManageUsers>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct Require<C>(pub AuthUser, pub PhantomData<C>);

impl<C: CapabilityMarker> FromRequestParts<AppState> for Require<C> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if !auth.role().allows(C::CAPABILITY) {
            tracing::debug!(
                user_id = %auth.id(),
                role = %auth.role(),
                capability = ?C::CAPABILITY,
                "Capability check failed",
            );
            return Err(AppError::Core(CoreError::Forbidden(
                "You do not have permission to perform this action".into(),
            )));
        }
        Ok(Require(auth, PhantomData))
    }
}
