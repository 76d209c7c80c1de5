//! Ownership Guard
//!
//! Decides whether a caller may act on an owned resource.
//!
//! | Action        | Rule                                   |
//! |---------------|----------------------------------------|
//! | Create        | authenticated                          |
//! | ReadOwnList   | authenticated                          |
//! | Update/Delete | authenticated, resource exists, owner  |
//!
//! Checks run in that order, so an anonymous caller always sees
//! `Unauthenticated` and never learns whether a resource exists.

use std::future::Future;

use derive_more::Display;

use crate::domain::entity::identity::{Caller, Identity};
use crate::domain::value_object::user_id::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Action {
    #[display("create")]
    Create,
    #[display("read own list")]
    ReadOwnList,
    #[display("update")]
    Update,
    #[display("delete")]
    Delete,
}

impl Action {
    /// Whether the rule depends on a specific resource
    pub fn targets_resource(self) -> bool {
        matches!(self, Action::Update | Action::Delete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Denial {
    #[display("not signed in")]
    Unauthenticated,
    #[display("not the owner")]
    Forbidden,
    #[display("no such resource")]
    NotFound,
}

/// Resource with a recorded owner
pub trait Owned {
    fn owner_id(&self) -> UserId;
}

#[derive(Debug, PartialEq, Eq)]
pub enum Authorization<'a> {
    Allowed(&'a Identity),
    Denied(Denial),
}

impl<'a> Authorization<'a> {
    pub fn into_result(self) -> Result<&'a Identity, Denial> {
        match self {
            Authorization::Allowed(identity) => Ok(identity),
            Authorization::Denied(denial) => Err(denial),
        }
    }
}

pub struct OwnershipGuard;

impl OwnershipGuard {
    /// Pure policy check; `resource` is ignored for Create and ReadOwnList
    pub fn authorize<'a, R: Owned>(
        caller: &'a Caller,
        action: Action,
        resource: Option<&R>,
    ) -> Authorization<'a> {
        let Some(identity) = caller.identity() else {
            return Authorization::Denied(Denial::Unauthenticated);
        };

        if !action.targets_resource() {
            return Authorization::Allowed(identity);
        }

        match resource {
            None => Authorization::Denied(Denial::NotFound),
            Some(resource) if resource.owner_id() == identity.id => {
                Authorization::Allowed(identity)
            }
            Some(_) => Authorization::Denied(Denial::Forbidden),
        }
    }

    /// Authorize an action that needs only a session
    pub fn authenticated(caller: &Caller, action: Action) -> Result<&Identity, Denial> {
        Self::authorize::<NoResource>(caller, action, None).into_result()
    }

    /// Look up a resource and authorize `action` on it
    ///
    /// `lookup` runs only for authenticated callers. The outer `Result`
    /// carries storage failures, the inner one the policy decision.
    pub async fn fetch_authorized<R, E, F, Fut>(
        caller: &Caller,
        action: Action,
        lookup: F,
    ) -> Result<Result<R, Denial>, E>
    where
        R: Owned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<R>, E>>,
    {
        if !caller.is_authenticated() {
            return Ok(Err(Denial::Unauthenticated));
        }

        let resource = lookup().await?;
        let decision = Self::authorize(caller, action, resource.as_ref());

        Ok(match decision {
            Authorization::Allowed(identity) => {
                tracing::debug!(user_id = %identity.id, action = %action, "Ownership check passed");
                resource.ok_or(Denial::NotFound)
            }
            Authorization::Denied(denial) => {
                tracing::debug!(action = %action, denial = %denial, "Ownership check denied");
                Err(denial)
            }
        })
    }
}

/// Placeholder for resource-free checks
enum NoResource {}

impl Owned for NoResource {
    fn owner_id(&self) -> UserId {
        match *self {}
    }
}
