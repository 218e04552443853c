//! Authorization Evaluator
//!
//! A single pure function over an enumerated `{role x action x ownership}`
//! table. Evaluated per request; holds no state. Every resource handler
//! calls [`authorize`] before touching its repository.
//!
//! Denials distinguish the unauthenticated caller (401) from the
//! authenticated-but-unprivileged one (403) so the API boundary can pick
//! the right status class.

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::AuthError;

/// The identity a request carries, resolved from its bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Authenticated { user_id: UserId, role: UserRole },
}

impl Caller {
    pub fn authenticated(user_id: UserId, role: UserRole) -> Self {
        Self::Authenticated { user_id, role }
    }

    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Caller::Anonymous)
    }
}

/// Verb class of a resource action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    List,
    Retrieve,
    Create,
    Update,
    Destroy,
}

impl Verb {
    /// Safe verbs never mutate state.
    pub const fn is_read(&self) -> bool {
        matches!(self, Verb::List | Verb::Retrieve)
    }
}

/// Resource-action pairs the evaluator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Categories, genres, titles
    Catalog(Verb),
    /// Reviews on titles
    Review(Verb),
    /// Comments on reviews
    Comment(Verb),
    /// `/users/me` read and update
    SelfProfile,
    /// `/users` administration
    AdminUsers(Verb),
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deny {
    /// Caller not authenticated
    Unauthorized,
    /// Caller authenticated but lacks rights
    Forbidden,
}

impl From<Deny> for AuthError {
    fn from(deny: Deny) -> Self {
        match deny {
            Deny::Unauthorized => AuthError::Unauthorized,
            Deny::Forbidden => AuthError::Forbidden,
        }
    }
}

/// Decide whether `caller` may perform `action`.
///
/// `owner` is the author of the targeted review/comment, when the
/// action targets an existing owned object. Rules, in precedence order:
///
/// 1. Reads of catalog resources, reviews, and comments: always allowed,
///    including anonymous callers.
/// 2. Catalog mutations: admin only.
/// 3. Review/comment creation: any authenticated caller.
/// 4. Review/comment update/destroy: the owner, a moderator, or an admin.
/// 5. Self profile: any authenticated caller (it targets themselves).
/// 6. User administration: admin only.
/// 7. Anything unmatched: deny.
pub fn authorize(caller: &Caller, action: Action, owner: Option<&UserId>) -> Result<(), Deny> {
    if let Action::Catalog(verb) | Action::Review(verb) | Action::Comment(verb) = action {
        if verb.is_read() {
            return Ok(());
        }
    }

    let Caller::Authenticated { user_id, role } = caller else {
        return Err(Deny::Unauthorized);
    };

    let allowed = match action {
        Action::Catalog(_) => role.is_admin(),
        Action::Review(Verb::Create) | Action::Comment(Verb::Create) => true,
        Action::Review(Verb::Update | Verb::Destroy)
        | Action::Comment(Verb::Update | Verb::Destroy) => {
            role.is_moderator_or_higher() || owner.is_some_and(|o| o == user_id)
        }
        Action::SelfProfile => true,
        Action::AdminUsers(_) => role.is_admin(),
        // Reads were handled above
        Action::Review(_) | Action::Comment(_) => false,
    };

    if allowed { Ok(()) } else { Err(Deny::Forbidden) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> (UserId, Caller) {
        let id = UserId::new();
        (id, Caller::authenticated(id, UserRole::User))
    }

    fn moderator() -> Caller {
        Caller::authenticated(UserId::new(), UserRole::Moderator)
    }

    fn admin() -> Caller {
        Caller::authenticated(UserId::new(), UserRole::Admin)
    }

    mod catalog {
        use super::*;

        #[test]
        fn test_anonymous_reads_allowed() {
            assert!(authorize(&Caller::Anonymous, Action::Catalog(Verb::List), None).is_ok());
            assert!(authorize(&Caller::Anonymous, Action::Catalog(Verb::Retrieve), None).is_ok());
        }

        #[test]
        fn test_anonymous_mutation_unauthorized() {
            let result = authorize(&Caller::Anonymous, Action::Catalog(Verb::Create), None);
            assert_eq!(result, Err(Deny::Unauthorized));
        }

        #[test]
        fn test_user_and_moderator_mutations_forbidden() {
            let (_, caller) = user();
            for verb in [Verb::Create, Verb::Update, Verb::Destroy] {
                assert_eq!(
                    authorize(&caller, Action::Catalog(verb), None),
                    Err(Deny::Forbidden)
                );
                assert_eq!(
                    authorize(&moderator(), Action::Catalog(verb), None),
                    Err(Deny::Forbidden)
                );
            }
        }

        #[test]
        fn test_admin_mutations_allowed() {
            for verb in [Verb::Create, Verb::Update, Verb::Destroy] {
                assert!(authorize(&admin(), Action::Catalog(verb), None).is_ok());
            }
        }
    }

    mod reviews_and_comments {
        use super::*;

        #[test]
        fn test_anonymous_reads_allowed() {
            assert!(authorize(&Caller::Anonymous, Action::Review(Verb::List), None).is_ok());
            assert!(authorize(&Caller::Anonymous, Action::Comment(Verb::Retrieve), None).is_ok());
        }

        #[test]
        fn test_create_requires_authentication() {
            assert_eq!(
                authorize(&Caller::Anonymous, Action::Review(Verb::Create), None),
                Err(Deny::Unauthorized)
            );
            let (_, caller) = user();
            assert!(authorize(&caller, Action::Review(Verb::Create), None).is_ok());
            assert!(authorize(&caller, Action::Comment(Verb::Create), None).is_ok());
        }

        #[test]
        fn test_owner_may_edit_own() {
            let (id, caller) = user();
            assert!(authorize(&caller, Action::Review(Verb::Update), Some(&id)).is_ok());
            assert!(authorize(&caller, Action::Comment(Verb::Destroy), Some(&id)).is_ok());
        }

        #[test]
        fn test_other_user_forbidden() {
            let (_, caller) = user();
            let other = UserId::new();
            assert_eq!(
                authorize(&caller, Action::Review(Verb::Update), Some(&other)),
                Err(Deny::Forbidden)
            );
            assert_eq!(
                authorize(&caller, Action::Review(Verb::Destroy), Some(&other)),
                Err(Deny::Forbidden)
            );
        }

        #[test]
        fn test_moderator_and_admin_may_edit_any() {
            let other = UserId::new();
            assert!(authorize(&moderator(), Action::Review(Verb::Update), Some(&other)).is_ok());
            assert!(authorize(&admin(), Action::Comment(Verb::Destroy), Some(&other)).is_ok());
        }

        #[test]
        fn test_edit_without_owner_requires_moderator() {
            // No owner known: plain users are denied, moderators pass.
            let (_, caller) = user();
            assert_eq!(
                authorize(&caller, Action::Review(Verb::Update), None),
                Err(Deny::Forbidden)
            );
            assert!(authorize(&moderator(), Action::Review(Verb::Update), None).is_ok());
        }
    }

    mod users {
        use super::*;

        #[test]
        fn test_self_profile_requires_authentication() {
            assert_eq!(
                authorize(&Caller::Anonymous, Action::SelfProfile, None),
                Err(Deny::Unauthorized)
            );
            let (_, caller) = user();
            assert!(authorize(&caller, Action::SelfProfile, None).is_ok());
        }

        #[test]
        fn test_administration_is_admin_only() {
            for verb in [
                Verb::List,
                Verb::Retrieve,
                Verb::Create,
                Verb::Update,
                Verb::Destroy,
            ] {
                assert_eq!(
                    authorize(&Caller::Anonymous, Action::AdminUsers(verb), None),
                    Err(Deny::Unauthorized)
                );
                let (_, caller) = user();
                assert_eq!(
                    authorize(&caller, Action::AdminUsers(verb), None),
                    Err(Deny::Forbidden)
                );
                assert_eq!(
                    authorize(&moderator(), Action::AdminUsers(verb), None),
                    Err(Deny::Forbidden)
                );
                assert!(authorize(&admin(), Action::AdminUsers(verb), None).is_ok());
            }
        }
    }
}
