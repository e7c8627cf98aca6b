use crate::entities::{Resource, UserRole};
use crate::value_objects::Snowflake;

/// The authenticated actor as far as access decisions are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub id: Snowflake,
    pub role: UserRole,
}

impl Viewer {
    pub fn new(id: Snowflake, role: UserRole) -> Self {
        Self { id, role }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Owner / admin / public access tiers
pub struct AccessPolicy;

impl AccessPolicy {
    /// Approved, visible and not deleted
    pub fn is_public(resource: &Resource) -> bool {
        resource.is_public()
    }

    /// Public resources are visible to everyone; the owner and admins see the rest.
    pub fn can_view(resource: &Resource, viewer: Option<&Viewer>) -> bool {
        Self::is_public(resource) || Self::is_owner_or_admin(resource, viewer)
    }

    pub fn can_edit(resource: &Resource, viewer: Option<&Viewer>) -> bool {
        Self::is_owner_or_admin(resource, viewer)
    }

    pub fn can_delete(resource: &Resource, viewer: Option<&Viewer>) -> bool {
        Self::is_owner_or_admin(resource, viewer)
    }

    /// Owner visibility toggle; admins hide through moderation instead
    pub fn can_toggle_visibility(resource: &Resource, viewer: Option<&Viewer>) -> bool {
        viewer.is_some_and(|v| resource.is_owned_by(v.id))
    }

    pub fn can_moderate(viewer: Option<&Viewer>) -> bool {
        viewer.is_some_and(Viewer::is_admin)
    }

    fn is_owner_or_admin(resource: &Resource, viewer: Option<&Viewer>) -> bool {
        viewer.is_some_and(|v| v.is_admin() || resource.is_owned_by(v.id))
    }
}

/// Which rows a listing may return, before the explicit filters apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    /// Approved and visible only
    Public,
    /// Public rows plus everything owned by this user
    PublicOrOwner(Snowflake),
    /// No scope restriction (admins)
    All,
}

impl OwnerScope {
    pub fn for_viewer(viewer: Option<&Viewer>) -> Self {
        match viewer {
            None => Self::Public,
            Some(v) if v.is_admin() => Self::All,
            Some(v) => Self::PublicOrOwner(v.id),
        }
    }

    /// Whether a row falls inside this scope
    pub fn admits(&self, resource: &Resource) -> bool {
        match self {
            Self::Public => resource.is_approved && resource.is_visible,
            Self::PublicOrOwner(owner) => {
                (resource.is_approved && resource.is_visible) || resource.is_owned_by(*owner)
            }
            Self::All => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ResourceDraft;

    const OWNER: Snowflake = Snowflake::new(1);
    const OTHER: Snowflake = Snowflake::new(2);
    const ADMIN: Snowflake = Snowflake::new(3);

    fn pending() -> Resource {
        Resource::new(
            Snowflake::new(100),
            OWNER,
            ResourceDraft {
                title: "Economy".into(),
                description: "Economy settings".into(),
                plugin_type: "EssentialsX".into(),
                category: None,
                content: "{}".into(),
            },
            "1.0".into(),
        )
    }

    fn user(id: Snowflake) -> Viewer {
        Viewer::new(id, UserRole::User)
    }

    fn admin() -> Viewer {
        Viewer::new(ADMIN, UserRole::Admin)
    }

    #[test]
    fn test_unapproved_hidden_from_anonymous_but_not_owner_or_admin() {
        let r = pending();
        assert!(!AccessPolicy::can_view(&r, None));
        assert!(!AccessPolicy::can_view(&r, Some(&user(OTHER))));
        assert!(AccessPolicy::can_view(&r, Some(&user(OWNER))));
        assert!(AccessPolicy::can_view(&r, Some(&admin())));
    }

    #[test]
    fn test_public_resource_visible_to_all() {
        let mut r = pending();
        r.toggle_approval();
        assert!(AccessPolicy::is_public(&r));
        assert!(AccessPolicy::can_view(&r, None));
        assert!(AccessPolicy::can_view(&r, Some(&user(OTHER))));
    }

    #[test]
    fn test_edit_and_delete_need_owner_or_admin() {
        let r = pending();
        for check in [AccessPolicy::can_edit, AccessPolicy::can_delete] {
            assert!(check(&r, Some(&user(OWNER))));
            assert!(check(&r, Some(&admin())));
            assert!(!check(&r, Some(&user(OTHER))));
            assert!(!check(&r, None));
        }
    }

    #[test]
    fn test_owner_visibility_excludes_admin() {
        let r = pending();
        assert!(AccessPolicy::can_toggle_visibility(&r, Some(&user(OWNER))));
        assert!(!AccessPolicy::can_toggle_visibility(&r, Some(&admin())));
    }

    #[test]
    fn test_scope_for_viewer() {
        assert_eq!(OwnerScope::for_viewer(None), OwnerScope::Public);
        assert_eq!(OwnerScope::for_viewer(Some(&admin())), OwnerScope::All);
        assert_eq!(
            OwnerScope::for_viewer(Some(&user(OTHER))),
            OwnerScope::PublicOrOwner(OTHER)
        );
    }

    #[test]
    fn test_scope_admits() {
        let r = pending();
        assert!(!OwnerScope::Public.admits(&r));
        assert!(OwnerScope::PublicOrOwner(OWNER).admits(&r));
        assert!(!OwnerScope::PublicOrOwner(OTHER).admits(&r));
        assert!(OwnerScope::All.admits(&r));
    }
}
