//! Access gate for tool invocations.
//!
//! Every gated tool declares a static [`Requirement`]. Before the tool builds
//! a request, the server asks [`authorize`] whether the caller's [`Grant`]
//! satisfies it. The gate fails closed: a missing grant is a denial, and there
//! is no path that allows by default.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::GatewayError;

/// Coarse privilege tier, ordered `None < Read < Write < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessLevel {
    /// No access at all.
    None,
    /// Read-only access.
    Read,
    /// Read and modify.
    Write,
    /// Everything, including destructive operations.
    Admin,
}

impl AccessLevel {
    /// Lowercase name as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::None => "none",
            AccessLevel::Read => "read",
            AccessLevel::Write => "write",
            AccessLevel::Admin => "admin",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(AccessLevel::None),
            "read" => Ok(AccessLevel::Read),
            "write" => Ok(AccessLevel::Write),
            "admin" => Ok(AccessLevel::Admin),
            other => Err(GatewayError::invalid_config(format!(
                "unknown access level {:?} (expected none, read, write or admin)",
                other
            ))),
        }
    }
}

/// A named fine-grained capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    /// List, view and search tickets.
    TicketsRead,
    /// Create and update tickets.
    TicketsWrite,
    /// Delete tickets.
    TicketsDelete,
    /// List and view contacts.
    ContactsRead,
    /// Create and update contacts.
    ContactsWrite,
    /// Delete contacts.
    ContactsDelete,
    /// List and view agents.
    AgentsRead,
    /// List and view companies.
    CompaniesRead,
    /// Create and update companies.
    CompaniesWrite,
    /// Read ticket conversations.
    ConversationsRead,
    /// Reply to tickets and add notes.
    ConversationsWrite,
}

impl Permission {
    /// Every known permission.
    pub const ALL: [Permission; 11] = [
        Permission::TicketsRead,
        Permission::TicketsWrite,
        Permission::TicketsDelete,
        Permission::ContactsRead,
        Permission::ContactsWrite,
        Permission::ContactsDelete,
        Permission::AgentsRead,
        Permission::CompaniesRead,
        Permission::CompaniesWrite,
        Permission::ConversationsRead,
        Permission::ConversationsWrite,
    ];

    /// The `resource:action` name used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::TicketsRead => "tickets:read",
            Permission::TicketsWrite => "tickets:write",
            Permission::TicketsDelete => "tickets:delete",
            Permission::ContactsRead => "contacts:read",
            Permission::ContactsWrite => "contacts:write",
            Permission::ContactsDelete => "contacts:delete",
            Permission::AgentsRead => "agents:read",
            Permission::CompaniesRead => "companies:read",
            Permission::CompaniesWrite => "companies:write",
            Permission::ConversationsRead => "conversations:read",
            Permission::ConversationsWrite => "conversations:write",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                GatewayError::invalid_config(format!("unknown permission {:?}", wanted))
            })
    }
}

/// The capabilities held by the current caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    level: AccessLevel,
    permissions: BTreeSet<Permission>,
}

impl Grant {
    /// Creates a grant from a level and a set of permissions.
    pub fn new(level: AccessLevel, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            level,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Parses a grant from its configuration strings.
    ///
    /// `permissions` is a comma-separated list such as
    /// `tickets:read,tickets:write`. Any unknown name makes the whole grant
    /// malformed.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Config` for an unknown level or permission.
    pub fn parse(level: &str, permissions: &str) -> Result<Self, GatewayError> {
        let level = level.parse::<AccessLevel>()?;
        let permissions = permissions
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::parse::<Permission>)
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { level, permissions })
    }

    /// The granted access level.
    pub fn level(&self) -> AccessLevel {
        self.level
    }

    /// The granted permissions.
    pub fn permissions(&self) -> &BTreeSet<Permission> {
        &self.permissions
    }

    /// Returns true if the permission is held.
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// What an operation needs from the caller. Declared once per tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    /// Minimum access level.
    pub min_level: AccessLevel,
    /// Permissions that must all be held.
    pub permissions: &'static [Permission],
}

impl Requirement {
    /// Creates a requirement.
    pub const fn new(min_level: AccessLevel, permissions: &'static [Permission]) -> Self {
        Self {
            min_level,
            permissions,
        }
    }
}

/// Why the gate refused an operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The caller has no usable grant.
    #[error("no access grant configured for this caller")]
    NoGrant,

    /// The caller's level is below the operation's minimum.
    #[error("requires access level {required}, caller has {granted}")]
    InsufficientLevel {
        /// The operation's minimum level.
        required: AccessLevel,
        /// The caller's level.
        granted: AccessLevel,
    },

    /// The caller lacks one or more required permissions.
    #[error("missing permission(s): {}", join_permissions(.0))]
    MissingPermissions(Vec<Permission>),
}

fn join_permissions(permissions: &[Permission]) -> String {
    permissions
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The gate's verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// The operation may proceed.
    Allow,
    /// The operation must not proceed.
    Deny(DenyReason),
}

impl AccessDecision {
    /// Returns true for [`AccessDecision::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// Decides whether `grant` satisfies `requirement`.
///
/// Allows only when the level is at least the minimum AND every required
/// permission is held. The level is checked first, so a grant with matching
/// permissions but too low a level is still denied.
pub fn authorize(grant: Option<&Grant>, requirement: &Requirement) -> AccessDecision {
    let Some(grant) = grant else {
        return AccessDecision::Deny(DenyReason::NoGrant);
    };

    if grant.level < requirement.min_level {
        return AccessDecision::Deny(DenyReason::InsufficientLevel {
            required: requirement.min_level,
            granted: grant.level,
        });
    }

    let missing: Vec<Permission> = requirement
        .permissions
        .iter()
        .copied()
        .filter(|p| !grant.has(*p))
        .collect();
    if !missing.is_empty() {
        return AccessDecision::Deny(DenyReason::MissingPermissions(missing));
    }

    AccessDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRITE_TICKETS: Requirement =
        Requirement::new(AccessLevel::Write, &[Permission::TicketsWrite]);

    #[test]
    fn test_access_level_ordering() {
        assert!(AccessLevel::None < AccessLevel::Read);
        assert!(AccessLevel::Read < AccessLevel::Write);
        assert!(AccessLevel::Write < AccessLevel::Admin);
    }

    #[test]
    fn test_allows_matching_grant() {
        let grant = Grant::new(AccessLevel::Write, [Permission::TicketsWrite]);
        assert_eq!(authorize(Some(&grant), &WRITE_TICKETS), AccessDecision::Allow);
    }

    #[test]
    fn test_higher_level_satisfies_lower_minimum() {
        let grant = Grant::new(
            AccessLevel::Admin,
            [Permission::TicketsWrite, Permission::TicketsRead],
        );
        assert!(authorize(Some(&grant), &WRITE_TICKETS).is_allowed());
    }

    #[test]
    fn test_denies_low_level_even_with_exact_permissions() {
        let grant = Grant::new(AccessLevel::Read, [Permission::TicketsWrite]);
        assert_eq!(
            authorize(Some(&grant), &WRITE_TICKETS),
            AccessDecision::Deny(DenyReason::InsufficientLevel {
                required: AccessLevel::Write,
                granted: AccessLevel::Read,
            })
        );
    }

    #[test]
    fn test_denies_missing_permission_with_sufficient_level() {
        let grant = Grant::new(AccessLevel::Admin, [Permission::TicketsRead]);
        assert_eq!(
            authorize(Some(&grant), &WRITE_TICKETS),
            AccessDecision::Deny(DenyReason::MissingPermissions(vec![
                Permission::TicketsWrite
            ]))
        );
    }

    #[test]
    fn test_denies_without_grant() {
        assert_eq!(
            authorize(None, &WRITE_TICKETS),
            AccessDecision::Deny(DenyReason::NoGrant)
        );
    }

    #[test]
    fn test_level_only_requirement() {
        let requirement = Requirement::new(AccessLevel::Read, &[]);
        let grant = Grant::new(AccessLevel::Read, []);
        assert!(authorize(Some(&grant), &requirement).is_allowed());

        let grant = Grant::new(AccessLevel::None, Permission::ALL);
        assert!(!authorize(Some(&grant), &requirement).is_allowed());
    }

    #[test]
    fn test_grant_parse() {
        let grant = Grant::parse(" Write ", "tickets:read, tickets:write,,").unwrap();
        assert_eq!(grant.level(), AccessLevel::Write);
        assert!(grant.has(Permission::TicketsRead));
        assert!(grant.has(Permission::TicketsWrite));
        assert_eq!(grant.permissions().len(), 2);
    }

    #[test]
    fn test_grant_parse_rejects_unknown_permission() {
        assert!(Grant::parse("read", "tickets:read,tickets:fly").is_err());
    }

    #[test]
    fn test_grant_parse_rejects_unknown_level() {
        assert!(Grant::parse("superuser", "tickets:read").is_err());
    }

    #[test]
    fn test_permission_names_round_trip() {
        for permission in Permission::ALL {
            assert_eq!(permission.as_str().parse::<Permission>().unwrap(), permission);
        }
    }

    #[test]
    fn test_deny_reason_display() {
        let reason = DenyReason::MissingPermissions(vec![
            Permission::TicketsWrite,
            Permission::ContactsWrite,
        ]);
        assert_eq!(
            reason.to_string(),
            "missing permission(s): tickets:write, contacts:write"
        );
    }
}
