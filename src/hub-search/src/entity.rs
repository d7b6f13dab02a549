//! Searchable entity types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of entity a query targets.
///
/// The target entity decides which backend executes a query and which
/// predicate vocabulary its filters are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    Item,
    Group,
    User,
    PortalUser,
    CommunityUser,
    GroupMember,
    Event,
    EventAttendee,
    Channel,
    DiscussionPost,
}

impl EntityType {
    /// Every entity type, in declaration order.
    pub const ALL: [EntityType; 10] = [
        EntityType::Item,
        EntityType::Group,
        EntityType::User,
        EntityType::PortalUser,
        EntityType::CommunityUser,
        EntityType::GroupMember,
        EntityType::Event,
        EntityType::EventAttendee,
        EntityType::Channel,
        EntityType::DiscussionPost,
    ];

    /// Wire name of the entity type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Item => "item",
            EntityType::Group => "group",
            EntityType::User => "user",
            EntityType::PortalUser => "portalUser",
            EntityType::CommunityUser => "communityUser",
            EntityType::GroupMember => "groupMember",
            EntityType::Event => "event",
            EntityType::EventAttendee => "eventAttendee",
            EntityType::Channel => "channel",
            EntityType::DiscussionPost => "discussionPost",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown entity type: {s}"))
    }
}
