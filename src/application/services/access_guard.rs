//! The single owner/admin access policy.
//!
//! Every call site that gates an operation on link ownership goes through
//! these three functions. They all share one decision: unowned links are
//! open to everyone; owned links are restricted to their owner or an admin,
//! and an anonymous identity never qualifies. Do not fork this logic per
//! endpoint.

use crate::domain::entities::{Identity, Link};

fn owner_or_open(identity: &Identity, link: &Link) -> bool {
    match &link.owner_id {
        None => true,
        Some(owner) => {
            identity.is_admin || identity.user_id.as_deref() == Some(owner.as_str())
        }
    }
}

/// Whether `identity` may view the link and its statistics.
pub fn can_read(identity: &Identity, link: &Link) -> bool {
    owner_or_open(identity, link)
}

/// Whether `identity` may change the link's destination URL.
pub fn can_write(identity: &Identity, link: &Link) -> bool {
    owner_or_open(identity, link)
}

/// Whether `identity` may delete the link.
pub fn can_delete(identity: &Identity, link: &Link) -> bool {
    owner_or_open(identity, link)
}
