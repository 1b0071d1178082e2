// ABOUTME: Caller-owned reference to a daemon-side container.
// ABOUTME: Valid from creation until removal; removal consumes it.

use crate::types::ContainerId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerHandle {
    id: ContainerId,
}

impl ContainerHandle {
    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    pub fn into_id(self) -> ContainerId {
        self.id
    }
}

impl From<ContainerId> for ContainerHandle {
    fn from(id: ContainerId) -> Self {
        Self { id }
    }
}

impl fmt::Display for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
