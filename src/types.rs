use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

#[derive(
    PartialEq, Eq, Debug, PartialOrd, Ord, Clone, Copy, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CollectionId(pub i64);

#[derive(
    PartialEq, Eq, Debug, PartialOrd, Ord, Clone, Copy, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ServerId(pub i64);

impl Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
