use serde::{Deserialize, Serialize};

/// A player as returned by the data provider.
///
/// Providers are free to send more fields (the reference backend adds `id`);
/// only `name` is read, everything else is dropped on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
}

#[cfg(test)]
impl PlayerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        PlayerRecord { name: name.into() }
    }
}
