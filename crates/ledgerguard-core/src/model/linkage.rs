use serde::Serialize;

/// Presence of one asset id in the two independent stores
///
/// Reporting only; nothing keeps the two records in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLinkage {
    pub asset_id: String,
    pub public: bool,
    pub confidential: bool,
    /// Collection that was checked for the confidential half
    pub collection: String,
}

impl AssetLinkage {
    /// Both halves exist
    pub fn is_linked(&self) -> bool {
        self.public && self.confidential
    }
}
