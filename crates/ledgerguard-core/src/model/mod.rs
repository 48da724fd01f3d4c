pub mod linkage;
pub mod private_record;
pub mod public_asset;

pub use linkage::AssetLinkage;
pub use private_record::PrivateRecord;
pub use public_asset::{AssetKind, PublicAsset};
