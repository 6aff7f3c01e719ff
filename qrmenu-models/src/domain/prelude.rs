pub use super::auth::{Claims, LoginRequest, LoginResponse};
pub use super::client::{
    AssetSlot, BusinessSchema, ClientForm, ClientFormState, ClientInfo, ClientPayload,
    EditQuery, PendingAssets, PendingUpload, PostalAddress, QrTarget,
};
pub use super::common::PathId;
pub use super::page::{IconLink, PageMetadata};
