pub mod equipment_id;
pub mod media_asset_id;
pub mod media_category;
pub mod media_status;
pub mod mutation_family;
pub mod mutation_id;
pub mod mutation_status;
pub mod retry_state;
pub mod technician_id;
pub mod work_order_id;

pub use equipment_id::EquipmentId;
pub use media_asset_id::MediaAssetId;
pub use media_category::MediaCategory;
pub use media_status::MediaStatus;
pub use mutation_family::MutationFamily;
pub use mutation_id::MutationId;
pub use mutation_status::MutationStatus;
pub use retry_state::RetryState;
pub use technician_id::TechnicianId;
pub use work_order_id::WorkOrderId;
