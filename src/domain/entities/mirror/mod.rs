pub mod equipment;
pub mod equipment_type;
pub mod instrument;
pub mod property;
pub mod scheduled_work_order;
pub mod snapshot;
pub mod user_profile;
pub mod work_session;

pub use equipment::Equipment;
pub use equipment_type::EquipmentType;
pub use instrument::Instrument;
pub use property::Property;
pub use scheduled_work_order::ScheduledWorkOrder;
pub use snapshot::MirrorSnapshot;
pub use user_profile::UserProfile;
pub use work_session::WorkSession;
