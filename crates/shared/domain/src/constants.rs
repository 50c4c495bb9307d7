// Assets
pub const UPLOADS_BASE_PATH: &str = "/uploads";

// Delegated views (client-side components mounted by the pages)
pub const ORDERS_SUPERVISION_VIEW: &str = "OrdersSupervision";
pub const DELIVERY_SLOT_CALENDAR_VIEW: &str = "DeliverySlotCalendar";
pub const DELIVERY_SLOTS_OVERVIEW_VIEW: &str = "DeliverySlotsOverview";

// OpenAPI tags
pub const SYSTEM_TAG: &str = "System";
pub const ASSETS_TAG: &str = "Assets";
pub const ORDERS_TAG: &str = "Orders";
pub const DELIVERY_SLOTS_TAG: &str = "Delivery slots";
