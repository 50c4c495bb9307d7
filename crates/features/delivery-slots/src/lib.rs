//! Delivery slots feature: the producer's per-product slot calendar and the cross-product overview.

#[cfg(feature = "server")]
mod handlers;
mod page;

pub use page::{DeliverySlotRoute, ProducerDeliverySlotsOverviewPage, ProducerDeliverySlotsPage};

#[cfg(feature = "server")]
pub use handlers::router;
