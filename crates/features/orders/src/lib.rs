//! Orders feature: the administrator's order supervision page.
//!
//! The page is a shell; the `OrdersSupervision` client view fetches and displays the data.

#[cfg(feature = "server")]
mod handlers;
mod page;

pub use page::AdminOrdersSupervisionPage;

#[cfg(feature = "server")]
pub use handlers::router;
