//! # UI shells
//!
//! Server-side rendered HTML shells for the application pages.
//!
//! A page never implements business logic: it turns its typed route parameters into a
//! [`ViewMount`] (the delegated client view plus its props) and renders one padded
//! container holding exactly one mount node for that view:
//!
//! ```html
//! <main class="container mx-auto p-6">
//!   <div data-view="DeliverySlotCalendar" data-props="{&#34;productId&#34;:&#34;42&#34;}"></div>
//! </main>
//! ```
//!
//! The client bundle finds `data-view` nodes and hydrates the matching component.

mod components;
mod page;
mod view;

pub use components::{CONTAINER_CLASS, PageContainer, ViewHost};
pub use page::{Page, render_document};
pub use view::{DeliverySlotCalendarProps, ViewMount};
