//! Facade crate for the marketplace features and shared modules.
//! Re-exports domain/kernel/ui primitives and aggregates the feature routers.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `marche` with the `server` feature.
//! - Merge [`server::router::pages_router`], [`server::router::system_router`] and
//!   [`server::router::assets_router`] into the application router.

pub use marche_domain as domain;
pub use marche_kernel as kernel;
pub use marche_ui as ui;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use marche_kernel::server::router::{assets_router, system_router};
        use utoipa_axum::router::OpenApiRouter;

        /// Every page shell contributed by the features.
        pub fn pages_router<S>() -> OpenApiRouter<S>
        where
            S: Send + Sync + Clone + 'static,
        {
            OpenApiRouter::<S>::new()
                .merge(crate::features::orders::router())
                .merge(crate::features::delivery_slots::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use marche_delivery_slots as delivery_slots;
    pub use marche_orders as orders;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "orders",
        "delivery-slots",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}
