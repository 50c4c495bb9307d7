use marche_ui::{Page, ViewMount};

/// `GET /admin/commandes/supervision`
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminOrdersSupervisionPage;

impl Page for AdminOrdersSupervisionPage {
    type Params = ();
    const TITLE: &'static str = "Supervision des commandes";

    fn mount((): ()) -> ViewMount {
        ViewMount::OrdersSupervision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mounts_supervision_without_props() {
        let mount = AdminOrdersSupervisionPage::mount(());
        assert_eq!(mount, ViewMount::OrdersSupervision);
        assert!(mount.props().is_none());
    }
}
