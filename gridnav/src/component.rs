//! Adapter that drives one [`NavigationModel`] from a hosting table's
//! lifecycle: mount, unmount and option changes.

use griddom::{Delivery, DeliveryHandler, Document};

use crate::config::{GridNavigationOptions, TableRole};
use crate::error::NavError;
use crate::model::NavigationModel;

/// Keyboard navigation for one table instance.
///
/// All effects land on the document (focus, index metadata); the only
/// outputs are errors from misuse.
pub struct GridNavigation {
    options: GridNavigationOptions,
    get_table: Box<dyn Fn() -> Option<String>>,
    model: NavigationModel,
    mounted: bool,
}

impl GridNavigation {
    /// `get_table` returns the table element's id once it is rendered.
    pub fn new(
        options: GridNavigationOptions,
        get_table: impl Fn() -> Option<String> + 'static,
    ) -> Self {
        Self {
            options,
            get_table: Box::new(get_table),
            model: NavigationModel::new(options.into()),
            mounted: false,
        }
    }

    pub fn options(&self) -> &GridNavigationOptions {
        &self.options
    }

    /// Whether navigation is currently attached to a table.
    pub fn is_active(&self) -> bool {
        self.model.is_attached()
    }

    /// The table has been mounted.
    pub fn mounted(&mut self, doc: &mut Document) -> Result<(), NavError> {
        self.mounted = true;
        self.attach(doc)
    }

    /// The table is about to go away.
    pub fn unmounted(&mut self, doc: &mut Document) {
        self.mounted = false;
        self.model.destroy(doc);
    }

    /// New options from the host. Page size is applied in place; a role
    /// change re-evaluates whether navigation should be attached.
    pub fn set_options(
        &mut self,
        doc: &mut Document,
        options: GridNavigationOptions,
    ) -> Result<(), NavError> {
        let role_changed = options.table_role != self.options.table_role;
        self.options = options;
        self.model.update(options.into());

        if role_changed && self.mounted {
            self.model.destroy(doc);
            self.attach(doc)?;
        }
        Ok(())
    }

    fn attach(&mut self, doc: &mut Document) -> Result<(), NavError> {
        if self.options.table_role != TableRole::Grid {
            log::trace!(
                "[grid-nav] role {:?} is not navigable",
                self.options.table_role
            );
            return Ok(());
        }
        let Some(table) = (self.get_table)() else {
            log::trace!("[grid-nav] table not rendered yet");
            return Ok(());
        };
        self.model.init(doc, &table)
    }
}

impl DeliveryHandler for GridNavigation {
    type Error = NavError;

    fn handle(&mut self, doc: &mut Document, delivery: &mut Delivery) -> Result<(), NavError> {
        self.model.handle(doc, delivery)
    }
}
