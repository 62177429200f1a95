//! The navigation model: tracks the focused cell of one grid, turns key
//! presses into focus moves, and restores focus after structural mutations.

use griddom::{
    ClaimToken, Delivery, DeliveryHandler, Document, DomError, Event, EventKind, KeyEvent,
    ListenerId, MutationRecord, ObserveOptions, ObserverId, contains_or_equal, find_element,
};

use crate::cell::{FocusedCell, resolve_focus_target};
use crate::config::NavigationConfig;
use crate::error::NavError;
use crate::grid::{self, CellIndex};
use crate::keys::Command;
use crate::movement::{self, Delta};

const LISTENED: [EventKind; 3] = [EventKind::FocusIn, EventKind::FocusOut, EventKind::KeyDown];

/// Resources installed on the document while attached.
#[derive(Debug)]
struct Attachment {
    table: String,
    listener: ListenerId,
    observer: ObserverId,
    claim: ClaimToken,
}

#[derive(Debug, Default)]
pub struct NavigationModel {
    config: NavigationConfig,
    attachment: Option<Attachment>,
    /// Set while native focus is inside the grid.
    focused_cell: Option<FocusedCell>,
    /// Last known focus position, kept after focus leaves the grid.
    prev_focused_cell: Option<FocusedCell>,
}

impl NavigationModel {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Replace the configuration. Listeners and focus state are untouched.
    pub fn update(&mut self, config: NavigationConfig) {
        log::debug!("[grid-nav] config {:?} -> {:?}", self.config, config);
        self.config = config;
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// The bound table. Accessing it while detached is a caller bug.
    pub fn table(&self) -> Result<&str, NavError> {
        self.attachment
            .as_ref()
            .map(|a| a.table.as_str())
            .ok_or(NavError::NotAttached)
    }

    pub fn focused_cell(&self) -> Option<&FocusedCell> {
        self.focused_cell.as_ref()
    }

    pub fn prev_focused_cell(&self) -> Option<&FocusedCell> {
        self.prev_focused_cell.as_ref()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Bind to `table`: claim it, install focus/key listeners and a subtree
    /// mutation observer, then stamp index metadata around the last known
    /// position. An existing attachment is released first.
    pub fn init(&mut self, doc: &mut Document, table: &str) -> Result<(), NavError> {
        if let Some(current) = &self.attachment {
            log::warn!(
                "[grid-nav] init({}) while attached to {}, releasing the old attachment",
                table,
                current.table
            );
            self.destroy(doc);
        }

        if doc.get(table).is_none() {
            return Err(NavError::TableNotFound(table.to_string()));
        }
        let claim = doc.claim(table).map_err(|e| match e {
            DomError::AlreadyClaimed(id) => NavError::AlreadyAttached(id),
            other => NavError::Dom(other),
        })?;
        let listener = doc.listen(table, &LISTENED)?;
        let observer = doc.observe(table, ObserveOptions::new().child_list().subtree())?;

        self.attachment = Some(Attachment {
            table: table.to_string(),
            listener,
            observer,
            claim,
        });
        log::debug!("[grid-nav] attached to {table}");

        // Focus may have moved while detached
        self.focused_cell = doc
            .focused()
            .and_then(|target| resolve_focus_target(doc, table, target));
        if let Some(cell) = &self.focused_cell {
            log::debug!("[grid-nav] focus already on {} at attach", cell.element);
            self.prev_focused_cell = Some(cell.clone());
        }

        let reference = self.focused_cell.as_ref().or(self.prev_focused_cell.as_ref());
        grid::refresh_index_metadata(doc, table, reference)?;
        Ok(())
    }

    /// Remove listeners and the observer and release the table.
    /// Safe to call repeatedly and before `init`.
    ///
    /// `focused_cell` is cleared since focus is no longer tracked;
    /// `prev_focused_cell` survives as the anchor for a later `init`.
    pub fn destroy(&mut self, doc: &mut Document) {
        self.focused_cell = None;
        let Some(Attachment {
            table,
            listener,
            observer,
            claim,
        }) = self.attachment.take()
        else {
            return;
        };
        doc.unlisten(listener);
        doc.disconnect(observer);
        doc.release(claim);
        log::debug!("[grid-nav] detached from {table}");
    }

    // =========================================================================
    // Focus tracking
    // =========================================================================

    fn on_focus_in(&mut self, doc: &mut Document, target: &str) -> Result<(), NavError> {
        let table = self.table()?.to_string();
        let Some(cell) = resolve_focus_target(doc, &table, target) else {
            log::trace!("[grid-nav] focusin on {target} is not inside a cell");
            return Ok(());
        };

        log::debug!(
            "[grid-nav] focus on {} (cell {}, widget: {})",
            cell.element,
            cell.cell_element,
            cell.widget
        );
        self.prev_focused_cell = Some(cell.clone());
        self.focused_cell = Some(cell);
        let index = grid::refresh_index_metadata(doc, &table, self.focused_cell.as_ref())?;
        log::trace!("[grid-nav] focused coordinate {index:?}");
        Ok(())
    }

    fn on_focus_out(&mut self) {
        // prev_focused_cell stays as the last known position
        self.focused_cell = None;
    }

    // =========================================================================
    // Key dispatch
    // =========================================================================

    fn on_key_down(&mut self, doc: &mut Document, event: &mut KeyEvent) -> Result<(), NavError> {
        let Some(cell) = self.focused_cell.clone() else {
            return Ok(());
        };
        let Some(command) = Command::from_key(event.key, event.modifiers) else {
            log::trace!("[grid-nav] ignoring {:?} {:?}", event.key, event.modifiers);
            return Ok(());
        };
        // Widgets keep every key except the ones that hand focus back
        if cell.widget && !command.allowed_in_widget() {
            return Ok(());
        }

        let table = self.table()?.to_string();
        log::debug!("[grid-nav] {command:?} from {}", cell.element);

        match command {
            Command::EnterWidget => {
                if !cell.widget {
                    event.prevent_default();
                    movement::move_into_widget(doc, &cell);
                }
            }
            Command::ExitWidget => {
                if cell.widget {
                    event.prevent_default();
                    movement::move_by(doc, &table, &cell, Delta::ZERO);
                }
            }
            Command::ToggleWidget => {
                event.prevent_default();
                if cell.widget {
                    movement::move_by(doc, &table, &cell, Delta::ZERO);
                } else {
                    movement::move_into_widget(doc, &cell);
                }
            }
            command => {
                if let Some(delta) = command.delta(self.config.page_size) {
                    event.prevent_default();
                    movement::move_by(doc, &table, &cell, delta);
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Mutation reconciliation
    // =========================================================================

    fn reconcile(
        &mut self,
        doc: &mut Document,
        records: &[MutationRecord],
    ) -> Result<(), NavError> {
        let Some(prev) = self.prev_focused_cell.clone() else {
            return Ok(());
        };
        let table = self.table()?.to_string();

        for record in records.iter().filter(|r| r.is_child_list()) {
            for removed in &record.removed {
                if !contains_or_equal(removed, &prev.element) {
                    continue;
                }
                // A detached cell still carries its stamped coordinate
                let origin = find_element(removed, &prev.cell_element)
                    .and_then(CellIndex::read)
                    .or_else(|| grid::cell_index(doc, &table, &prev.cell_element));
                match origin {
                    Some(origin) => {
                        log::debug!(
                            "[grid-nav] {} removed with {}, refocusing {origin:?}",
                            prev.element,
                            removed.id
                        );
                        movement::move_from(doc, &table, origin, Delta::ZERO);
                    }
                    None => log::debug!(
                        "[grid-nav] {} removed with {}, no coordinate to restore",
                        prev.element,
                        removed.id
                    ),
                }
            }
        }

        let reference = self.focused_cell.as_ref().unwrap_or(&prev);
        grid::refresh_index_metadata(doc, &table, Some(reference))?;
        Ok(())
    }
}

impl DeliveryHandler for NavigationModel {
    type Error = NavError;

    /// Route a delivery addressed to this model's listener or observer.
    /// Anything else is ignored.
    fn handle(&mut self, doc: &mut Document, delivery: &mut Delivery) -> Result<(), NavError> {
        let Some((own_listener, own_observer)) =
            self.attachment.as_ref().map(|a| (a.listener, a.observer))
        else {
            return Ok(());
        };

        match delivery {
            Delivery::Event { listener, event } if *listener == own_listener => match event {
                Event::FocusIn(focus) => self.on_focus_in(doc, &focus.target),
                Event::FocusOut(_) => {
                    self.on_focus_out();
                    Ok(())
                }
                Event::KeyDown(key) => self.on_key_down(doc, key),
            },
            Delivery::Mutations { observer, records } if *observer == own_observer => {
                self.reconcile(doc, records)
            }
            _ => Ok(()),
        }
    }
}
