pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod mutation;

pub use document::{ClaimToken, Delivery, DeliveryHandler, Document, ListenerId, ObserverId};
pub use element::{contains_or_equal, find_element, find_path, Content, Element, Role};
pub use error::DomError;
pub use event::{Event, EventId, EventKind, FocusEvent, Key, KeyEvent, Modifiers};
pub use focus::{collect_focusable, first_focusable_descendant};
pub use mutation::{MutationKind, MutationRecord, ObserveOptions};
