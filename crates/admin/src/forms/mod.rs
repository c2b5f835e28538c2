//! Server-side form state for the shipping pages.
//!
//! Forms are seeded once from the record they edit and then mutated only by
//! change events posted from the page. Persistence is always the caller's
//! job; a form hands its data to a callback on submit and never talks to the
//! API itself.

mod errors;
mod state;
mod zone;

pub use errors::FieldErrors;
pub use state::{FormData, FormState};
pub use zone::{UnknownZoneField, WarehouseDisplayValue, ZoneEditForm, ZoneField, ZoneFormData};
