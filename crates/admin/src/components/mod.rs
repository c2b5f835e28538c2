//! Reusable page components.
//!
//! Each component is a small view struct with its own Askama template.
//! Components are stateless: they render what their owner hands them and
//! expose the URLs their actions post to. Pages embed them with
//! `{{ component|safe }}`.

pub mod address_fields;
pub mod assignment_list;
pub mod choice_list;
pub mod rate_list;
pub mod save_bar;

pub use address_fields::AddressFieldSet;
pub use assignment_list::AssignmentList;
pub use choice_list::{Choice, ChoiceAdd, ChoiceListField};
pub use rate_list::RateList;
pub use save_bar::SaveBar;
