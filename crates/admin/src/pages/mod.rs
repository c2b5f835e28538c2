//! Page state kept between requests.

mod sessions;
mod warehouse_search;
mod zone_details;

pub use sessions::EditSessions;
pub use warehouse_search::WarehouseSearch;
pub use zone_details::ZoneDetailsPage;
