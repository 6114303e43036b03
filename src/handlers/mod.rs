mod admin;
mod assets;

pub use admin::{save_admin, load_admins};
pub use assets::asset_routes;
