mod csrf;

pub use csrf::require_same_origin;
