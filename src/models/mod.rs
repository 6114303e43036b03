mod admin;
mod forms;

pub use admin::AdminRecord;
pub use forms::AdminForm;
