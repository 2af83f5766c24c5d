// Domain module
// Naming rules and the records the workflows operate on

pub mod naming;
pub mod pull_request;
pub mod work_item;
