pub mod activity_form;
pub mod activity_list;
pub mod filters;
pub mod notifications;
pub mod statistics;
