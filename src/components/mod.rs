pub mod capability_upload;
pub mod feedback_form;
pub mod fellowship_graph;
pub mod plan_results;
pub mod ticket_form;
