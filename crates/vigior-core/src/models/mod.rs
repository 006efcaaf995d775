pub mod observation;
pub mod patient_record;
pub mod recommendation;
pub mod scores;
