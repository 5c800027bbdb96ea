pub mod demographics;
pub mod participant;
pub mod questionnaire;
