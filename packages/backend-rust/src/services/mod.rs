pub mod predictor;
pub mod student_form;
pub mod style_report;
