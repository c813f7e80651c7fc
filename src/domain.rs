pub mod contact_rules;
pub mod entities;
pub mod use_cases;
