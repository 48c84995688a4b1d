pub mod analytics;
pub mod audit;
pub mod consent;
pub mod enums;
pub mod filters;
pub mod patient;
pub mod record;
pub mod report;
pub mod user;
