pub mod actions;
pub mod executions;
pub mod health;
