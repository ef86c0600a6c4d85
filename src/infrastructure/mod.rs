pub mod audit;
pub mod notifiers;
