pub mod decision;
pub mod inventory;
