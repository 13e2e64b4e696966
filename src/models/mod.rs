pub mod clients;
pub mod sales;
pub mod stats;
pub mod users;
