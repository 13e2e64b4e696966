pub mod clients;
pub mod sales;
pub mod users;
