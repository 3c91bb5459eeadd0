pub mod book;
pub mod checkout;
pub mod health;
pub mod review;
