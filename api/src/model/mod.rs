pub mod book;
pub mod checkout;
pub mod review;
