pub mod customer;
pub mod genre;
pub mod movie;
pub mod rental_detail;
pub mod rental_header;
