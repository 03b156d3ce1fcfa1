pub mod board;
pub mod column;
pub mod ticket;
