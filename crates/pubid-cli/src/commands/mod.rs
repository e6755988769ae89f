pub mod resolve;
pub mod scan;
pub mod seed;
pub mod short_code;
