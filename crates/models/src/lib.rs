pub mod account;
pub mod appointment;
pub mod db;
pub mod errors;

#[cfg(test)]
mod tests;
