pub mod categorize;
pub mod info;
pub mod review;
pub mod scan;
pub mod update;

#[cfg(test)]
pub(crate) mod mock;
