pub mod calendar;
pub mod oauth;
pub mod token;

#[cfg(test)]
pub(crate) mod mock;
