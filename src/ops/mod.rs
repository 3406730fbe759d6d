pub mod build;

#[cfg(test)]
pub(crate) mod test_helpers;
