pub mod tests_generation;
