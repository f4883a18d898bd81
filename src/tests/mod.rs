mod arithmetic_tests;
mod polynomial_tests;
mod rust_api_tests;
