mod engine_tests;
mod table_tests;
