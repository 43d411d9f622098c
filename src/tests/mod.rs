mod ml_tests;
mod repo_tests;
