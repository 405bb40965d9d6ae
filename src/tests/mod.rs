
mod codex_tests;
mod path_tests;
