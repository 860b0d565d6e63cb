mod json_lines_tests;
